use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisScale, IntersectionTolerance, Rect, ScreenPoint, Segment, SeriesId, SeriesPolyline,
    segment_intersection_with_tolerance,
};

use super::{PointerInput, PointerPhase, TrackerPhase};

/// Geometry the tracker needs from the current layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerGeometry {
    /// Height of the chart view; the probe spans `0..=view_height`.
    pub view_height: f64,
    pub plot_frame: Rect,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

/// Where the probe crossed one series, in screen and domain units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeHit {
    pub screen: ScreenPoint,
    pub altitude: f64,
}

/// Outcome of one probe, one slot per series in series order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub pointer: ScreenPoint,
    /// Distance under the pointer; `None` when no series was crossed.
    pub distance: Option<f64>,
    pub hits: Vec<Option<ProbeHit>>,
}

impl ProbeResult {
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|hit| hit.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hit_count() == 0
    }

    #[must_use]
    pub fn hit(&self, series_id: SeriesId) -> Option<ProbeHit> {
        self.hits.get(series_id.index()).copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerUpdate {
    /// The probe was recomputed for a began/moved event.
    Probed(ProbeResult),
    /// Tracking ended; the overlay must be hidden.
    Cleared,
    /// Nothing changed (release while idle, or event without contacts).
    Ignored,
}

/// Vertical-probe value tracker over the rendered series polylines.
#[derive(Debug, Clone)]
pub struct LineTracker {
    geometry: TrackerGeometry,
    polylines: Vec<SeriesPolyline>,
    tolerance: IntersectionTolerance,
    phase: TrackerPhase,
    last_probe: Option<ProbeResult>,
}

impl LineTracker {
    /// `polylines` must hold one entry per series, in series order.
    #[must_use]
    pub fn new(
        geometry: TrackerGeometry,
        polylines: Vec<SeriesPolyline>,
        tolerance: IntersectionTolerance,
    ) -> Self {
        Self {
            geometry,
            polylines,
            tolerance,
            phase: TrackerPhase::Idle,
            last_probe: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    #[must_use]
    pub fn geometry(&self) -> TrackerGeometry {
        self.geometry
    }

    #[must_use]
    pub fn tolerance(&self) -> IntersectionTolerance {
        self.tolerance
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.polylines.len()
    }

    #[must_use]
    pub fn last_probe(&self) -> Option<&ProbeResult> {
        self.last_probe.as_ref()
    }

    /// Intersects a vertical probe at `pointer.x` with every series.
    ///
    /// Each series contributes at most its first crossing.
    #[must_use]
    pub fn probe(&self, pointer: ScreenPoint) -> ProbeResult {
        let probe = Segment::vertical(pointer.x, 0.0, self.geometry.view_height);
        let y_scale = self.geometry.y_scale;

        let hits: Vec<Option<ProbeHit>> = self
            .polylines
            .iter()
            .map(|polyline| {
                polyline
                    .forward_segments()
                    .find_map(|segment| {
                        segment_intersection_with_tolerance(probe, segment, self.tolerance)
                    })
                    .map(|screen| ProbeHit {
                        screen,
                        altitude: y_scale.to_domain(screen.y),
                    })
            })
            .collect();

        let distance = hits
            .iter()
            .any(Option::is_some)
            .then(|| self.geometry.x_scale.to_domain(pointer.x));

        ProbeResult {
            pointer,
            distance,
            hits,
        }
    }

    pub fn handle(&mut self, input: &PointerInput) -> TrackerUpdate {
        match input.phase {
            PointerPhase::Began | PointerPhase::Moved => {
                let Some(pointer) = input.primary().filter(|pointer| pointer.is_finite()) else {
                    return TrackerUpdate::Ignored;
                };
                let result = self.probe(pointer);
                trace!(
                    x = pointer.x,
                    hits = result.hit_count(),
                    distance = ?result.distance,
                    "tracker probe"
                );
                let next = if result.is_empty() {
                    TrackerPhase::TrackingEmpty
                } else {
                    TrackerPhase::Tracking
                };
                self.transition(next);
                self.last_probe = Some(result.clone());
                TrackerUpdate::Probed(result)
            }
            PointerPhase::Ended | PointerPhase::Cancelled => {
                let was_active = self.phase.is_active();
                self.transition(TrackerPhase::Idle);
                self.last_probe = None;
                if was_active {
                    TrackerUpdate::Cleared
                } else {
                    TrackerUpdate::Ignored
                }
            }
        }
    }

    fn transition(&mut self, next: TrackerPhase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "tracker phase changed");
            self.phase = next;
        }
    }
}

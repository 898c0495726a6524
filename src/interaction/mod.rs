mod tracker;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ScreenPoint;

pub use tracker::{LineTracker, ProbeHit, ProbeResult, TrackerGeometry, TrackerUpdate};

/// Lifecycle phase of a pointer (touch or mouse) interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One pointer event as delivered by the host toolkit.
///
/// Touch sources may report several simultaneous contacts; only the first is
/// tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub touches: SmallVec<[ScreenPoint; 2]>,
}

impl PointerInput {
    #[must_use]
    pub fn new(phase: PointerPhase, touches: impl IntoIterator<Item = ScreenPoint>) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn began(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Began, [ScreenPoint::new(x, y)])
    }

    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Moved, [ScreenPoint::new(x, y)])
    }

    #[must_use]
    pub fn ended() -> Self {
        Self::new(PointerPhase::Ended, [])
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(PointerPhase::Cancelled, [])
    }

    /// The tracked contact.
    #[must_use]
    pub fn primary(&self) -> Option<ScreenPoint> {
        self.touches.first().copied()
    }

    /// Same event with every contact shifted into another coordinate space.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            phase: self.phase,
            touches: self.touches.iter().map(|touch| touch.offset(dx, dy)).collect(),
        }
    }
}

/// Tracker state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackerPhase {
    /// No pointer interaction; overlay hidden.
    #[default]
    Idle,
    /// Pointer down and the probe crosses at least one series.
    Tracking,
    /// Pointer down but the probe crosses no series.
    TrackingEmpty,
}

impl TrackerPhase {
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::{PointerInput, PointerPhase};
    use crate::core::ScreenPoint;

    #[test]
    fn first_touch_is_primary() {
        let input = PointerInput::new(
            PointerPhase::Moved,
            [ScreenPoint::new(5.0, 6.0), ScreenPoint::new(50.0, 60.0)],
        );
        assert_eq!(input.primary(), Some(ScreenPoint::new(5.0, 6.0)));
        assert_eq!(PointerInput::ended().primary(), None);
    }

    #[test]
    fn translation_moves_every_touch() {
        let input = PointerInput::began(10.0, 80.0).translated(0.0, -70.0);
        assert_eq!(input.primary(), Some(ScreenPoint::new(10.0, 10.0)));
        assert_eq!(input.phase, PointerPhase::Began);
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisSettings, Rect, ScreenPoint, SeriesId};
use crate::interaction::ProbeResult;
use crate::overlay::format_readout;
use crate::render::Color;

/// Half of the plot that holds the info box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlaySide {
    Left,
    #[default]
    Right,
}

impl OverlaySide {
    /// The box always sits on the half opposite the pointer.
    #[must_use]
    pub fn opposite_to(pointer_x: f64, plot_frame: Rect) -> Self {
        if pointer_x < plot_frame.center_x() {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Per-series part of the overlay: the thumb and the altitude label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReadout {
    /// Thumb center; `None` hides both the thumb and the label.
    pub thumb_center: Option<ScreenPoint>,
    pub text: Option<String>,
    pub text_color: Color,
}

impl SeriesReadout {
    #[must_use]
    pub fn hidden(text_color: Color) -> Self {
        Self {
            thumb_center: None,
            text: None,
            text_color,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.thumb_center.is_some()
    }
}

/// Everything the presenter needs to draw the tracker overlay for one event.
///
/// Rebuilt from scratch on every pointer event; nothing is carried over
/// between probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    pub visible: bool,
    pub guide_x: Option<f64>,
    pub side: OverlaySide,
    pub distance_text: Option<String>,
    pub readouts: IndexMap<SeriesId, SeriesReadout>,
}

impl OverlayState {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            guide_x: None,
            side: OverlaySide::default(),
            distance_text: None,
            readouts: IndexMap::new(),
        }
    }

    /// Derives the overlay for a probe.
    ///
    /// `label_colors` holds one readout text color per series, in series order.
    #[must_use]
    pub fn from_probe(
        probe: &ProbeResult,
        plot_frame: Rect,
        axis: &AxisSettings,
        label_colors: &[Color],
    ) -> Self {
        let readouts: IndexMap<SeriesId, SeriesReadout> = probe
            .hits
            .iter()
            .enumerate()
            .map(|(index, hit)| {
                let text_color = label_colors.get(index).copied().unwrap_or(Color::WHITE);
                let readout = match hit {
                    Some(hit) => SeriesReadout {
                        thumb_center: Some(hit.screen),
                        text: Some(format_readout(
                            &axis.y_short_title,
                            hit.altitude,
                            &axis.y_unit,
                        )),
                        text_color,
                    },
                    None => SeriesReadout::hidden(text_color),
                };
                (SeriesId::new(index), readout)
            })
            .collect();

        let Some(distance) = probe.distance else {
            return Self {
                readouts,
                ..Self::hidden()
            };
        };

        Self {
            visible: true,
            guide_x: Some(probe.pointer.x),
            side: OverlaySide::opposite_to(probe.pointer.x, plot_frame),
            distance_text: Some(format_readout(&axis.x_short_title, distance, &axis.x_unit)),
            readouts,
        }
    }

    #[must_use]
    pub fn visible_readout_count(&self) -> usize {
        self.readouts
            .values()
            .filter(|readout| readout.is_visible())
            .count()
    }
}

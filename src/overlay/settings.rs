use serde::{Deserialize, Serialize};

use crate::core::IntersectionTolerance;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Animation durations, in seconds, for overlay transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTiming {
    pub thumb_show_secs: f64,
    pub thumb_hide_secs: f64,
    pub label_resize_secs: f64,
    pub fade_secs: f64,
    pub reposition_secs: f64,
}

impl Default for OverlayTiming {
    fn default() -> Self {
        Self {
            thumb_show_secs: 0.4,
            thumb_hide_secs: 0.2,
            label_resize_secs: 0.3,
            fade_secs: 0.3,
            reposition_secs: 0.4,
        }
    }
}

/// Visual settings of the value-tracking overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    pub thumb_size: f64,
    pub thumb_corner_radius: f64,
    pub thumb_border_width: f64,
    pub thumb_border_color: Color,
    pub thumb_background_color: Color,
    pub guide_line_color: Color,
    pub guide_line_width: f64,
    pub info_font_color: Color,
    pub info_background_color: Color,
    pub info_label_height: f64,
    pub info_label_width: f64,
    pub info_label_margin: f64,
    pub info_font_size_px: f64,
    /// Distance from the chart top to the info box.
    pub info_top_offset: f64,
    /// Saturation factor applied to series colors for their readout text.
    pub label_saturation_factor: f64,
    pub intersection_tolerance: IntersectionTolerance,
    pub timing: OverlayTiming,
}

impl TrackerSettings {
    /// Phone-sized thumbs.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            thumb_size: 12.0,
            thumb_corner_radius: 6.0,
            thumb_border_width: 2.0,
            ..Self::default()
        }
    }

    /// Tablet-sized thumbs.
    #[must_use]
    pub fn regular() -> Self {
        Self {
            thumb_size: 18.0,
            thumb_corner_radius: 9.0,
            thumb_border_width: 4.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn info_box_width(&self) -> f64 {
        self.info_label_width + 2.0 * self.info_label_margin
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("thumb_size", self.thumb_size),
            ("info_label_height", self.info_label_height),
            ("info_label_width", self.info_label_width),
            ("info_font_size_px", self.info_font_size_px),
            ("guide_line_width", self.guide_line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tracker `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("thumb_corner_radius", self.thumb_corner_radius),
            ("thumb_border_width", self.thumb_border_width),
            ("info_label_margin", self.info_label_margin),
            ("info_top_offset", self.info_top_offset),
            ("label_saturation_factor", self.label_saturation_factor),
            ("intersection_tolerance.epsilon", self.intersection_tolerance.epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tracker `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("thumb_show_secs", self.timing.thumb_show_secs),
            ("thumb_hide_secs", self.timing.thumb_hide_secs),
            ("label_resize_secs", self.timing.label_resize_secs),
            ("fade_secs", self.timing.fade_secs),
            ("reposition_secs", self.timing.reposition_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "overlay timing `{name}` must be finite and >= 0"
                )));
            }
        }
        for color in [
            self.thumb_border_color,
            self.thumb_background_color,
            self.guide_line_color,
            self.info_font_color,
            self.info_background_color,
        ] {
            color.validate()?;
        }
        Ok(self)
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            thumb_size: 12.0,
            thumb_corner_radius: 6.0,
            thumb_border_width: 4.0,
            thumb_border_color: Color::BLACK,
            thumb_background_color: Color::CLEAR,
            guide_line_color: Color::GRAY,
            guide_line_width: 1.0,
            info_font_color: Color::WHITE,
            info_background_color: Color::rgba(10.0 / 256.0, 10.0 / 256.0, 10.0 / 256.0, 0.75),
            info_label_height: 18.0,
            info_label_width: 110.0,
            info_label_margin: 4.0,
            info_font_size_px: 11.0,
            info_top_offset: 20.0,
            label_saturation_factor: 0.75,
            intersection_tolerance: IntersectionTolerance::EXACT,
            timing: OverlayTiming::default(),
        }
    }
}

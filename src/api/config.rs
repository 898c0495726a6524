use serde::{Deserialize, Serialize};

use crate::core::AxisSettings;
use crate::error::{ChartError, ChartResult};
use crate::overlay::TrackerSettings;
use crate::render::Color;

/// Layout and styling of the chart body (axes, guide lines, series).
///
/// Insets and spacings follow the phone (`compact`) and tablet (`regular`)
/// presets; `Default` is the phone preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Space between the host top edge and the chart frame.
    pub chart_top_offset: f64,
    pub leading: f64,
    pub top: f64,
    pub trailing: f64,
    pub bottom: f64,
    pub labels_to_axis_spacing_x: f64,
    pub labels_to_axis_spacing_y: f64,
    pub axis_title_to_labels_spacing: f64,
    pub axis_stroke_width: f64,
    pub guide_lines_width: f64,
    pub label_font_size_px: f64,
    pub axis_color: Color,
    pub guide_lines_color: Color,
    pub label_color: Color,
    pub line_width: f64,
    /// Alpha multiplier of the area fill under each series.
    pub area_alpha: f64,
    pub line_tension: f64,
    pub smoothing_steps: usize,
    pub x_axis_segments: usize,
    pub y_axis_min_segments: usize,
    pub y_axis_max_segments: usize,
}

impl ChartSettings {
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn regular() -> Self {
        Self {
            leading: 20.0,
            top: 20.0,
            trailing: 20.0,
            bottom: 20.0,
            labels_to_axis_spacing_x: 10.0,
            labels_to_axis_spacing_y: 10.0,
            axis_title_to_labels_spacing: 5.0,
            axis_stroke_width: 1.0,
            guide_lines_width: 0.5,
            label_font_size_px: 14.0,
            ..Self::default()
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("chart_top_offset", self.chart_top_offset),
            ("leading", self.leading),
            ("top", self.top),
            ("trailing", self.trailing),
            ("bottom", self.bottom),
            ("labels_to_axis_spacing_x", self.labels_to_axis_spacing_x),
            ("labels_to_axis_spacing_y", self.labels_to_axis_spacing_y),
            ("axis_title_to_labels_spacing", self.axis_title_to_labels_spacing),
            ("line_tension", self.line_tension),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "chart `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("axis_stroke_width", self.axis_stroke_width),
            ("guide_lines_width", self.guide_lines_width),
            ("label_font_size_px", self.label_font_size_px),
            ("line_width", self.line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "chart `{name}` must be finite and > 0"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.area_alpha) {
            return Err(ChartError::InvalidConfig(
                "chart `area_alpha` must be in [0, 1]".to_owned(),
            ));
        }
        if self.x_axis_segments == 0 {
            return Err(ChartError::InvalidConfig(
                "chart `x_axis_segments` must be > 0".to_owned(),
            ));
        }
        if self.y_axis_min_segments == 0 || self.y_axis_min_segments > self.y_axis_max_segments {
            return Err(ChartError::InvalidConfig(
                "chart y axis segment bounds must satisfy 0 < min <= max".to_owned(),
            ));
        }
        for color in [self.axis_color, self.guide_lines_color, self.label_color] {
            color.validate()?;
        }
        Ok(self)
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            chart_top_offset: 70.0,
            leading: 10.0,
            top: 10.0,
            trailing: 10.0,
            bottom: 10.0,
            labels_to_axis_spacing_x: 5.0,
            labels_to_axis_spacing_y: 5.0,
            axis_title_to_labels_spacing: 4.0,
            axis_stroke_width: 0.2,
            guide_lines_width: 0.1,
            label_font_size_px: 11.0,
            axis_color: Color::BLACK,
            guide_lines_color: Color::BLACK,
            label_color: Color::BLACK,
            line_width: 4.0,
            area_alpha: 0.2,
            line_tension: 0.3,
            smoothing_steps: 12,
            x_axis_segments: 5,
            y_axis_min_segments: 5,
            y_axis_max_segments: 8,
        }
    }
}

/// Static configuration of one chart instance.
///
/// This type is serializable so hosts can ship chart setup as JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HikeChartConfig {
    pub axis: AxisSettings,
    pub chart: ChartSettings,
    pub tracker: TrackerSettings,
}

impl HikeChartConfig {
    /// Phone-sized chart and tracker presets.
    #[must_use]
    pub fn compact(axis: AxisSettings) -> Self {
        Self {
            axis,
            chart: ChartSettings::compact(),
            tracker: TrackerSettings::compact(),
        }
    }

    /// Tablet-sized chart and tracker presets.
    #[must_use]
    pub fn regular(axis: AxisSettings) -> Self {
        Self {
            axis,
            chart: ChartSettings::regular(),
            tracker: TrackerSettings::regular(),
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.chart.validate()?;
        self.tracker.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartSettings, HikeChartConfig};
    use crate::core::AxisSettings;

    #[test]
    fn presets_validate() {
        assert!(HikeChartConfig::compact(AxisSettings::default()).validate().is_ok());
        assert!(HikeChartConfig::regular(AxisSettings::default()).validate().is_ok());
    }

    #[test]
    fn inverted_segment_bounds_are_rejected() {
        let settings = ChartSettings {
            y_axis_min_segments: 9,
            ..ChartSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn regular_preset_uses_larger_insets() {
        let regular = ChartSettings::regular();
        assert_eq!(regular.leading, 20.0);
        assert_eq!(regular.label_font_size_px, 14.0);
        assert_eq!(regular.chart_top_offset, 70.0);
    }
}

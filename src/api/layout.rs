use serde::{Deserialize, Serialize};

use crate::core::{Rect, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartSettings;

/// Frames resolved for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrames {
    /// Chart view inside the host, in host coordinates.
    pub chart_frame: Rect,
    /// Plot area inside the chart view, in chart-view coordinates.
    pub plot_frame: Rect,
    pub y_axis_width: f64,
    pub x_axis_height: f64,
}

impl ChartFrames {
    /// Height of the chart view, the vertical extent of the tracker probe.
    #[must_use]
    pub fn view_height(&self) -> f64 {
        self.chart_frame.height
    }
}

/// Deterministic, backend-independent text width estimate.
pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}

/// Places the chart view below the host's top offset and carves the plot
/// area out of it, leaving room for the left and bottom axes.
pub fn resolve_chart_frames(
    viewport: Viewport,
    settings: &ChartSettings,
    x_labels: &[String],
    y_labels: &[String],
) -> ChartResult<ChartFrames> {
    let viewport = viewport.ensure_valid()?;
    let host = viewport.bounds();
    let chart_frame = Rect::new(
        0.0,
        settings.chart_top_offset,
        host.width,
        host.height - settings.chart_top_offset,
    );

    let font = settings.label_font_size_px;
    let widest_y_label = y_labels
        .iter()
        .map(|label| estimate_label_text_width_px(label, font))
        .fold(0.0, f64::max);
    let y_axis_width = settings.leading
        + font
        + settings.axis_title_to_labels_spacing
        + widest_y_label
        + settings.labels_to_axis_spacing_y;
    let x_axis_height = settings.bottom
        + font
        + settings.axis_title_to_labels_spacing
        + if x_labels.is_empty() { 0.0 } else { font }
        + settings.labels_to_axis_spacing_x;

    // The last x label is centered on the right edge of the plot.
    let trailing_overhang = x_labels
        .last()
        .map(|label| estimate_label_text_width_px(label, font) / 2.0)
        .unwrap_or(0.0);
    let trailing = settings.trailing.max(trailing_overhang);

    let plot_frame = Rect::new(
        y_axis_width,
        settings.top,
        chart_frame.width - y_axis_width - trailing,
        chart_frame.height - settings.top - x_axis_height,
    );
    if !(plot_frame.width > 0.0 && plot_frame.height > 0.0) {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    Ok(ChartFrames {
        chart_frame,
        plot_frame,
        y_axis_width,
        x_axis_height,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::resolve_chart_frames;
    use crate::api::ChartSettings;
    use crate::core::Viewport;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn chart_frame_sits_below_top_offset() {
        let frames = resolve_chart_frames(
            Viewport::new(320, 400),
            &ChartSettings::default(),
            &labels(&["0", "1000"]),
            &labels(&["700", "800"]),
        )
        .expect("frames");
        assert_relative_eq!(frames.chart_frame.y, 70.0);
        assert_relative_eq!(frames.chart_frame.height, 330.0);
        assert_relative_eq!(frames.view_height(), 330.0);
        assert_relative_eq!(frames.plot_frame.y, 10.0);
        assert!(frames.plot_frame.x > 10.0);
        assert!(frames.plot_frame.max_x() <= 320.0);
        assert!(frames.plot_frame.max_y() < 330.0);
    }

    #[test]
    fn wider_y_labels_push_plot_right() {
        let narrow = resolve_chart_frames(
            Viewport::new(320, 400),
            &ChartSettings::default(),
            &labels(&["0"]),
            &labels(&["1"]),
        )
        .expect("narrow");
        let wide = resolve_chart_frames(
            Viewport::new(320, 400),
            &ChartSettings::default(),
            &labels(&["0"]),
            &labels(&["12000"]),
        )
        .expect("wide");
        assert!(wide.plot_frame.x > narrow.plot_frame.x);
    }

    #[test]
    fn viewport_too_short_for_top_offset_is_rejected() {
        assert!(
            resolve_chart_frames(Viewport::new(320, 60), &ChartSettings::default(), &[], &[])
                .is_err()
        );
    }
}

use indexmap::IndexMap;

use crate::core::{Rect, SeriesId};
use crate::overlay::{OverlaySide, OverlayState, TrackerSettings};

/// Frames of every overlay element for one visible state.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub box_frame: Rect,
    pub distance_label_frame: Rect,
    pub guide_frame: Option<Rect>,
    /// Stacked altitude labels; hidden labels collapse to zero height.
    pub label_frames: IndexMap<SeriesId, Rect>,
    /// `None` for series the probe did not cross.
    pub thumb_frames: IndexMap<SeriesId, Option<Rect>>,
}

/// Lays out the info box, labels, thumbs and guide line inside the chart view.
///
/// The box is centered on the quarter of the plot frame selected by
/// `state.side` and sized to fit the distance label plus every visible
/// altitude label.
#[must_use]
pub fn layout_overlay(
    state: &OverlayState,
    plot_frame: Rect,
    view_height: f64,
    settings: &TrackerSettings,
) -> OverlayLayout {
    let margin = settings.info_label_margin;
    let label_height = settings.info_label_height;
    let box_width = settings.info_box_width();

    let quadrant = match state.side {
        OverlaySide::Left => 0.25,
        OverlaySide::Right => 0.75,
    };
    let box_x = plot_frame.x + plot_frame.width * quadrant - box_width / 2.0;
    let box_y = settings.info_top_offset;

    let distance_label_frame = Rect::new(
        box_x + margin,
        box_y + margin,
        settings.info_label_width,
        label_height,
    );

    let mut cursor = margin + label_height;
    let mut label_frames = IndexMap::with_capacity(state.readouts.len());
    let mut thumb_frames = IndexMap::with_capacity(state.readouts.len());
    for (series_id, readout) in &state.readouts {
        let height = if readout.is_visible() { label_height } else { 0.0 };
        label_frames.insert(
            *series_id,
            Rect::new(box_x + margin, box_y + cursor, settings.info_label_width, height),
        );
        cursor += height;

        thumb_frames.insert(
            *series_id,
            readout
                .thumb_center
                .map(|center| Rect::centered_square(center, settings.thumb_size)),
        );
    }

    let guide_frame = state.guide_x.map(|x| {
        Rect::new(
            x - settings.guide_line_width / 2.0,
            0.0,
            settings.guide_line_width,
            view_height.max(0.0),
        )
    });

    OverlayLayout {
        box_frame: Rect::new(box_x, box_y, box_width, cursor + margin),
        distance_label_frame,
        guide_frame,
        label_frames,
        thumb_frames,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use indexmap::IndexMap;

    use super::layout_overlay;
    use crate::core::{Rect, ScreenPoint, SeriesId};
    use crate::overlay::{OverlaySide, OverlayState, SeriesReadout, TrackerSettings};
    use crate::render::Color;

    fn state(side: OverlaySide, visible: &[bool]) -> OverlayState {
        let readouts: IndexMap<SeriesId, SeriesReadout> = visible
            .iter()
            .enumerate()
            .map(|(index, visible)| {
                let readout = if *visible {
                    SeriesReadout {
                        thumb_center: Some(ScreenPoint::new(100.0, 50.0 + index as f64)),
                        text: Some("Alt : 800m".to_owned()),
                        text_color: Color::WHITE,
                    }
                } else {
                    SeriesReadout::hidden(Color::WHITE)
                };
                (SeriesId::new(index), readout)
            })
            .collect();
        OverlayState {
            visible: true,
            guide_x: Some(100.0),
            side,
            distance_text: Some("Dist : 10m".to_owned()),
            readouts,
        }
    }

    #[test]
    fn box_height_fits_visible_labels_only() {
        let settings = TrackerSettings::default();
        let plot = Rect::new(40.0, 0.0, 400.0, 200.0);
        let layout = layout_overlay(
            &state(OverlaySide::Right, &[true, false, true]),
            plot,
            220.0,
            &settings,
        );

        // margin + distance + two labels + margin
        assert_relative_eq!(layout.box_frame.height, 4.0 + 18.0 + 36.0 + 4.0);
        assert_relative_eq!(layout.box_frame.width, 118.0);
        assert_relative_eq!(layout.box_frame.center_x(), 40.0 + 300.0);
        assert_relative_eq!(layout.box_frame.y, 20.0);

        let hidden = layout.label_frames[&SeriesId::new(1)];
        let third = layout.label_frames[&SeriesId::new(2)];
        assert_relative_eq!(hidden.height, 0.0);
        assert_relative_eq!(third.y, 20.0 + 4.0 + 18.0 + 18.0);
        assert!(layout.thumb_frames[&SeriesId::new(1)].is_none());
    }

    #[test]
    fn left_side_uses_first_quadrant() {
        let layout = layout_overlay(
            &state(OverlaySide::Left, &[true]),
            Rect::new(0.0, 0.0, 400.0, 200.0),
            200.0,
            &TrackerSettings::default(),
        );
        assert_relative_eq!(layout.box_frame.center_x(), 100.0);
    }

    #[test]
    fn guide_spans_whole_view_height() {
        let layout = layout_overlay(
            &state(OverlaySide::Left, &[true]),
            Rect::new(0.0, 0.0, 400.0, 200.0),
            260.0,
            &TrackerSettings::default(),
        );
        let guide = layout.guide_frame.expect("guide");
        assert_relative_eq!(guide.center_x(), 100.0);
        assert_relative_eq!(guide.height, 260.0);
    }
}

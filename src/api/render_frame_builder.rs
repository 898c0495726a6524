use crate::core::{CubicTension, Rect, ScreenPoint, area_fill_polygon, smooth_polyline};
use crate::error::ChartResult;
use crate::overlay::{OverlayNode, OverlayScene, TrackerSettings};
use crate::render::{
    LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::{ChartSettings, HikeChart, ReloadPlan};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

impl<R: Renderer> HikeChart<R> {
    /// Materializes the current chart into host-space draw commands.
    ///
    /// Before the first reload has been applied the frame is empty.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.viewport);
        let Some(plan) = &self.plan else {
            return Ok(frame);
        };

        let origin = ScreenPoint::new(plan.frames.chart_frame.x, plan.frames.chart_frame.y);
        let chart = &self.config.chart;

        push_guide_lines(&mut frame, plan, chart, origin);
        push_axes(&mut frame, plan, chart, origin);
        push_series(&mut frame, plan, chart, origin);
        if let Some(presenter) = &self.presenter {
            push_overlay(&mut frame, presenter.scene(), presenter.settings(), origin);
        }

        frame.validate()?;
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context, such as a toolkit
    /// draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

fn push_guide_lines(
    frame: &mut RenderFrame,
    plan: &ReloadPlan,
    chart: &ChartSettings,
    origin: ScreenPoint,
) {
    let plot = plan.frames.plot_frame.translated(origin.x, origin.y);
    for value in plan.y_axis.values() {
        let y = plan.y_axis.screen_loc_for_scalar(*value) + origin.y;
        frame.lines.push(LinePrimitive::new(
            plot.x,
            y,
            plot.max_x(),
            y,
            chart.guide_lines_width,
            chart.guide_lines_color,
        ));
    }
}

fn push_axes(frame: &mut RenderFrame, plan: &ReloadPlan, chart: &ChartSettings, origin: ScreenPoint) {
    let plot = plan.frames.plot_frame.translated(origin.x, origin.y);
    let font = chart.label_font_size_px;

    frame.lines.push(LinePrimitive::new(
        plot.x,
        plot.max_y(),
        plot.max_x(),
        plot.max_y(),
        chart.axis_stroke_width,
        chart.axis_color,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.x,
        plot.y,
        plot.x,
        plot.max_y(),
        chart.axis_stroke_width,
        chart.axis_color,
    ));

    let x_labels_top = plot.max_y() + chart.labels_to_axis_spacing_x;
    for (value, label) in plan.x_axis.values().iter().zip(&plan.x_labels) {
        frame.texts.push(TextPrimitive::new(
            label.clone(),
            plan.x_axis.screen_loc_for_scalar(*value) + origin.x,
            x_labels_top,
            font,
            chart.label_color,
            TextHAlign::Center,
        ));
    }
    for (value, label) in plan.y_axis.values().iter().zip(&plan.y_labels) {
        frame.texts.push(TextPrimitive::new(
            label.clone(),
            plot.x - chart.labels_to_axis_spacing_y,
            plan.y_axis.screen_loc_for_scalar(*value) + origin.y - font / 2.0,
            font,
            chart.label_color,
            TextHAlign::Right,
        ));
    }

    if !plan.x_axis.title().is_empty() {
        frame.texts.push(TextPrimitive::new(
            plan.x_axis.title(),
            plot.center_x(),
            x_labels_top + font + chart.axis_title_to_labels_spacing,
            font,
            chart.label_color,
            TextHAlign::Center,
        ));
    }
    if !plan.y_axis.title().is_empty() {
        frame.texts.push(
            TextPrimitive::new(
                plan.y_axis.title(),
                origin.x + chart.leading,
                plot.y + plot.height / 2.0,
                font,
                chart.label_color,
                TextHAlign::Center,
            )
            .rotated(),
        );
    }
}

fn push_series(
    frame: &mut RenderFrame,
    plan: &ReloadPlan,
    chart: &ChartSettings,
    origin: ScreenPoint,
) {
    let tension = CubicTension::uniform(chart.line_tension);
    let baseline_y = plan.y_axis.screen_loc_for_scalar(plan.y_axis.first()) + origin.y;

    for (polyline, color) in plan.polylines.iter().zip(&plan.line_colors) {
        if polyline.points.len() < 2 {
            continue;
        }
        let shifted: Vec<ScreenPoint> = polyline
            .points
            .iter()
            .map(|point| point.offset(origin.x, origin.y))
            .collect();
        let smoothed = smooth_polyline(&shifted, tension, chart.smoothing_steps);

        frame.polygons.push(PolygonPrimitive::new(
            area_fill_polygon(&smoothed, baseline_y),
            color.with_alpha(color.alpha * chart.area_alpha),
        ));
        for pair in smoothed.windows(2) {
            frame.lines.push(LinePrimitive::new(
                pair[0].x,
                pair[0].y,
                pair[1].x,
                pair[1].y,
                chart.line_width,
                *color,
            ));
        }
    }
}

fn push_overlay(
    frame: &mut RenderFrame,
    scene: &OverlayScene,
    settings: &TrackerSettings,
    origin: ScreenPoint,
) {
    for (node, visual) in scene.nodes() {
        if !visual.is_visible() {
            continue;
        }
        let rect: Rect = visual.frame.translated(origin.x, origin.y);
        let opacity = visual.opacity;

        match node {
            OverlayNode::InfoBox => frame.rects.push(
                RectPrimitive::filled(rect, settings.info_background_color.faded(opacity))
                    .with_corner_radius(settings.info_label_margin),
            ),
            OverlayNode::DistanceLabel => {
                if !scene.distance_text().is_empty() {
                    frame.texts.push(TextPrimitive::new(
                        scene.distance_text(),
                        rect.x,
                        rect.y,
                        settings.info_font_size_px,
                        settings.info_font_color.faded(opacity),
                        TextHAlign::Left,
                    ));
                }
            }
            OverlayNode::GuideLine => frame.lines.push(LinePrimitive::new(
                rect.center_x(),
                rect.y,
                rect.center_x(),
                rect.max_y(),
                settings.guide_line_width,
                settings.guide_line_color.faded(opacity),
            )),
            OverlayNode::AltitudeLabel(series_id) => {
                if rect.height <= 0.0 {
                    continue;
                }
                if let Some((text, color)) = scene.label_text(series_id) {
                    frame.texts.push(TextPrimitive::new(
                        text,
                        rect.x,
                        rect.y,
                        settings.info_font_size_px,
                        color.faded(opacity),
                        TextHAlign::Left,
                    ));
                }
            }
            OverlayNode::Thumb(_) => frame.rects.push(
                RectPrimitive::filled(rect, settings.thumb_background_color.faded(opacity))
                    .with_border(
                        settings.thumb_border_width,
                        settings.thumb_border_color.faded(opacity),
                    )
                    .with_corner_radius(settings.thumb_corner_radius),
            ),
        }
    }
}

use crate::render::Renderer;

use super::HikeChart;

/// Receives pointer lifecycle notifications from a chart.
///
/// Notifications carry only the chart itself; query it for tracker phase,
/// overlay state or the last probe. Every method defaults to a no-op.
pub trait InteractionSink<R: Renderer> {
    fn on_begin(&mut self, _chart: &HikeChart<R>) {}

    fn on_move(&mut self, _chart: &HikeChart<R>) {}

    fn on_end(&mut self, _chart: &HikeChart<R>) {}

    fn on_cancel(&mut self, _chart: &HikeChart<R>) {}
}

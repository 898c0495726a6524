use crate::interaction::{PointerInput, PointerPhase, TrackerPhase, TrackerUpdate};
use crate::overlay::OverlayState;
use crate::render::Renderer;

use super::HikeChart;

impl<R: Renderer> HikeChart<R> {
    /// Routes one pointer event, given in host coordinates, through the
    /// tracker and overlay, then notifies the interaction sink.
    ///
    /// The placeholder chart has no tracker and reports nothing to the sink.
    pub fn handle_pointer(&mut self, input: &PointerInput) -> TrackerPhase {
        let (dx, dy) = self.frames().map_or((0.0, 0.0), |frames| {
            (-frames.chart_frame.x, -frames.chart_frame.y)
        });
        let local = input.translated(dx, dy);

        if let (Some(tracker), Some(presenter), Some(plan)) =
            (&mut self.tracker, &mut self.presenter, &self.plan)
        {
            match tracker.handle(&local) {
                TrackerUpdate::Probed(probe) => {
                    let state = OverlayState::from_probe(
                        &probe,
                        plan.frames.plot_frame,
                        &self.config.axis,
                        &self.label_colors,
                    );
                    self.last_transitions = presenter.apply(&state);
                    self.overlay = state;
                }
                TrackerUpdate::Cleared => {
                    self.last_transitions = presenter.reset();
                    self.overlay = OverlayState::hidden();
                }
                TrackerUpdate::Ignored => self.last_transitions.clear(),
            }
        }

        if !self.is_placeholder() {
            self.notify_sink(input.phase);
        }
        self.tracker_phase()
    }

    pub fn pointer_began(&mut self, x: f64, y: f64) -> TrackerPhase {
        self.handle_pointer(&PointerInput::began(x, y))
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) -> TrackerPhase {
        self.handle_pointer(&PointerInput::moved(x, y))
    }

    pub fn pointer_ended(&mut self) -> TrackerPhase {
        self.handle_pointer(&PointerInput::ended())
    }

    pub fn pointer_cancelled(&mut self) -> TrackerPhase {
        self.handle_pointer(&PointerInput::cancelled())
    }

    fn notify_sink(&mut self, phase: PointerPhase) {
        let Some(mut sink) = self.sink.take() else {
            return;
        };
        match phase {
            PointerPhase::Began => sink.on_begin(self),
            PointerPhase::Moved => sink.on_move(self),
            PointerPhase::Ended => sink.on_end(self),
            PointerPhase::Cancelled => sink.on_cancel(self),
        }
        self.sink = Some(sink);
    }
}

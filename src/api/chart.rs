use tracing::debug;

use crate::core::{AxisModel, DataSeries, IntersectionTolerance, Viewport};
use crate::error::ChartResult;
use crate::interaction::{LineTracker, ProbeResult, TrackerGeometry, TrackerPhase};
use crate::overlay::{OverlayPresenter, OverlayScene, OverlayState, OverlayTransition};
use crate::render::{Color, Renderer};

use super::{
    ChartFrames, HikeChartConfig, InlineExecutor, InteractionSink, PendingReload, ReloadExecutor,
    ReloadInput, ReloadPlan, ReloadScheduler,
};

/// Hike profile chart host.
///
/// Owns the data series and settings, rebuilds axes and polylines on every
/// data or size change, and routes pointer events through the tracker into
/// the overlay presenter.
pub struct HikeChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: HikeChartConfig,
    pub(super) series: Vec<DataSeries>,
    pub(super) scheduler: ReloadScheduler,
    pub(super) executor: Box<dyn ReloadExecutor>,
    pub(super) pending: Option<PendingReload>,
    /// Viewport and series of the reload in flight, committed on apply.
    pub(super) requested: Option<(Viewport, Vec<DataSeries>)>,
    pub(super) plan: Option<ReloadPlan>,
    pub(super) label_colors: Vec<Color>,
    pub(super) tracker: Option<LineTracker>,
    pub(super) presenter: Option<OverlayPresenter>,
    pub(super) overlay: OverlayState,
    pub(super) last_transitions: Vec<OverlayTransition>,
    pub(super) sink: Option<Box<dyn InteractionSink<R>>>,
}

impl<R: Renderer> HikeChart<R> {
    /// Creates a chart and loads `series` synchronously.
    pub fn new(
        renderer: R,
        viewport: Viewport,
        series: Vec<DataSeries>,
        config: HikeChartConfig,
    ) -> ChartResult<Self> {
        Self::with_executor(renderer, viewport, series, config, Box::new(InlineExecutor))
    }

    /// Creates a chart whose reloads run on `executor`.
    ///
    /// With a background executor the first layout is available after
    /// [`HikeChart::poll_reload`] reports it applied.
    pub fn with_executor(
        renderer: R,
        viewport: Viewport,
        series: Vec<DataSeries>,
        config: HikeChartConfig,
        executor: Box<dyn ReloadExecutor>,
    ) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let config = config.validate()?;
        for entry in &series {
            entry.validate()?;
        }

        let mut chart = Self {
            renderer,
            viewport,
            config,
            series,
            scheduler: ReloadScheduler::default(),
            executor,
            pending: None,
            requested: None,
            plan: None,
            label_colors: Vec::new(),
            tracker: None,
            presenter: None,
            overlay: OverlayState::hidden(),
            last_transitions: Vec::new(),
            sink: None,
        };
        chart.reload()?;
        Ok(chart)
    }

    /// Replaces every series and reloads.
    ///
    /// The new series become visible through [`HikeChart::series`] once their
    /// plan is applied; a failed reload leaves the chart untouched.
    pub fn set_series(&mut self, series: Vec<DataSeries>) -> ChartResult<()> {
        for entry in &series {
            entry.validate()?;
        }
        let input = self.candidate_input(self.requested_viewport(), series);
        self.submit(input)
    }

    /// Relayouts for a new viewport. On error the previous layout is kept.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.ensure_valid()?;
        let input = self.candidate_input(viewport, self.requested_series().to_vec());
        self.submit(input)
    }

    /// Issues a new reload ticket and snapshots the state a plan needs.
    ///
    /// Any plan computed from an older snapshot is rejected by
    /// [`HikeChart::apply_plan`].
    pub fn reload_input(&mut self) -> ReloadInput {
        self.candidate_input(self.requested_viewport(), self.requested_series().to_vec())
    }

    /// Viewport of the reload in flight, else the applied one.
    fn requested_viewport(&self) -> Viewport {
        self.requested
            .as_ref()
            .map_or(self.viewport, |(viewport, _)| *viewport)
    }

    fn requested_series(&self) -> &[DataSeries] {
        self.requested
            .as_ref()
            .map_or(&self.series, |(_, series)| series)
    }

    fn candidate_input(&mut self, viewport: Viewport, series: Vec<DataSeries>) -> ReloadInput {
        ReloadInput {
            ticket: self.scheduler.begin(),
            viewport,
            series,
            axis: self.config.axis.clone(),
            chart: self.config.chart,
        }
    }

    /// Submits a reload to the executor and applies it if already finished.
    pub fn reload(&mut self) -> ChartResult<()> {
        let input = self.reload_input();
        self.submit(input)
    }

    fn submit(&mut self, input: ReloadInput) -> ChartResult<()> {
        self.requested = Some((input.viewport, input.series.clone()));
        self.pending = Some(self.executor.submit(input));
        self.poll_reload().map(|_| ())
    }

    /// Applies a finished reload. Returns `true` when a new layout was applied.
    pub fn poll_reload(&mut self) -> ChartResult<bool> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(false);
        };
        match pending.try_take() {
            None => {
                self.pending = Some(pending);
                Ok(false)
            }
            Some(result) => {
                self.requested = None;
                Ok(self.apply_plan(result?))
            }
        }
    }

    /// Installs a plan on the owning thread, committing the viewport and
    /// series it was computed from. Stale plans are dropped.
    pub fn apply_plan(&mut self, plan: ReloadPlan) -> bool {
        if !self.scheduler.is_current(plan.ticket) {
            debug!(
                generation = plan.ticket.generation(),
                latest = self.scheduler.latest_generation(),
                "dropping stale reload plan"
            );
            return false;
        }

        self.viewport = plan.viewport;
        self.series.clone_from(&plan.series);

        let frames = plan.frames;
        let tracker_settings = self.config.tracker;

        self.tracker = if plan.placeholder {
            None
        } else {
            match (plan.x_axis.scale(), plan.y_axis.scale()) {
                (Ok(x_scale), Ok(y_scale)) => Some(LineTracker::new(
                    TrackerGeometry {
                        view_height: frames.view_height(),
                        plot_frame: frames.plot_frame,
                        x_scale,
                        y_scale,
                    },
                    plan.polylines.clone(),
                    tracker_settings.intersection_tolerance,
                )),
                _ => None,
            }
        };
        self.presenter = Some(OverlayPresenter::new(
            tracker_settings,
            frames.plot_frame,
            frames.view_height(),
            plan.polylines.len(),
        ));
        self.label_colors = self
            .series
            .iter()
            .map(|series| {
                series
                    .color
                    .with_saturation_scaled(tracker_settings.label_saturation_factor)
            })
            .collect();
        self.overlay = OverlayState::hidden();
        self.last_transitions.clear();

        debug!(
            generation = plan.ticket.generation(),
            placeholder = plan.placeholder,
            series = plan.polylines.len(),
            "reload applied"
        );
        self.plan = Some(plan);
        true
    }

    #[must_use]
    pub fn is_reload_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `true` while degenerate data is replaced by the placeholder chart.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.plan.as_ref().is_some_and(|plan| plan.placeholder)
    }

    pub fn set_interaction_sink(&mut self, sink: Box<dyn InteractionSink<R>>) {
        self.sink = Some(sink);
    }

    pub fn clear_interaction_sink(&mut self) -> Option<Box<dyn InteractionSink<R>>> {
        self.sink.take()
    }

    #[must_use]
    pub fn has_interaction_sink(&self) -> bool {
        self.sink.is_some()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &HikeChartConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &[DataSeries] {
        &self.series
    }

    #[must_use]
    pub fn frames(&self) -> Option<ChartFrames> {
        self.plan.as_ref().map(|plan| plan.frames)
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<&AxisModel> {
        self.plan.as_ref().map(|plan| &plan.x_axis)
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<&AxisModel> {
        self.plan.as_ref().map(|plan| &plan.y_axis)
    }

    #[must_use]
    pub fn tracker_phase(&self) -> TrackerPhase {
        self.tracker
            .as_ref()
            .map_or(TrackerPhase::Idle, LineTracker::phase)
    }

    /// Intersection tolerance of the active tracker, if one is built.
    #[must_use]
    pub fn tracker_tolerance(&self) -> Option<IntersectionTolerance> {
        self.tracker.as_ref().map(LineTracker::tolerance)
    }

    #[must_use]
    pub fn last_probe(&self) -> Option<&ProbeResult> {
        self.tracker.as_ref().and_then(LineTracker::last_probe)
    }

    #[must_use]
    pub fn overlay_state(&self) -> &OverlayState {
        &self.overlay
    }

    #[must_use]
    pub fn overlay_scene(&self) -> Option<&OverlayScene> {
        self.presenter.as_ref().map(OverlayPresenter::scene)
    }

    /// Transitions produced by the last pointer event.
    #[must_use]
    pub fn last_transitions(&self) -> &[OverlayTransition] {
        &self.last_transitions
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

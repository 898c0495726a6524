use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    AxisModel, AxisOrientation, AxisSettings, DataSeries, DomainPoint, SeriesId, SeriesPolyline,
    Viewport, linear_axis_values, nice_axis_values, project_series,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{ChartFrames, ChartSettings, resolve_chart_frames};

/// Domain points that stand in for degenerate data.
const PLACEHOLDER_POINTS: [DomainPoint; 2] =
    [DomainPoint::new(0.0, 0.0), DomainPoint::new(1000.0, 50.0)];

/// Identity of one reload request. Only the latest ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReloadTicket {
    generation: u64,
}

impl ReloadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Issues reload tickets; a new ticket invalidates every older one.
#[derive(Debug, Default)]
pub struct ReloadScheduler {
    latest: u64,
}

impl ReloadScheduler {
    pub fn begin(&mut self) -> ReloadTicket {
        self.latest += 1;
        debug!(generation = self.latest, "reload issued");
        ReloadTicket {
            generation: self.latest,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: ReloadTicket) -> bool {
        ticket.generation == self.latest
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }
}

/// Owned snapshot of everything a reload needs, safe to move to a worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadInput {
    pub ticket: ReloadTicket,
    pub viewport: Viewport,
    pub series: Vec<DataSeries>,
    pub axis: AxisSettings,
    pub chart: ChartSettings,
}

/// Result of the heavy half of a reload, applied later on the owning thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadPlan {
    pub ticket: ReloadTicket,
    /// Viewport and series the plan was computed from.
    pub viewport: Viewport,
    pub series: Vec<DataSeries>,
    /// Degenerate data was replaced by placeholder axes; no tracker is built.
    pub placeholder: bool,
    pub frames: ChartFrames,
    pub x_axis: AxisModel,
    pub y_axis: AxisModel,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// One polyline per series, in series order.
    pub polylines: Vec<SeriesPolyline>,
    /// Line colors to draw with; fully transparent in placeholder mode.
    pub line_colors: Vec<Color>,
}

/// `true` when the chart cannot show meaningful data: at most two points in
/// total, or every altitude is zero.
#[must_use]
pub fn is_degenerate(series: &[DataSeries]) -> bool {
    let total: usize = series.iter().map(|series| series.points.len()).sum();
    total <= 2
        || series
            .iter()
            .flat_map(|series| series.points.iter())
            .all(|point| point.y == 0.0)
}

/// Formats an axis value without trailing zeros for whole numbers.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Derives axes, frames and screen polylines for a data set. Pure.
pub fn compute_reload_plan(input: &ReloadInput) -> ChartResult<ReloadPlan> {
    for series in &input.series {
        series.validate()?;
    }

    let placeholder = is_degenerate(&input.series);
    let range_points: Vec<DomainPoint> = if placeholder {
        warn!(
            series = input.series.len(),
            "degenerate data, showing placeholder chart"
        );
        PLACEHOLDER_POINTS.to_vec()
    } else {
        input
            .series
            .iter()
            .flat_map(|series| series.points.iter().copied())
            .collect()
    };

    let (x_min, x_max) = min_max(range_points.iter().map(|point| point.x))?;
    let (y_min, y_max) = min_max(range_points.iter().map(|point| point.y))?;

    let chart = &input.chart;
    let x_values = linear_axis_values(x_min, x_max, chart.x_axis_segments);
    let y_values = nice_axis_values(
        y_min,
        y_max,
        chart.y_axis_min_segments,
        chart.y_axis_max_segments,
        true,
    );
    let x_labels: Vec<String> = x_values.iter().copied().map(format_axis_value).collect();
    let y_labels: Vec<String> = y_values.iter().copied().map(format_axis_value).collect();

    let frames = resolve_chart_frames(input.viewport, chart, &x_labels, &y_labels)?;
    let plot = frames.plot_frame;
    let x_axis = AxisModel::new(
        AxisOrientation::Horizontal,
        x_values,
        input.axis.x_title.clone(),
        plot.x,
        plot.max_x(),
    )?;
    let y_axis = AxisModel::new(
        AxisOrientation::Vertical,
        y_values,
        input.axis.y_title.clone(),
        plot.max_y(),
        plot.y,
    )?;

    let polylines = input
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| project_series(SeriesId::new(index), series, &x_axis, &y_axis))
        .collect();
    let line_colors = input
        .series
        .iter()
        .map(|series| {
            if placeholder {
                series.color.with_alpha(0.0)
            } else {
                series.color
            }
        })
        .collect();

    Ok(ReloadPlan {
        ticket: input.ticket,
        viewport: input.viewport,
        series: input.series.clone(),
        placeholder,
        frames,
        x_axis,
        y_axis,
        x_labels,
        y_labels,
        polylines,
        line_colors,
    })
}

fn min_max(values: impl Iterator<Item = f64> + Clone) -> ChartResult<(f64, f64)> {
    let min = values.clone().map(OrderedFloat).min();
    let max = values.map(OrderedFloat).max();
    match (min, max) {
        (Some(min), Some(max)) => Ok((min.0, max.0)),
        _ => Err(ChartError::InvalidData(
            "cannot derive an axis range without points".to_owned(),
        )),
    }
}

enum PendingState {
    Ready(Option<ChartResult<ReloadPlan>>),
    #[cfg(feature = "background-reload")]
    Channel(std::sync::mpsc::Receiver<ChartResult<ReloadPlan>>),
}

/// Handle to a reload plan that may still be computing.
pub struct PendingReload {
    ticket: ReloadTicket,
    state: PendingState,
}

impl PendingReload {
    #[must_use]
    pub fn ready(ticket: ReloadTicket, result: ChartResult<ReloadPlan>) -> Self {
        Self {
            ticket,
            state: PendingState::Ready(Some(result)),
        }
    }

    #[must_use]
    pub fn ticket(&self) -> ReloadTicket {
        self.ticket
    }

    /// Takes the plan if it is available, without blocking.
    pub fn try_take(&mut self) -> Option<ChartResult<ReloadPlan>> {
        match &mut self.state {
            PendingState::Ready(result) => result.take(),
            #[cfg(feature = "background-reload")]
            PendingState::Channel(receiver) => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => Some(Err(
                    ChartError::InvalidData("reload worker stopped without a result".to_owned()),
                )),
            },
        }
    }

    /// Blocks until the plan is available.
    pub fn wait(mut self) -> ChartResult<ReloadPlan> {
        match &mut self.state {
            PendingState::Ready(result) => result.take().unwrap_or_else(|| {
                Err(ChartError::InvalidData(
                    "reload result was already taken".to_owned(),
                ))
            }),
            #[cfg(feature = "background-reload")]
            PendingState::Channel(receiver) => receiver.recv().unwrap_or_else(|_| {
                Err(ChartError::InvalidData(
                    "reload worker stopped without a result".to_owned(),
                ))
            }),
        }
    }
}

impl std::fmt::Debug for PendingReload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReload")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// Where the heavy half of a reload runs.
pub trait ReloadExecutor {
    fn submit(&self, input: ReloadInput) -> PendingReload;
}

/// Computes the plan on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl ReloadExecutor for InlineExecutor {
    fn submit(&self, input: ReloadInput) -> PendingReload {
        PendingReload::ready(input.ticket, compute_reload_plan(&input))
    }
}

/// Computes the plan on the rayon pool and hands it back through a channel.
#[cfg(feature = "background-reload")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RayonExecutor;

#[cfg(feature = "background-reload")]
impl ReloadExecutor for RayonExecutor {
    fn submit(&self, input: ReloadInput) -> PendingReload {
        let ticket = input.ticket;
        let (sender, receiver) = std::sync::mpsc::channel();
        rayon::spawn(move || {
            // The receiver is gone when the chart was dropped.
            let _ = sender.send(compute_reload_plan(&input));
        });
        PendingReload {
            ticket,
            state: PendingState::Channel(receiver),
        }
    }
}

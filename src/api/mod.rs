mod chart;
mod config;
mod interaction_controller;
mod json_contract;
mod layout;
mod reload;
mod render_frame_builder;
mod sink;

pub use chart::HikeChart;
pub use config::{ChartSettings, HikeChartConfig};
pub use json_contract::{HIKE_CHART_CONFIG_JSON_SCHEMA_V1, HikeChartConfigJsonContractV1};
pub use layout::{ChartFrames, resolve_chart_frames};
#[cfg(feature = "background-reload")]
pub use reload::RayonExecutor;
pub use reload::{
    InlineExecutor, PendingReload, ReloadExecutor, ReloadInput, ReloadPlan, ReloadScheduler,
    ReloadTicket, compute_reload_plan, format_axis_value, is_degenerate,
};
pub use sink::InteractionSink;

//! hike-chart: distance/altitude profile charts with a value-tracking overlay.
//!
//! The crate is renderer-agnostic. `HikeChart` derives axes and series
//! polylines from the loaded data, intersects a vertical probe with every
//! series on pointer events, and materializes chart plus overlay into a
//! `RenderFrame` for any `Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod overlay;
pub mod render;
pub mod telemetry;

pub use api::{HikeChart, HikeChartConfig, InteractionSink};
pub use error::{ChartError, ChartResult};

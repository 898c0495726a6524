use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failures reported by chart construction, reloads and rendering.
///
/// Degenerate data is not an error: it switches the chart into placeholder
/// mode instead.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Viewport is empty, or too small to leave a plot area after the insets.
    #[error("viewport {width}x{height} leaves no room for a plot")]
    InvalidViewport { width: u32, height: u32 },

    /// Non-finite coordinates, malformed primitives or unparsable JSON.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Axis values or scale references that cannot map domain to screen.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

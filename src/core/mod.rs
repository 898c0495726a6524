pub mod axis;
pub mod geometry;
pub mod path;
pub mod scale;
pub mod series;
pub mod types;

pub use axis::{AxisModel, AxisOrientation, AxisSettings, linear_axis_values, nice_axis_values};
pub use geometry::{
    IntersectionTolerance, Segment, segment_intersection, segment_intersection_with_tolerance,
};
pub use path::{CubicTension, area_fill_polygon, smooth_polyline};
pub use scale::AxisScale;
pub use series::{DataSeries, SeriesId, SeriesPolyline, project_series};
pub use types::{DomainPoint, Rect, ScreenPoint, Viewport};

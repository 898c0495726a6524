use serde::{Deserialize, Serialize};

use crate::core::geometry::Segment;
use crate::core::{AxisModel, DomainPoint, ScreenPoint};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Stable identity of a series inside one loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(usize);

impl SeriesId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One labelled distance/altitude profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub label: String,
    pub color: Color,
    pub points: Vec<DomainPoint>,
}

impl DataSeries {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color, points: Vec<DomainPoint>) -> Self {
        Self {
            label: label.into(),
            color,
            points,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.color.validate()?;
        if let Some(index) = self.points.iter().position(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has a non-finite point at index {index}",
                self.label
            )));
        }
        Ok(())
    }

    /// `true` when distances never decrease along the series.
    #[must_use]
    pub fn is_x_monotonic(&self) -> bool {
        self.points.windows(2).all(|pair| pair[0].x <= pair[1].x)
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Screen-space projection of one series, ready for hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPolyline {
    pub series_id: SeriesId,
    pub points: Vec<ScreenPoint>,
    domain_x: Vec<f64>,
}

impl SeriesPolyline {
    #[must_use]
    pub fn empty(series_id: SeriesId) -> Self {
        Self {
            series_id,
            points: Vec::new(),
            domain_x: Vec::new(),
        }
    }

    /// Consecutive segments whose domain distance does not decrease.
    ///
    /// Backwards pairs are skipped rather than tested.
    pub fn forward_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .zip(self.domain_x.windows(2))
            .filter(|(_, xs)| xs[0] <= xs[1])
            .map(|(pair, _)| Segment::new(pair[0], pair[1]))
    }
}

/// Projects domain points into chart-view pixel space through both axes.
#[must_use]
pub fn project_series(
    series_id: SeriesId,
    series: &DataSeries,
    x_axis: &AxisModel,
    y_axis: &AxisModel,
) -> SeriesPolyline {
    let mut points = Vec::with_capacity(series.points.len());
    let mut domain_x = Vec::with_capacity(series.points.len());
    for point in &series.points {
        points.push(ScreenPoint::new(
            x_axis.screen_loc_for_scalar(point.x),
            y_axis.screen_loc_for_scalar(point.y),
        ));
        domain_x.push(point.x);
    }

    SeriesPolyline {
        series_id,
        points,
        domain_x,
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSeries, SeriesId, SeriesPolyline, project_series};
    use crate::core::{AxisModel, AxisOrientation, DomainPoint};
    use crate::render::Color;

    fn axes() -> (AxisModel, AxisModel) {
        let x = AxisModel::new(AxisOrientation::Horizontal, vec![0.0, 100.0], "x", 0.0, 200.0)
            .expect("x axis");
        let y = AxisModel::new(AxisOrientation::Vertical, vec![0.0, 100.0], "y", 100.0, 0.0)
            .expect("y axis");
        (x, y)
    }

    #[test]
    fn projection_keeps_one_screen_point_per_domain_point() {
        let (x, y) = axes();
        let series = DataSeries::new(
            "track",
            Color::rgb(1.0, 0.0, 0.0),
            vec![DomainPoint::new(0.0, 0.0), DomainPoint::new(50.0, 100.0)],
        );
        let polyline = project_series(SeriesId::new(0), &series, &x, &y);
        assert_eq!(polyline.points.len(), 2);
        assert_eq!(polyline.points[1].x, 100.0);
        assert_eq!(polyline.points[1].y, 0.0);
    }

    #[test]
    fn backwards_pairs_are_not_offered_as_segments() {
        let (x, y) = axes();
        let series = DataSeries::new(
            "loop",
            Color::rgb(0.0, 0.0, 1.0),
            vec![
                DomainPoint::new(0.0, 10.0),
                DomainPoint::new(40.0, 20.0),
                DomainPoint::new(20.0, 30.0),
                DomainPoint::new(60.0, 40.0),
            ],
        );
        assert!(!series.is_x_monotonic());
        let polyline = project_series(SeriesId::new(3), &series, &x, &y);
        assert_eq!(polyline.forward_segments().count(), 2);
    }

    #[test]
    fn short_series_yield_no_segments() {
        assert_eq!(SeriesPolyline::empty(SeriesId::new(0)).forward_segments().count(), 0);
        let single = DataSeries::new("dot", Color::rgb(0.0, 0.0, 0.0), vec![DomainPoint::new(1.0, 1.0)]);
        assert_eq!(single.segment_count(), 0);
    }

    #[test]
    fn non_finite_points_fail_validation() {
        let series = DataSeries::new(
            "bad",
            Color::rgb(0.0, 0.0, 0.0),
            vec![DomainPoint::new(0.0, f64::NAN)],
        );
        assert!(series.validate().is_err());
    }
}

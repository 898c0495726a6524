use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Curve tension at each end of a cubic segment; `0.0` draws straight lines.
///
/// Values above `0.3` overshoot visibly on steep profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicTension {
    pub start: f64,
    pub end: f64,
}

impl CubicTension {
    pub const STRAIGHT: Self = Self {
        start: 0.0,
        end: 0.0,
    };

    #[must_use]
    pub const fn uniform(tension: f64) -> Self {
        Self {
            start: tension,
            end: tension,
        }
    }
}

impl Default for CubicTension {
    fn default() -> Self {
        Self::uniform(0.3)
    }
}

/// Smooths a screen polyline with cubic Bézier segments and flattens it.
///
/// Control points keep the x thirds of each segment, so the output never
/// moves backwards in x when the input does not. Tension drops to zero on
/// the first and last segment, and where a neighbour continues the same slope.
#[must_use]
pub fn smooth_polyline(
    points: &[ScreenPoint],
    tension: CubicTension,
    steps_per_segment: usize,
) -> Vec<ScreenPoint> {
    if points.len() < 3 || steps_per_segment < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * steps_per_segment + 1);
    out.push(points[0]);

    for index in 0..points.len() - 1 {
        let p1 = points[index];
        let p2 = points[index + 1];

        let (p0, mut tension_start) = if index > 0 {
            (points[index - 1], tension.start)
        } else {
            (p1, 0.0)
        };
        if index > 0 && p2.y - p1.y == p2.y - p0.y {
            tension_start = 0.0;
        }

        let (p3, mut tension_end) = if index + 2 < points.len() {
            (points[index + 2], tension.end)
        } else {
            (p2, 0.0)
        };
        if index + 2 < points.len() && p3.y - p2.y == p2.y - p1.y {
            tension_end = 0.0;
        }

        let control1 = ScreenPoint::new(
            p1.x + (p2.x - p1.x) / 3.0,
            p1.y - (p1.y - p2.y) / 3.0 - (p0.y - p1.y) * tension_start,
        );
        let control2 = ScreenPoint::new(
            p1.x + 2.0 * (p2.x - p1.x) / 3.0,
            p1.y - 2.0 * (p1.y - p2.y) / 3.0 + (p2.y - p3.y) * tension_end,
        );

        for step in 1..=steps_per_segment {
            let t = step as f64 / steps_per_segment as f64;
            out.push(cubic_point(p1, control1, control2, p2, t));
        }
    }

    out
}

/// Closed fill polygon between a line and a horizontal baseline.
///
/// The first baseline vertex is repeated at the end so consumers can fill
/// without implicit closure rules.
#[must_use]
pub fn area_fill_polygon(line: &[ScreenPoint], baseline_y: f64) -> Vec<ScreenPoint> {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return Vec::new();
    };

    let mut polygon = Vec::with_capacity(line.len() + 3);
    polygon.push(ScreenPoint::new(first.x, baseline_y));
    polygon.extend_from_slice(line);
    polygon.push(ScreenPoint::new(last.x, baseline_y));
    polygon.push(ScreenPoint::new(first.x, baseline_y));
    polygon
}

fn cubic_point(
    p0: ScreenPoint,
    c1: ScreenPoint,
    c2: ScreenPoint,
    p1: ScreenPoint,
    t: f64,
) -> ScreenPoint {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    ScreenPoint::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

#[cfg(test)]
mod tests {
    use super::{CubicTension, area_fill_polygon, smooth_polyline};
    use crate::core::ScreenPoint;

    fn profile() -> Vec<ScreenPoint> {
        vec![
            ScreenPoint::new(0.0, 50.0),
            ScreenPoint::new(10.0, 40.0),
            ScreenPoint::new(20.0, 55.0),
            ScreenPoint::new(30.0, 45.0),
        ]
    }

    #[test]
    fn smoothing_passes_through_original_vertices() {
        let input = profile();
        let smoothed = smooth_polyline(&input, CubicTension::default(), 8);
        assert_eq!(smoothed.len(), 3 * 8 + 1);
        for (index, vertex) in input.iter().enumerate() {
            let out = smoothed[index * 8];
            assert!((out.x - vertex.x).abs() < 1e-9);
            assert!((out.y - vertex.y).abs() < 1e-9);
        }
    }

    #[test]
    fn smoothing_keeps_x_monotonic() {
        let smoothed = smooth_polyline(&profile(), CubicTension::uniform(0.3), 12);
        assert!(smoothed.windows(2).all(|pair| pair[0].x <= pair[1].x));
    }

    #[test]
    fn straight_tension_stays_on_the_polyline() {
        let smoothed = smooth_polyline(&profile(), CubicTension::STRAIGHT, 4);
        // Midpoint of the first segment.
        assert!((smoothed[2].x - 5.0).abs() < 1e-9);
        assert!((smoothed[2].y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn area_polygon_is_explicitly_closed() {
        let polygon = area_fill_polygon(&profile(), 100.0);
        assert_eq!(polygon.len(), 4 + 3);
        assert_eq!(polygon.first(), polygon.last());
        assert!(area_fill_polygon(&[], 100.0).is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Straight segment between two pixel-space points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

impl Segment {
    #[must_use]
    pub const fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    /// Vertical segment at `x` spanning `top..=bottom`.
    #[must_use]
    pub const fn vertical(x: f64, top: f64, bottom: f64) -> Self {
        Self {
            start: ScreenPoint::new(x, top),
            end: ScreenPoint::new(x, bottom),
        }
    }

    #[must_use]
    pub fn direction(self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }
}

/// Slack applied by [`segment_intersection_with_tolerance`].
///
/// `epsilon` is relative: segments whose directions have `|sin θ| <= epsilon`
/// count as parallel, and both segment parameters may overshoot `[0, 1]` by it.
/// `epsilon == 0` is the exact test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionTolerance {
    pub epsilon: f64,
}

impl IntersectionTolerance {
    pub const EXACT: Self = Self { epsilon: 0.0 };

    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        if epsilon.is_finite() && epsilon > 0.0 {
            Self { epsilon }
        } else {
            Self::EXACT
        }
    }

    #[must_use]
    pub fn is_exact(self) -> bool {
        self.epsilon == 0.0
    }
}

impl Default for IntersectionTolerance {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Returns the crossing point of two segments, or `None`.
///
/// Parallel and collinear segments (zero cross product) never intersect,
/// even when they overlap. Endpoints are inclusive.
#[must_use]
pub fn segment_intersection(first: Segment, second: Segment) -> Option<ScreenPoint> {
    segment_intersection_with_tolerance(first, second, IntersectionTolerance::EXACT)
}

#[must_use]
pub fn segment_intersection_with_tolerance(
    first: Segment,
    second: Segment,
    tolerance: IntersectionTolerance,
) -> Option<ScreenPoint> {
    let (d1x, d1y) = first.direction();
    let (d2x, d2y) = second.direction();

    let mut denom = d1x * d2y - d2x * d1y;
    let parallel_limit = tolerance.epsilon * d1x.hypot(d1y) * d2x.hypot(d2y);
    if !denom.is_finite() || denom.abs() <= parallel_limit {
        return None;
    }

    let s02x = first.start.x - second.start.x;
    let s02y = first.start.y - second.start.y;
    // `s_numer` parametrises `second`, `t_numer` parametrises `first`.
    let mut s_numer = d1x * s02y - d1y * s02x;
    let mut t_numer = d2x * s02y - d2y * s02x;

    if denom < 0.0 {
        denom = -denom;
        s_numer = -s_numer;
        t_numer = -t_numer;
    }

    let slack = tolerance.epsilon * denom;
    let within = |numer: f64| numer >= -slack && numer <= denom + slack;
    if !within(s_numer) || !within(t_numer) {
        return None;
    }

    let t = t_numer / denom;
    Some(ScreenPoint::new(first.start.x + t * d1x, first.start.y + t * d1y))
}

use serde::{Deserialize, Serialize};

use crate::core::AxisScale;
use crate::error::{ChartError, ChartResult};

/// Titles and units shown on the axes and in the tracker readouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub x_title: String,
    pub y_title: String,
    pub x_short_title: String,
    pub y_short_title: String,
    pub x_unit: String,
    pub y_unit: String,
}

impl AxisSettings {
    #[must_use]
    pub fn new(
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        x_short_title: impl Into<String>,
        y_short_title: impl Into<String>,
        x_unit: impl Into<String>,
        y_unit: impl Into<String>,
    ) -> Self {
        Self {
            x_title: x_title.into(),
            y_title: y_title.into(),
            x_short_title: x_short_title.into(),
            y_short_title: y_short_title.into(),
            x_unit: x_unit.into(),
            y_unit: y_unit.into(),
        }
    }
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self::new("Distance", "Altitude", "Dist", "Alt", "m", "m")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// Values grow left to right.
    Horizontal,
    /// Values grow bottom to top.
    Vertical,
}

/// Ordered axis values plus the pixel span they are laid out on.
///
/// The first value sits at `screen_start` and the last at `screen_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    orientation: AxisOrientation,
    values: Vec<f64>,
    title: String,
    screen_start: f64,
    screen_end: f64,
}

impl AxisModel {
    pub fn new(
        orientation: AxisOrientation,
        values: Vec<f64>,
        title: impl Into<String>,
        screen_start: f64,
        screen_end: f64,
    ) -> ChartResult<Self> {
        if values.len() < 2 {
            return Err(ChartError::InvalidAxis(
                "axis needs at least two values".to_owned(),
            ));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidAxis(
                "axis values must be finite".to_owned(),
            ));
        }
        if values.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::InvalidAxis(
                "axis values must be strictly increasing".to_owned(),
            ));
        }
        if !screen_start.is_finite() || !screen_end.is_finite() || screen_start == screen_end {
            return Err(ChartError::InvalidAxis(
                "axis screen span must be finite and non-empty".to_owned(),
            ));
        }

        Ok(Self {
            orientation,
            values,
            title: title.into(),
            screen_start,
            screen_end,
        })
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    #[must_use]
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    #[must_use]
    pub fn screen_span(&self) -> (f64, f64) {
        (self.screen_start, self.screen_end)
    }

    #[must_use]
    pub fn screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        let first = self.first();
        let ratio = (scalar - first) / (self.last() - first);
        self.screen_start + ratio * (self.screen_end - self.screen_start)
    }

    /// Scale derived from the first two axis values and their screen locations.
    pub fn scale(&self) -> ChartResult<AxisScale> {
        let s1 = self.values[0];
        let s2 = self.values[1];
        AxisScale::new(
            (s1, self.screen_loc_for_scalar(s1)),
            (s2, self.screen_loc_for_scalar(s2)),
        )
    }
}

/// Evenly spaced values from `min` to `max` inclusive.
///
/// A zero-width range is widened by one unit so the axis stays usable.
#[must_use]
pub fn linear_axis_values(min: f64, max: f64, segments: usize) -> Vec<f64> {
    let segments = segments.max(1);
    let (min, max) = if max > min { (min, max) } else { (min, min + 1.0) };
    let mut step = (max - min) / segments as f64;
    if !step.is_finite() {
        // span overflows f64; divide before subtracting
        step = max / segments as f64 - min / segments as f64;
    }
    (0..=segments)
        .map(|index| {
            if index == segments {
                max
            } else {
                min + step * index as f64
            }
        })
        .collect()
}

/// Rounded tick values covering `[min, max]` with a segment count in
/// `[min_segments, max_segments]` when a round step allows it.
///
/// With `add_padding_segment_if_edge`, an extra segment is added on each side
/// where the data touches the first or last tick.
#[must_use]
pub fn nice_axis_values(
    min: f64,
    max: f64,
    min_segments: usize,
    max_segments: usize,
    add_padding_segment_if_edge: bool,
) -> Vec<f64> {
    let min_segments = min_segments.max(1);
    let max_segments = max_segments.max(min_segments);
    let (min, max) = widen_flat_range(min, max);
    let span = max - min;

    let mut chosen: Option<(f64, f64, usize)> = None;
    for segments in min_segments..=max_segments {
        let step = nice_step(span / segments as f64);
        let first = (min / step).floor() * step;
        let last = (max / step).ceil() * step;
        let count = ((last - first) / step).round();
        if !count.is_finite() || count > (max_segments + 2) as f64 {
            continue;
        }
        let count = count as usize;
        chosen = Some((step, first, count));
        if (min_segments..=max_segments).contains(&count) {
            break;
        }
    }

    let Some((step, mut first, mut count)) = chosen else {
        return linear_axis_values(min, max, min_segments);
    };

    if add_padding_segment_if_edge {
        if first == min {
            first -= step;
            count += 1;
        }
        if first + step * count as f64 == max {
            count += 1;
        }
    }

    (0..=count).map(|index| first + step * index as f64).collect()
}

fn widen_flat_range(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        return (min, max);
    }
    let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
    (min - pad, max + pad)
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let base = 10f64.powf(raw.log10().floor());
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear domain <-> screen mapping defined by two reference pairs.
///
/// Values outside the reference span extrapolate linearly; there is no clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    domain0: f64,
    screen0: f64,
    domain1: f64,
    screen1: f64,
}

impl AxisScale {
    /// Builds a scale from `(domain, screen)` reference pairs.
    pub fn new(reference0: (f64, f64), reference1: (f64, f64)) -> ChartResult<Self> {
        let (domain0, screen0) = reference0;
        let (domain1, screen1) = reference1;
        if !domain0.is_finite() || !screen0.is_finite() || !domain1.is_finite() || !screen1.is_finite()
        {
            return Err(ChartError::InvalidAxis(
                "scale reference points must be finite".to_owned(),
            ));
        }
        if domain0 == domain1 {
            return Err(ChartError::InvalidAxis(
                "scale reference domain values must differ".to_owned(),
            ));
        }
        if screen0 == screen1 {
            return Err(ChartError::InvalidAxis(
                "scale reference screen locations must differ".to_owned(),
            ));
        }

        Ok(Self {
            domain0,
            screen0,
            domain1,
            screen1,
        })
    }

    /// Maps the domain span `[domain_start, domain_end]` onto `[screen_start, screen_end]`.
    pub fn spanning(
        domain_start: f64,
        domain_end: f64,
        screen_start: f64,
        screen_end: f64,
    ) -> ChartResult<Self> {
        Self::new((domain_start, screen_start), (domain_end, screen_end))
    }

    #[must_use]
    pub fn references(self) -> ((f64, f64), (f64, f64)) {
        ((self.domain0, self.screen0), (self.domain1, self.screen1))
    }

    /// Domain units per screen pixel (signed).
    #[must_use]
    pub fn domain_per_pixel(self) -> f64 {
        (self.domain1 - self.domain0) / (self.screen1 - self.screen0)
    }

    #[must_use]
    pub fn to_domain(self, screen: f64) -> f64 {
        (screen - self.screen0) * self.domain_per_pixel() + self.domain0
    }

    #[must_use]
    pub fn to_screen(self, domain: f64) -> f64 {
        (domain - self.domain0) * (self.screen1 - self.screen0) / (self.domain1 - self.domain0)
            + self.screen0
    }
}

#[cfg(test)]
mod tests {
    use super::AxisScale;

    #[test]
    fn inverted_vertical_axis_maps_higher_values_upwards() {
        let scale = AxisScale::spanning(700.0, 900.0, 400.0, 0.0).expect("scale");
        assert_eq!(scale.to_screen(900.0), 0.0);
        assert_eq!(scale.to_screen(700.0), 400.0);
        assert_eq!(scale.to_domain(200.0), 800.0);
    }

    #[test]
    fn extrapolates_beyond_reference_span() {
        let scale = AxisScale::spanning(0.0, 100.0, 10.0, 110.0).expect("scale");
        assert_eq!(scale.to_domain(0.0), -10.0);
        assert_eq!(scale.to_domain(210.0), 200.0);
    }

    #[test]
    fn degenerate_references_are_rejected() {
        assert!(AxisScale::spanning(1.0, 1.0, 0.0, 10.0).is_err());
        assert!(AxisScale::spanning(0.0, 1.0, 5.0, 5.0).is_err());
        assert!(AxisScale::spanning(0.0, f64::NAN, 0.0, 1.0).is_err());
    }
}

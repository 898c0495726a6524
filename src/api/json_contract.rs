use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::HikeChartConfig;

pub const HIKE_CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikeChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: HikeChartConfig,
}

impl HikeChartConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = HikeChartConfigJsonContractV1 {
            schema_version: HIKE_CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract payload, then
    /// validates it.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;

        let config = if value.get("schema_version").is_some() {
            let payload: HikeChartConfigJsonContractV1 = serde_json::from_value(value)
                .map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse config contract: {e}"))
                })?;
            if payload.schema_version != HIKE_CHART_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse config json payload: {e}"))
            })?
        };

        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::HikeChartConfig;
    use crate::core::AxisSettings;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = HikeChartConfig::from_json_str(r#"{ "chart": { "line_width": 2.0 } }"#)
            .expect("partial config");
        assert_eq!(config.chart.line_width, 2.0);
        assert_eq!(config.chart.chart_top_offset, 70.0);
        assert_eq!(config.axis, AxisSettings::default());
    }

    #[test]
    fn contract_payload_round_trips() {
        let config = HikeChartConfig::regular(AxisSettings::new(
            "Distance", "Altitude", "D", "A", "km", "m",
        ));
        let json = config.to_json_contract_v1_pretty().expect("serialize");
        assert_eq!(HikeChartConfig::from_json_str(&json).expect("parse"), config);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let err = HikeChartConfig::from_json_str(r#"{ "schema_version": 9, "config": {} }"#)
            .expect_err("schema");
        assert!(err.to_string().contains("schema version"));
    }

    #[test]
    fn invalid_values_fail_validation() {
        assert!(HikeChartConfig::from_json_str(r#"{ "tracker": { "thumb_size": -1.0 } }"#).is_err());
    }

    #[test]
    fn negative_intersection_tolerance_is_rejected() {
        let json = r#"{ "tracker": { "intersection_tolerance": { "epsilon": -0.5 } } }"#;
        assert!(HikeChartConfig::from_json_str(json).is_err());

        let json = r#"{ "tracker": { "intersection_tolerance": { "epsilon": 0.001 } } }"#;
        let config = HikeChartConfig::from_json_str(json).expect("tolerant config");
        assert_eq!(config.tracker.intersection_tolerance.epsilon, 0.001);
    }
}

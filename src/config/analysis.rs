use super::traits::ConfigSection;
use crate::data::ConsumptionKind;
use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};

pub const MAX_TREND_DEGREE: usize = 6;
pub const MAX_RANGE_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub default_kind: ConsumptionKind,
    pub trend_degree: usize,
    pub trend_points: usize,
    /// Length of the initial date range, counted back from the last loaded date
    pub default_range_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_kind: ConsumptionKind::Electricity,
            trend_degree: 1,
            trend_points: 100,
            default_range_days: 30,
        }
    }
}

impl ConfigSection for AnalysisConfig {
    fn section_name() -> &'static str {
        "analysis"
    }

    fn validate(&self) -> Result<(), AnalyzerError> {
        if self.trend_degree == 0 || self.trend_degree > MAX_TREND_DEGREE {
            return Err(AnalyzerError::Configuration(format!(
                "Trend degree must be between 1 and {}",
                MAX_TREND_DEGREE
            )));
        }
        if self.trend_points < 2 {
            return Err(AnalyzerError::Configuration(
                "Trend curve needs at least 2 points".to_string()
            ));
        }
        if self.default_range_days < 1 || self.default_range_days > MAX_RANGE_DAYS {
            return Err(AnalyzerError::Configuration(format!(
                "Default range must cover between 1 and {} days",
                MAX_RANGE_DAYS
            )));
        }
        Ok(())
    }
}

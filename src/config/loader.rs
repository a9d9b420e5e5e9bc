use super::traits::ConfigSection;
use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Rows inspected when guessing column roles
    pub sample_rows: usize,
    /// Non-empty values probed per column when scanning for dates
    pub date_probe_samples: usize,
    pub ignore_flag_column: String,
    pub ignore_flag_value: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sample_rows: 1000,
            date_probe_samples: 5,
            ignore_flag_column: "flag_ignore".to_string(),
            ignore_flag_value: "oui".to_string(),
        }
    }
}

impl ConfigSection for LoaderConfig {
    fn section_name() -> &'static str {
        "loader"
    }

    fn validate(&self) -> Result<(), AnalyzerError> {
        if self.sample_rows == 0 {
            return Err(AnalyzerError::Configuration(
                "Sample rows must be positive".to_string()
            ));
        }
        if self.date_probe_samples == 0 {
            return Err(AnalyzerError::Configuration(
                "Date probe samples must be positive".to_string()
            ));
        }
        if self.ignore_flag_column.is_empty() {
            return Err(AnalyzerError::Configuration(
                "Ignore flag column name cannot be empty".to_string()
            ));
        }
        Ok(())
    }
}

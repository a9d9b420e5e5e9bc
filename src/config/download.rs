use super::traits::ConfigSection;
use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Direct CSV export of the ODRE daily consumption dataset
    pub odre_export_url: String,
    pub timeout_secs: u64,
    /// When set, every download is also copied here
    pub backup_dir: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            odre_export_url: "https://odre.opendatasoft.com/api/explore/v2.1/catalog/datasets/consommation-quotidienne-brute/exports/csv".to_string(),
            timeout_secs: 60,
            backup_dir: None,
        }
    }
}

impl ConfigSection for DownloadConfig {
    fn section_name() -> &'static str {
        "download"
    }

    fn validate(&self) -> Result<(), AnalyzerError> {
        if !self.odre_export_url.starts_with("http://") && !self.odre_export_url.starts_with("https://") {
            return Err(AnalyzerError::Configuration(
                "ODRE export URL must be an http(s) URL".to_string()
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AnalyzerError::Configuration(
                "Download timeout must be positive".to_string()
            ));
        }
        Ok(())
    }
}

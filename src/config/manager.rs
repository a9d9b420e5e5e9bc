use super::{
    analysis::AnalysisConfig,
    download::DownloadConfig,
    loader::LoaderConfig,
    traits::ConfigSection,
};
use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

pub const DEFAULT_CONFIG_FILE: &str = "energy-analyzer.toml";
pub const ENV_PREFIX: &str = "ENERGY_ANALYZER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub loader: LoaderConfig,
    pub analysis: AnalysisConfig,
    pub download: DownloadConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        self.loader.validate()?;
        self.analysis.validate()?;
        self.download.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer an optional file and `ENERGY_ANALYZER__SECTION__KEY` variables over the defaults.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalyzerError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to load config: {}", e)))?;

        config.validate()?;

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalyzerError> {
        let toml_str = {
            let config = self.read_lock()?;
            toml::to_string_pretty(&*config)
                .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize: {}", e)))?
        };

        std::fs::write(path, toml_str)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .map(|config| config.clone())
            .unwrap_or_default()
    }

    pub fn update<F>(&self, f: F) -> Result<(), AnalyzerError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write_lock()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, AppConfig>, AnalyzerError> {
        self.config
            .read()
            .map_err(|_| AnalyzerError::Configuration("Config lock poisoned".to_string()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, AnalyzerError> {
        self.config
            .write()
            .map_err(|_| AnalyzerError::Configuration("Config lock poisoned".to_string()))
    }
}

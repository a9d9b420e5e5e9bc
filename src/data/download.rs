use crate::config::DownloadConfig;
use crate::error::{AnalyzerError, Result};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;

const ODRE_HOST: &str = "opendatasoft.com";
const ODRE_EXPLORE_PATH: &str = "explore/dataset/consommation-quotidienne-brute";

/// Rewrite an ODRE dataset page URL to the direct CSV export; other URLs pass through.
pub fn resolve_download_url(url: &str, config: &DownloadConfig) -> String {
    let url = url.trim();
    if url.contains(ODRE_HOST) && !url.ends_with(".csv") && url.contains(ODRE_EXPLORE_PATH) {
        log::info!(
            "Converting OpenData exploration URL to direct download URL: {}",
            config.odre_export_url
        );
        return config.odre_export_url.clone();
    }
    url.to_string()
}

/// Fetch the resource behind `url`. Blocks until the body is fully read.
pub fn download(url: &str, config: &DownloadConfig) -> Result<Vec<u8>> {
    let url = resolve_download_url(url, config);
    log::info!("Downloading data from {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let response = client
        .get(url.as_str())
        .send()?
        .error_for_status()
        .map_err(|e| AnalyzerError::Download(format!("{}: {}", url, e)))?;
    let bytes = response.bytes()?.to_vec();
    log::info!("Downloaded {:.2} KB of data", bytes.len() as f64 / 1024.0);
    Ok(bytes)
}

/// Store downloaded bytes as `odre_data_YYYYMMDD_HHMMSS.csv` under `dir`.
pub fn write_backup(dir: &std::path::Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let name = format!(
        "odre_data_{}.csv",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

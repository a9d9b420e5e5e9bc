use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid file format: {0}")]
    Format(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("No {0} consumption data available")]
    NoConsumptionData(String),

    #[error("No data loaded")]
    NoDataLoaded,

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Trend error: {0}")]
    Trend(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

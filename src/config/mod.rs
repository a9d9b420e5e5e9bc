pub mod traits;
pub mod loader;
pub mod analysis;
pub mod download;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use loader::LoaderConfig;
pub use analysis::AnalysisConfig;
pub use download::DownloadConfig;
pub use traits::ConfigSection;

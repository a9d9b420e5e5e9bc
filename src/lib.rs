pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod session;
pub mod ui;

pub use error::{AnalyzerError, Result};
pub use session::{DataSource, Session};

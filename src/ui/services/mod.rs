pub mod analysis_runner;
pub mod data_loader;

pub use analysis_runner::{AnalysisReport, AnalysisRunner, PlotData};
pub use data_loader::DataLoader;

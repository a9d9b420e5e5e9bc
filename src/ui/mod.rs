mod app;
mod panels;
mod services;
mod state;
mod widgets;

pub use app::EnergyAnalyzerApp;
pub use services::{AnalysisReport, AnalysisRunner, DataLoader, PlotData};
pub use state::{AppState, PlotType};

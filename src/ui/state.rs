use crate::config::AppConfig;
use crate::data::ConsumptionKind;
use crate::engines::analysis::Subtable;
use crate::session::Session;
use super::services::AnalysisReport;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    Line,
    Bar,
}

/// Central application state for the UI
pub struct AppState {
    // Data
    pub session: Session,
    pub url_input: String,

    // Query Parameters
    pub start_date: String,
    pub end_date: String,
    pub kind: ConsumptionKind,
    pub threshold: String,

    // Plot Options
    pub plot_type: PlotType,
    pub show_trend: bool,
    pub trend_degree: usize,

    // Results
    pub report: Option<AnalysisReport>,
    pub period: Option<Subtable>,
    pub trend: Option<Vec<(DateTime<Utc>, f64)>>,

    pub status_message: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let kind = config.analysis.default_kind;
        let trend_degree = config.analysis.trend_degree;
        Self {
            session: Session::new(config),
            url_input: String::new(),

            start_date: String::new(),
            end_date: String::new(),
            kind,
            threshold: String::new(),

            plot_type: PlotType::Line,
            show_trend: false,
            trend_degree,

            report: None,
            period: None,
            trend: None,

            status_message: "Ready".to_string(),
        }
    }

    /// Reset results and pick a default date range after a successful load
    pub fn on_data_loaded(&mut self) {
        self.report = None;
        self.period = None;
        self.trend = None;
        if let Some((start, end)) = self.session.default_range() {
            self.start_date = start.format("%Y-%m-%d").to_string();
            self.end_date = end.format("%Y-%m-%d").to_string();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

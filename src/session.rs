use crate::config::{AppConfig, LoaderConfig};
use crate::data::{
    download, source, ColumnClassifier, ConsumptionKind, LoadObserver, LogObserver, NormalizedTable,
    TableNormalizer,
};
use crate::engines::analysis::{Analyzer, DateRange, QueryOp, QueryResult, Subtable};
use crate::engines::trend::TrendCurve;
use crate::error::{AnalyzerError, Result};
use chrono::{NaiveDate, TimeDelta};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CSV bytes → normalized table. Pure apart from the observer callbacks.
pub fn load_csv(
    bytes: &[u8],
    config: &LoaderConfig,
    observer: &dyn LoadObserver,
) -> Result<NormalizedTable> {
    let raw = source::read_raw_table(bytes, observer)?;
    let classification = ColumnClassifier::classify(&raw, config, observer);
    TableNormalizer::normalize(&raw, &classification, config, observer)
}

/// Where the current table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
    Memory,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Memory => f.write_str("<memory>"),
        }
    }
}

/// Owns the single loaded table. A load replaces it wholesale or leaves it untouched.
pub struct Session {
    config: AppConfig,
    observer: Arc<dyn LoadObserver>,
    table: Option<NormalizedTable>,
    source: Option<DataSource>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    pub fn with_observer(config: AppConfig, observer: Arc<dyn LoadObserver>) -> Self {
        Self {
            config,
            observer,
            table: None,
            source: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AppConfig) {
        self.config = config;
    }

    pub fn table(&self) -> Option<&NormalizedTable> {
        self.table.as_ref()
    }

    pub fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.table.is_some()
    }

    pub fn load_csv(&mut self, bytes: &[u8]) -> Result<&NormalizedTable> {
        self.load_bytes(bytes, DataSource::Memory)
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&NormalizedTable> {
        let path = path.as_ref();
        log::info!("Loading data from file: {}", path.display());
        let bytes = std::fs::read(path)?;
        self.load_bytes(&bytes, DataSource::File(path.to_path_buf()))
    }

    pub fn load_from_url(&mut self, url: &str) -> Result<&NormalizedTable> {
        let bytes = download::download(url, &self.config.download)?;
        self.load_downloaded(&bytes, url.trim())
    }

    /// Only data that loaded cleanly is backed up. A failed backup is logged, never returned.
    fn load_downloaded(&mut self, bytes: &[u8], url: &str) -> Result<&NormalizedTable> {
        let backup_dir = self.config.download.backup_dir.clone();
        let table = self.load_bytes(bytes, DataSource::Url(url.to_string()))?;
        if let Some(dir) = backup_dir {
            match download::write_backup(&dir, bytes) {
                Ok(path) => log::info!("Saved a backup of the data to {}", path.display()),
                Err(e) => log::warn!("Could not write backup: {}", e),
            }
        }
        Ok(table)
    }

    fn load_bytes(&mut self, bytes: &[u8], source: DataSource) -> Result<&NormalizedTable> {
        let table = match load_csv(bytes, &self.config.loader, self.observer.as_ref()) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Error loading data from {}: {}", source, e);
                return Err(e);
            }
        };
        log::info!("Data loaded successfully from {}", source);
        self.source = Some(source);
        Ok(&*self.table.insert(table))
    }

    pub fn analyzer(&self) -> Result<Analyzer<'_>> {
        self.table
            .as_ref()
            .map(Analyzer::new)
            .ok_or(AnalyzerError::NoDataLoaded)
    }

    /// Validate the range text, then run one query against the current table.
    pub fn query(
        &self,
        start_text: &str,
        end_text: &str,
        kind: ConsumptionKind,
        op: QueryOp,
    ) -> Result<QueryResult> {
        let analyzer = self.analyzer()?;
        let range = DateRange::parse(start_text, end_text)?;
        analyzer.run(&range, kind, op)
    }

    /// Period data with a fitted trend, `None` when the period is empty.
    pub fn trend_for_period(
        &self,
        start_text: &str,
        end_text: &str,
        kind: ConsumptionKind,
        degree: usize,
    ) -> Result<Option<(Subtable, TrendCurve)>> {
        match self.query(start_text, end_text, kind, QueryOp::Extract)? {
            QueryResult::Subtable(subtable) => {
                let curve = TrendCurve::fit(&subtable.points, degree)?;
                Ok(Some((subtable, curve)))
            }
            _ => Ok(None),
        }
    }

    /// The configured number of days ending at the last loaded date
    pub fn default_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (first, last) = self.table.as_ref()?.date_span()?;
        let days = self.config.analysis.default_range_days;
        let start = TimeDelta::try_days(days.saturating_sub(1))
            .and_then(|span| last.checked_sub_signed(span))
            .map_or(first, |start| start.max(first));
        Some((start.date_naive(), last.date_naive()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

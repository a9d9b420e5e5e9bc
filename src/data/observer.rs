use super::types::{ConsumptionKind, TableSummary};
use std::sync::Mutex;

/// How the date column was picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRule {
    /// Header contains a known date token
    HeaderToken(&'static str),
    /// First column's first value parses as a date
    FirstColumnValue,
    /// Sample values contain date separators and at least one parses
    SampleScan,
}

/// How a consumption column was picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumptionRule {
    ExactName,
    HeaderToken(&'static str),
    NumericFallback,
}

/// Diagnostics emitted while turning CSV bytes into a normalized table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Latin1Fallback,
    SeparatorDetected(char),
    ColumnsFound(Vec<String>),
    DateColumnSelected { column: String, rule: DateRule },
    ConsumptionColumnSelected {
        kind: ConsumptionKind,
        column: String,
        rule: ConsumptionRule,
    },
    GenericColumnSelected(String),
    UnparsableDates { dropped: usize },
    IgnoredRows { column: String, dropped: usize },
    MissingValues { column: String, count: usize },
    Loaded(TableSummary),
}

/// Receives load diagnostics. Keeps the classifier and normalizer free of logging state.
pub trait LoadObserver {
    fn on_event(&self, event: &LoadEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_event(&self, event: &LoadEvent) {
        match event {
            LoadEvent::Latin1Fallback => {
                log::info!("Input is not valid UTF-8, decoding as Latin-1");
            }
            LoadEvent::SeparatorDetected(sep) => {
                log::info!("Detected separator: {:?}", sep);
            }
            LoadEvent::ColumnsFound(columns) => {
                log::info!("Columns found in CSV: {:?}", columns);
            }
            LoadEvent::DateColumnSelected { column, rule } => {
                log::info!("Using '{}' as date column ({:?})", column, rule);
            }
            LoadEvent::ConsumptionColumnSelected { kind, column, rule } => {
                log::info!("Using '{}' as {} column ({:?})", column, kind, rule);
            }
            LoadEvent::GenericColumnSelected(column) => {
                log::warn!(
                    "No electricity or gas column found, using '{}' as generic consumption",
                    column
                );
            }
            LoadEvent::UnparsableDates { dropped } => {
                log::warn!("Dropped {} rows with unparsable dates", dropped);
            }
            LoadEvent::IgnoredRows { column, dropped } => {
                log::info!("Filtered out {} rows flagged in '{}'", dropped, column);
            }
            LoadEvent::MissingValues { column, count } => {
                log::debug!("{} missing or non-numeric values in '{}'", count, column);
            }
            LoadEvent::Loaded(summary) => {
                log::info!("Table normalized: {}", summary);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LoadObserver for NullObserver {
    fn on_event(&self, _event: &LoadEvent) {}
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<LoadEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LoadEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl LoadObserver for RecordingObserver {
    fn on_event(&self, event: &LoadEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

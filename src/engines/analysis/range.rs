use crate::data::dates;
use crate::error::{AnalyzerError, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// Inclusive span from 00:00:00 of the first day to 23:59:59 of the last day, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Parse and expand user-supplied day bounds. Fails fast on malformed text or start after end.
    pub fn parse(start_text: &str, end_text: &str) -> Result<Self> {
        let start_day = Self::parse_day(start_text, "start")?;
        let end_day = Self::parse_day(end_text, "end")?;

        let start = dates::start_of_day(start_day).ok_or_else(|| {
            AnalyzerError::InvalidRange(format!("Cannot expand start date '{}'", start_text))
        })?;
        let end = dates::end_of_day(end_day).ok_or_else(|| {
            AnalyzerError::InvalidRange(format!("Cannot expand end date '{}'", end_text))
        })?;

        Self::new(start, end)
    }

    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AnalyzerError::InvalidRange(
                "Start date cannot be after end date".to_string(),
            ));
        }
        log::debug!("Validated date range: {} to {}", start, end);
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start && date <= self.end
    }

    fn parse_day(text: &str, which: &str) -> Result<chrono::NaiveDate> {
        dates::parse_timestamp(text)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                AnalyzerError::InvalidRange(format!("Cannot parse {} date '{}'", which, text.trim()))
            })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

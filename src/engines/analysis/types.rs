use crate::data::DATE_COLUMN;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use polars::df;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Query to run over a date range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryOp {
    Minimum,
    Maximum,
    Average,
    CountAbove(f64),
    CountBelow(f64),
    Extract,
}

/// Outcome of a query. `NoData` is a valid answer, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Extreme { value: f64, date: DateTime<Utc> },
    Scalar(f64),
    Count(usize),
    Subtable(Subtable),
    NoData,
}

impl QueryResult {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Date + one consumption column, without missing values
#[derive(Debug, Clone, PartialEq)]
pub struct Subtable {
    pub column: String,
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl Subtable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .points
            .iter()
            .map(|(date, _)| date.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect();
        let values: Vec<f64> = self.points.iter().map(|(_, value)| *value).collect();

        let df = df!(
            DATE_COLUMN => dates,
            self.column.as_str() => values
        )?;
        Ok(df)
    }

    /// Write as CSV with a header row
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        log::info!(
            "Exported {} rows of '{}' to {}",
            self.points.len(),
            self.column,
            path.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn subtable() -> Subtable {
        Subtable {
            column: "gas_consumption".to_string(),
            points: vec![
                (Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(), 1.5),
                (Utc.with_ymd_and_hms(2024, 12, 2, 0, 0, 0).unwrap(), 2.0),
            ],
        }
    }

    #[test]
    fn test_to_dataframe() {
        let df = subtable().to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let cols = df.get_column_names();
        assert!(cols.iter().any(|c| c.as_str() == "date"));
        assert!(cols.iter().any(|c| c.as_str() == "gas_consumption"));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("period.csv");
        subtable().write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,gas_consumption"));
        assert_eq!(lines.next(), Some("2024-12-01T00:00:00Z,1.5"));
        let (date, value) = lines.next().unwrap().split_once(',').unwrap();
        assert_eq!(date, "2024-12-02T00:00:00Z");
        assert_eq!(value.parse::<f64>().unwrap(), 2.0);
    }
}

use crate::error::{AnalyzerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_COLUMN: &str = "date";
pub const ELECTRICITY_COLUMN: &str = "electricity_consumption";
pub const GAS_COLUMN: &str = "gas_consumption";
pub const GENERIC_COLUMN: &str = "consumption";

/// Energy carrier a query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionKind {
    Electricity,
    Gas,
}

impl ConsumptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Gas => "gas",
        }
    }

    /// Canonical column name after normalization
    pub fn canonical_column(&self) -> &'static str {
        match self {
            Self::Electricity => ELECTRICITY_COLUMN,
            Self::Gas => GAS_COLUMN,
        }
    }

    pub fn all() -> [Self; 2] {
        [Self::Electricity, Self::Gas]
    }
}

impl fmt::Display for ConsumptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated CSV content: header names plus string cells, `None` for empty fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table, rejecting rows whose width differs from the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(AnalyzerError::Format(format!(
                "Row {} has {} fields, header has {}",
                idx,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).and_then(|c| c.as_deref()))
    }
}

/// Which raw columns hold the date and the consumption series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub date_column: Option<String>,
    pub electricity_column: Option<String>,
    pub gas_column: Option<String>,
    /// Set only when neither named nor numeric consumption columns were found.
    pub generic_column: Option<String>,
}

impl ColumnClassification {
    /// Raw name → canonical name, date first, in output column order.
    pub fn projection(&self) -> Vec<(&str, &'static str)> {
        let mut out = Vec::with_capacity(4);
        if let Some(col) = &self.date_column {
            out.push((col.as_str(), DATE_COLUMN));
        }
        if let Some(col) = &self.electricity_column {
            out.push((col.as_str(), ELECTRICITY_COLUMN));
        }
        if let Some(col) = &self.gas_column {
            out.push((col.as_str(), GAS_COLUMN));
        }
        if let Some(col) = &self.generic_column {
            out.push((col.as_str(), GENERIC_COLUMN));
        }
        out
    }
}

/// One normalized row. `values` is aligned with `NormalizedTable::columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: DateTime<Utc>,
    pub values: Vec<Option<f64>>,
}

/// Cleaned dataset: a UTC date per row plus one or more consumption columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl NormalizedTable {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Result<Self> {
        if columns.is_empty() {
            return Err(AnalyzerError::Format(
                "Normalized table needs at least one consumption column".to_string(),
            ));
        }
        if columns.iter().any(|c| c == DATE_COLUMN) {
            return Err(AnalyzerError::Format(format!(
                "'{}' is reserved for the date column",
                DATE_COLUMN
            )));
        }
        if let Some(idx) = records.iter().position(|r| r.values.len() != columns.len()) {
            return Err(AnalyzerError::Format(format!(
                "Record {} has {} values, expected {}",
                idx,
                records[idx].values.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, records })
    }

    /// Consumption column names, excluding `date`
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.records.get(row).and_then(|r| r.values.get(column).copied().flatten())
    }

    pub fn electricity(&self, row: usize) -> Option<f64> {
        self.column_index(ELECTRICITY_COLUMN)
            .and_then(|idx| self.value(row, idx))
    }

    pub fn gas(&self, row: usize) -> Option<f64> {
        self.column_index(GAS_COLUMN).and_then(|idx| self.value(row, idx))
    }

    /// Earliest and latest date, independent of row order
    pub fn date_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            rows: self.records.len(),
            columns: self.columns.clone(),
            date_span: self.date_span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub date_span: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows, columns: {}", self.rows, self.columns.join(", "))?;
        if let Some((first, last)) = self.date_span {
            write!(
                f,
                ", dates {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            )?;
        }
        Ok(())
    }
}

use super::range::DateRange;
use super::resolver::{ColumnResolver, ResolvedColumn};
use super::types::{QueryOp, QueryResult, Subtable};
use crate::data::{dates, ConsumptionKind, NormalizedTable, Record};
use crate::error::{AnalyzerError, Result};
use chrono::{DateTime, Utc};

/// Rows of the table whose date falls in a range, plus the column to read.
#[derive(Debug, Clone)]
pub struct FilteredRange<'a> {
    pub column: ResolvedColumn,
    pub rows: Vec<&'a Record>,
}

impl<'a> FilteredRange<'a> {
    /// Non-missing (date, value) pairs in table order
    pub fn values(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        let idx = self.column.index;
        self.rows
            .iter()
            .filter_map(move |r| r.values.get(idx).copied().flatten().map(|v| (r.date, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Range statistics over a normalized table. The column is resolved once per query.
pub struct Analyzer<'a> {
    table: &'a NormalizedTable,
}

impl<'a> Analyzer<'a> {
    pub fn new(table: &'a NormalizedTable) -> Self {
        Self { table }
    }

    pub fn resolve_column(&self, kind: ConsumptionKind) -> Result<ResolvedColumn> {
        ColumnResolver::resolve(self.table, kind)
    }

    /// Rows inside the inclusive range. An empty selection is not an error.
    pub fn filter_range(&self, range: &DateRange, kind: ConsumptionKind) -> Result<FilteredRange<'a>> {
        let column = self.resolve_column(kind)?;
        Ok(self.select(range, column))
    }

    pub fn run(&self, range: &DateRange, kind: ConsumptionKind, op: QueryOp) -> Result<QueryResult> {
        let filtered = self.filter_range(range, kind)?;
        if filtered.is_empty() {
            log::warn!("No data found between {}", range);
        }
        let result = match op {
            QueryOp::Minimum => Self::extreme(&filtered, |candidate, best| candidate < best),
            QueryOp::Maximum => Self::extreme(&filtered, |candidate, best| candidate > best),
            QueryOp::Average => Self::mean(&filtered),
            QueryOp::CountAbove(threshold) => Self::count(&filtered, |v| v > threshold),
            QueryOp::CountBelow(threshold) => Self::count(&filtered, |v| v < threshold),
            QueryOp::Extract => self.extract(range, kind, &filtered),
        };
        Ok(result)
    }

    pub fn minimum(&self, range: &DateRange, kind: ConsumptionKind) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::Minimum)
    }

    pub fn maximum(&self, range: &DateRange, kind: ConsumptionKind) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::Maximum)
    }

    pub fn average(&self, range: &DateRange, kind: ConsumptionKind) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::Average)
    }

    pub fn count_above(&self, range: &DateRange, kind: ConsumptionKind, threshold: f64) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::CountAbove(threshold))
    }

    pub fn count_below(&self, range: &DateRange, kind: ConsumptionKind, threshold: f64) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::CountBelow(threshold))
    }

    pub fn data_for_period(&self, range: &DateRange, kind: ConsumptionKind) -> Result<QueryResult> {
        self.run(range, kind, QueryOp::Extract)
    }

    fn select(&self, range: &DateRange, column: ResolvedColumn) -> FilteredRange<'a> {
        let rows = self
            .table
            .records()
            .iter()
            .filter(|r| range.contains(r.date))
            .collect();
        FilteredRange { column, rows }
    }

    /// Strict comparison keeps the first occurrence on ties.
    fn extreme(filtered: &FilteredRange<'_>, better: impl Fn(f64, f64) -> bool) -> QueryResult {
        let best = filtered.values().fold(None, |best: Option<(DateTime<Utc>, f64)>, (date, value)| {
            match best {
                Some((_, current)) if !better(value, current) => best,
                _ => Some((date, value)),
            }
        });
        match best {
            Some((date, value)) => QueryResult::Extreme { value, date },
            None => QueryResult::NoData,
        }
    }

    fn mean(filtered: &FilteredRange<'_>) -> QueryResult {
        let (sum, n) = filtered
            .values()
            .fold((0.0, 0usize), |(sum, n), (_, v)| (sum + v, n + 1));
        if n == 0 {
            QueryResult::NoData
        } else {
            QueryResult::Scalar(sum / n as f64)
        }
    }

    /// `NoData` when the column has no value in range, otherwise the (possibly zero) count.
    fn count(filtered: &FilteredRange<'_>, qualifies: impl Fn(f64) -> bool) -> QueryResult {
        let mut seen = false;
        let mut count = 0;
        for (_, v) in filtered.values() {
            seen = true;
            if qualifies(v) {
                count += 1;
            }
        }
        if seen {
            QueryResult::Count(count)
        } else {
            QueryResult::NoData
        }
    }

    /// Falls back to gas when electricity has nothing in range.
    fn extract(&self, range: &DateRange, kind: ConsumptionKind, filtered: &FilteredRange<'_>) -> QueryResult {
        let points: Vec<_> = filtered.values().collect();
        if !points.is_empty() {
            return QueryResult::Subtable(Subtable {
                column: filtered.column.name.clone(),
                points,
            });
        }

        log::warn!("All {} data in the selected period has missing values", kind);
        if kind != ConsumptionKind::Electricity {
            return QueryResult::NoData;
        }

        log::info!("Attempting to use gas consumption data instead");
        let gas = match self.resolve_column(ConsumptionKind::Gas) {
            Ok(column) => column,
            Err(e) => {
                log::error!("Could not use gas data as fallback: {}", e);
                return QueryResult::NoData;
            }
        };
        let gas_points: Vec<_> = self.select(range, gas.clone()).values().collect();
        if gas_points.is_empty() {
            return QueryResult::NoData;
        }
        log::info!("Using gas consumption data as fallback");
        QueryResult::Subtable(Subtable {
            column: gas.name,
            points: gas_points,
        })
    }
}

/// Threshold text as a finite number
pub fn parse_threshold(text: &str) -> Result<f64> {
    dates::parse_number(text).ok_or_else(|| {
        AnalyzerError::InvalidThreshold(format!("'{}' is not a number", text.trim()))
    })
}

pub fn validate_threshold_value(text: &str) -> bool {
    parse_threshold(text).is_ok()
}

use crate::data::{ConsumptionKind, NormalizedTable, GENERIC_COLUMN};
use crate::error::{AnalyzerError, Result};

/// How confident the resolver is that a column carries the requested kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchConfidence {
    /// Canonical `electricity_consumption` / `gas_consumption`
    Exact,
    /// Header mentions the energy carrier
    Substring,
    /// Unlabelled `consumption` column
    Generic,
    /// First consumption column, whatever it holds
    Fallback,
}

impl MatchConfidence {
    pub fn is_low(&self) -> bool {
        matches!(self, Self::Generic | Self::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub kind: ConsumptionKind,
    pub name: String,
    pub index: usize,
    pub confidence: MatchConfidence,
}

pub struct ColumnResolver;

impl ColumnResolver {
    /// Exact name, then carrier substring, then `consumption`, then the first non-date column.
    pub fn resolve(table: &NormalizedTable, kind: ConsumptionKind) -> Result<ResolvedColumn> {
        let columns = table.columns();
        let found = Self::position(columns, |c| c == kind.canonical_column())
            .map(|idx| (idx, MatchConfidence::Exact))
            .or_else(|| {
                let needles: &[&str] = match kind {
                    ConsumptionKind::Electricity => &["electr", "électr"],
                    ConsumptionKind::Gas => &["gas", "gaz"],
                };
                Self::position(columns, |c| {
                    let lower = c.to_lowercase();
                    needles.iter().any(|n| lower.contains(n))
                })
                .map(|idx| (idx, MatchConfidence::Substring))
            })
            .or_else(|| {
                Self::position(columns, |c| c == GENERIC_COLUMN)
                    .map(|idx| (idx, MatchConfidence::Generic))
            })
            .or_else(|| (!columns.is_empty()).then_some((0, MatchConfidence::Fallback)));

        let Some((index, confidence)) = found else {
            log::error!(
                "No {} consumption data available in columns: {:?}",
                kind,
                columns
            );
            return Err(AnalyzerError::NoConsumptionData(kind.to_string()));
        };

        let name = columns[index].clone();
        if confidence.is_low() {
            log::warn!(
                "Using '{}' as fallback for {} consumption analysis ({:?})",
                name,
                kind,
                confidence
            );
        } else if confidence == MatchConfidence::Substring {
            log::info!("Using column '{}' for {} consumption analysis", name, kind);
        }

        Ok(ResolvedColumn {
            kind,
            name,
            index,
            confidence,
        })
    }

    fn position(columns: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
        columns.iter().position(|c| pred(c))
    }
}

use super::dates;
use super::observer::{ConsumptionRule, DateRule, LoadEvent, LoadObserver};
use super::types::{ColumnClassification, ConsumptionKind, RawTable};
use crate::config::LoaderConfig;

/// Header tokens that mark a date column, in priority order. Matched case-sensitively.
pub const DATE_TOKENS: [&str; 8] = [
    "date", "Date", "temps", "Temps", "time", "Time", "période", "Période",
];

pub const ELECTRICITY_TOKENS: [&str; 5] = ["électricité", "electricite", "électr", "electr", "RTE"];

pub const GAS_TOKENS: [&str; 4] = ["gaz", "gas", "GRTgaz", "Teréga"];

/// Header-driven column detection for heterogeneous energy exports.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Best-effort classification. Never fails; unresolved roles stay `None`.
    pub fn classify(
        table: &RawTable,
        config: &LoaderConfig,
        observer: &dyn LoadObserver,
    ) -> ColumnClassification {
        let sample_len = config.sample_rows.min(table.height());

        let date_column = Self::find_date_column(table, sample_len, config.date_probe_samples);
        let Some((date_idx, rule)) = date_column else {
            return ColumnClassification::default();
        };
        let date_name = table.headers[date_idx].clone();
        observer.on_event(&LoadEvent::DateColumnSelected {
            column: date_name.clone(),
            rule,
        });

        let mut electricity = Self::find_by_name(table, ConsumptionKind::Electricity, &[date_idx]);
        let excluded: Vec<usize> = std::iter::once(date_idx)
            .chain(electricity.as_ref().map(|(idx, _)| *idx))
            .collect();
        let mut gas = Self::find_by_name(table, ConsumptionKind::Gas, &excluded);

        if electricity.is_none() && gas.is_none() {
            let numeric = Self::numeric_columns(table, sample_len, date_idx);
            electricity = numeric
                .first()
                .map(|&idx| (idx, ConsumptionRule::NumericFallback));
            gas = numeric
                .get(1)
                .map(|&idx| (idx, ConsumptionRule::NumericFallback));
        }

        let mut classification = ColumnClassification {
            date_column: Some(date_name),
            ..Default::default()
        };

        for (kind, found) in [
            (ConsumptionKind::Electricity, electricity),
            (ConsumptionKind::Gas, gas),
        ] {
            if let Some((idx, rule)) = found {
                let column = table.headers[idx].clone();
                observer.on_event(&LoadEvent::ConsumptionColumnSelected {
                    kind,
                    column: column.clone(),
                    rule,
                });
                match kind {
                    ConsumptionKind::Electricity => classification.electricity_column = Some(column),
                    ConsumptionKind::Gas => classification.gas_column = Some(column),
                }
            }
        }

        if classification.electricity_column.is_none() && classification.gas_column.is_none() {
            if let Some(idx) = (0..table.width()).find(|&idx| idx != date_idx) {
                let column = table.headers[idx].clone();
                observer.on_event(&LoadEvent::GenericColumnSelected(column.clone()));
                classification.generic_column = Some(column);
            }
        }

        classification
    }

    fn find_date_column(
        table: &RawTable,
        sample_len: usize,
        probe_samples: usize,
    ) -> Option<(usize, DateRule)> {
        for token in DATE_TOKENS {
            if let Some(idx) = table.headers.iter().position(|h| h.contains(token)) {
                return Some((idx, DateRule::HeaderToken(token)));
            }
        }

        if table.width() > 0 {
            if let Some(first) = table.cell(0, 0) {
                if dates::parse_timestamp(first).is_some() {
                    return Some((0, DateRule::FirstColumnValue));
                }
            }
        }

        (0..table.width()).find_map(|idx| {
            let samples: Vec<&str> = table
                .column_cells(idx)
                .take(sample_len)
                .flatten()
                .take(probe_samples)
                .collect();
            let looks_like_date = samples.iter().any(|s| s.contains('-') || s.contains('/'));
            let any_parsed = samples.iter().any(|s| dates::parse_lenient(s).is_some());
            (looks_like_date && any_parsed).then_some((idx, DateRule::SampleScan))
        })
    }

    /// First column, in header order, matching the kind's exact name or one of its tokens.
    fn find_by_name(
        table: &RawTable,
        kind: ConsumptionKind,
        excluded: &[usize],
    ) -> Option<(usize, ConsumptionRule)> {
        let candidates = || {
            table
                .headers
                .iter()
                .enumerate()
                .filter(|(idx, _)| !excluded.contains(idx))
        };

        if let Some((idx, _)) = candidates().find(|(_, h)| h.as_str() == kind.canonical_column()) {
            return Some((idx, ConsumptionRule::ExactName));
        }

        let tokens: &[&'static str] = match kind {
            ConsumptionKind::Electricity => &ELECTRICITY_TOKENS,
            ConsumptionKind::Gas => &GAS_TOKENS,
        };
        for &token in tokens {
            let needle = token.to_lowercase();
            if let Some((idx, _)) = candidates().find(|(_, h)| h.to_lowercase().contains(&needle)) {
                return Some((idx, ConsumptionRule::HeaderToken(token)));
            }
        }
        None
    }

    /// Columns whose sampled non-empty cells all parse as numbers (at least one required).
    fn numeric_columns(table: &RawTable, sample_len: usize, date_idx: usize) -> Vec<usize> {
        (0..table.width())
            .filter(|&idx| idx != date_idx)
            .filter(|&idx| {
                let mut seen = false;
                for cell in table.column_cells(idx).take(sample_len).flatten() {
                    if dates::parse_number(cell).is_none() {
                        return false;
                    }
                    seen = true;
                }
                seen
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observer::{NullObserver, RecordingObserver};

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    fn classify(table: &RawTable) -> ColumnClassification {
        ColumnClassifier::classify(table, &LoaderConfig::default(), &NullObserver)
    }

    #[test]
    fn test_french_headers() {
        let table = raw(
            &["Date", "Consommation électricité (MWh)", "Consommation gaz (MWh)"],
            &[&["2024-12-01", "10", "20"]],
        );
        let c = classify(&table);
        assert_eq!(c.date_column.as_deref(), Some("Date"));
        assert_eq!(c.electricity_column.as_deref(), Some("Consommation électricité (MWh)"));
        assert_eq!(c.gas_column.as_deref(), Some("Consommation gaz (MWh)"));
        assert_eq!(c.generic_column, None);
    }

    #[test]
    fn test_odre_headers() {
        let table = raw(
            &[
                "date_heure",
                "date",
                "heure",
                "consommation_brute_gaz_grtgaz",
                "statut_grtgaz",
                "consommation_brute_electricite_rte",
                "statut_rte",
            ],
            &[&["2024-12-01T00:00:00+00:00", "2024-12-01", "00:00", "1", "Définitif", "2", "Définitif"]],
        );
        let c = classify(&table);
        assert_eq!(c.date_column.as_deref(), Some("date_heure"));
        assert_eq!(c.electricity_column.as_deref(), Some("consommation_brute_electricite_rte"));
        assert_eq!(c.gas_column.as_deref(), Some("consommation_brute_gaz_grtgaz"));
    }

    #[test]
    fn test_exact_names_win_over_tokens() {
        let table = raw(
            &["date", "electricite_brute", "electricity_consumption", "gas_consumption"],
            &[&["2024-12-01", "1", "2", "3"]],
        );
        let c = classify(&table);
        assert_eq!(c.electricity_column.as_deref(), Some("electricity_consumption"));
        assert_eq!(c.gas_column.as_deref(), Some("gas_consumption"));
    }

    #[test]
    fn test_date_from_first_value() {
        let table = raw(&["jour", "valeur"], &[&["2024-12-01", "5"]]);
        let observer = RecordingObserver::new();
        let c = ColumnClassifier::classify(&table, &LoaderConfig::default(), &observer);
        assert_eq!(c.date_column.as_deref(), Some("jour"));
        assert!(observer.events().contains(&LoadEvent::DateColumnSelected {
            column: "jour".to_string(),
            rule: DateRule::FirstColumnValue,
        }));
    }

    #[test]
    fn test_date_from_sample_scan() {
        let table = raw(
            &["id", "jour", "a", "b"],
            &[&["1", "01/12/2024", "3", "4"], &["2", "02/12/2024", "5", "6"]],
        );
        let c = classify(&table);
        assert_eq!(c.date_column.as_deref(), Some("jour"));
        // numeric fallback: first two numeric columns in header order
        assert_eq!(c.electricity_column.as_deref(), Some("id"));
        assert_eq!(c.gas_column.as_deref(), Some("a"));
    }

    #[test]
    fn test_no_date_column() {
        let table = raw(&["a", "b"], &[&["x", "1"], &["y", "2"]]);
        assert_eq!(classify(&table), ColumnClassification::default());
    }

    #[test]
    fn test_numeric_fallback_skips_text_columns() {
        let table = raw(
            &["Date", "label", "valeur"],
            &[&["2024-12-01", "ok", "1.5"], &["2024-12-02", "ok", ""]],
        );
        let c = classify(&table);
        assert_eq!(c.electricity_column.as_deref(), Some("valeur"));
        assert_eq!(c.gas_column, None);
    }

    #[test]
    fn test_generic_fallback() {
        let table = raw(&["Date", "label"], &[&["2024-12-01", "ok"]]);
        let c = classify(&table);
        assert_eq!(c.electricity_column, None);
        assert_eq!(c.gas_column, None);
        assert_eq!(c.generic_column.as_deref(), Some("label"));
    }

    #[test]
    fn test_gas_never_reuses_electricity_column() {
        let table = raw(
            &["Date", "électricité et gaz", "GRTgaz"],
            &[&["2024-12-01", "1", "2"]],
        );
        let c = classify(&table);
        assert_eq!(c.electricity_column.as_deref(), Some("électricité et gaz"));
        assert_eq!(c.gas_column.as_deref(), Some("GRTgaz"));
    }
}

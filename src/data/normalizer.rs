use super::dates;
use super::observer::{LoadEvent, LoadObserver};
use super::types::{ColumnClassification, NormalizedTable, RawTable, Record};
use crate::config::LoaderConfig;
use crate::error::{AnalyzerError, Result};

/// Turns a classified raw table into the canonical date + consumption layout.
pub struct TableNormalizer;

impl TableNormalizer {
    pub fn normalize(
        raw: &RawTable,
        classification: &ColumnClassification,
        config: &LoaderConfig,
        observer: &dyn LoadObserver,
    ) -> Result<NormalizedTable> {
        if raw.width() < 2 {
            return Err(AnalyzerError::Format(
                "File does not have enough columns".to_string(),
            ));
        }

        let date_name = classification.date_column.as_deref().ok_or_else(|| {
            AnalyzerError::Format("No date column found in the CSV file".to_string())
        })?;
        let date_idx = Self::raw_index(raw, date_name)?;

        let mut value_sources = Vec::new();
        for (raw_name, canonical) in classification.projection().into_iter().skip(1) {
            value_sources.push((Self::raw_index(raw, raw_name)?, canonical.to_string()));
        }
        if value_sources.is_empty() {
            return Err(AnalyzerError::Format(format!(
                "Couldn't find required columns in the CSV file. Found: {:?}",
                [date_name]
            )));
        }

        let ignore_idx = raw.column_index(&config.ignore_flag_column);
        let mut ignored = 0usize;
        let mut bad_dates = 0usize;
        let mut missing = vec![0usize; value_sources.len()];
        let mut records = Vec::with_capacity(raw.height());

        for row in 0..raw.height() {
            if let Some(flag_idx) = ignore_idx {
                if raw.cell(row, flag_idx) == Some(config.ignore_flag_value.as_str()) {
                    ignored += 1;
                    continue;
                }
            }

            let Some(date) = raw.cell(row, date_idx).and_then(dates::parse_timestamp) else {
                bad_dates += 1;
                continue;
            };

            let values = value_sources
                .iter()
                .enumerate()
                .map(|(i, (idx, _))| {
                    let value = raw.cell(row, *idx).and_then(dates::parse_number);
                    if value.is_none() {
                        missing[i] += 1;
                    }
                    value
                })
                .collect();

            records.push(Record { date, values });
        }

        if let Some(flag_idx) = ignore_idx {
            observer.on_event(&LoadEvent::IgnoredRows {
                column: raw.headers[flag_idx].clone(),
                dropped: ignored,
            });
        }
        if bad_dates > 0 {
            observer.on_event(&LoadEvent::UnparsableDates { dropped: bad_dates });
        }
        for ((_, name), count) in value_sources.iter().zip(&missing) {
            if *count > 0 {
                observer.on_event(&LoadEvent::MissingValues {
                    column: name.clone(),
                    count: *count,
                });
            }
        }

        if !records.is_empty() && missing.iter().all(|&count| count == records.len()) {
            return Err(AnalyzerError::Format(
                "No usable consumption values in the classified columns".to_string(),
            ));
        }

        let columns = value_sources.into_iter().map(|(_, name)| name).collect();
        let table = NormalizedTable::new(columns, records)?;
        observer.on_event(&LoadEvent::Loaded(table.summary()));
        Ok(table)
    }

    fn raw_index(raw: &RawTable, name: &str) -> Result<usize> {
        raw.column_index(name).ok_or_else(|| {
            AnalyzerError::Format(format!("Column '{}' is not present in the file", name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classifier::ColumnClassifier;
    use crate::data::observer::{NullObserver, RecordingObserver};
    use crate::data::types::{ELECTRICITY_COLUMN, GAS_COLUMN, GENERIC_COLUMN};
    use chrono::{TimeZone, Utc};

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

    fn normalize(table: &RawTable) -> Result<NormalizedTable> {
        let config = LoaderConfig::default();
        let classification = ColumnClassifier::classify(table, &config, &NullObserver);
        TableNormalizer::normalize(table, &classification, &config, &NullObserver)
    }

    #[test]
    fn test_canonical_columns_and_coercion() {
        let table = raw(
            &["Date", "Consommation électricité (MWh)", "Consommation gaz (MWh)"],
            &[
                &["2024-12-01", "10", "n/a"],
                &["2024-12-02", "", "7,5"],
            ],
        );
        let normalized = normalize(&table).unwrap();

        assert_eq!(normalized.columns(), &[ELECTRICITY_COLUMN, GAS_COLUMN]);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.electricity(0), Some(10.0));
        assert_eq!(normalized.gas(0), None);
        assert_eq!(normalized.electricity(1), None);
        assert_eq!(normalized.gas(1), Some(7.5));
    }

    #[test]
    fn test_bad_dates_are_dropped() {
        let table = raw(
            &["date", "gas_consumption"],
            &[
                &["2024-12-01T00:00:00+01:00", "1"],
                &["garbage", "2"],
                &["", "3"],
                &["12/02/2024", "4"],
            ],
        );
        let observer = RecordingObserver::new();
        let config = LoaderConfig::default();
        let classification = ColumnClassifier::classify(&table, &config, &observer);
        let normalized =
            TableNormalizer::normalize(&table, &classification, &config, &observer).unwrap();

        assert_eq!(normalized.len(), 2);
        assert_eq!(
            normalized.records()[0].date,
            Utc.with_ymd_and_hms(2024, 11, 30, 23, 0, 0).unwrap()
        );
        assert_eq!(
            normalized.records()[1].date,
            Utc.with_ymd_and_hms(2024, 12, 2, 0, 0, 0).unwrap()
        );
        assert!(observer
            .events()
            .contains(&LoadEvent::UnparsableDates { dropped: 2 }));
    }

    #[test]
    fn test_flag_ignore_rows() {
        let table = raw(
            &["date", "electricity_consumption", "flag_ignore"],
            &[
                &["2024-12-01", "1", "non"],
                &["2024-12-02", "2", "oui"],
                &["2024-12-03", "3", ""],
                &["2024-12-04", "4", "OUI"],
            ],
        );
        let normalized = normalize(&table).unwrap();
        let values: Vec<_> = (0..normalized.len()).map(|i| normalized.electricity(i)).collect();
        assert_eq!(values, vec![Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let table = raw(
            &["date", "electricity_consumption"],
            &[&["2024-12-03", "3"], &["2024-12-01", "1"], &["2024-12-02", "2"]],
        );
        let normalized = normalize(&table).unwrap();
        let values: Vec<_> = (0..3).map(|i| normalized.electricity(i)).collect();
        assert_eq!(values, vec![Some(3.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_single_column_is_format_error() {
        let table = raw(&["date"], &[&["2024-12-01"]]);
        assert!(matches!(normalize(&table), Err(AnalyzerError::Format(_))));
    }

    #[test]
    fn test_missing_date_column_is_format_error() {
        let table = raw(&["a", "b"], &[&["x", "1"]]);
        assert!(matches!(normalize(&table), Err(AnalyzerError::Format(_))));
    }

    #[test]
    fn test_generic_text_column_is_rejected() {
        let table = raw(&["Date", "label"], &[&["2024-12-01", "ok"], &["2024-12-02", "ko"]]);
        assert!(matches!(normalize(&table), Err(AnalyzerError::Format(_))));
    }

    #[test]
    fn test_generic_column_is_renamed() {
        let table = raw(
            &["Date", "label"],
            &[&["2024-12-01", "ok"], &["2024-12-02", "12"]],
        );
        let normalized = normalize(&table).unwrap();
        assert_eq!(normalized.columns(), &[GENERIC_COLUMN]);
        assert_eq!(normalized.value(1, 0), Some(12.0));
    }

    #[test]
    fn test_header_only_file_loads_empty() {
        let table = raw(&["date", "gas_consumption"], &[]);
        let normalized = normalize(&table).unwrap();
        assert!(normalized.is_empty());
    }
}

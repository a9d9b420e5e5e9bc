use super::observer::{LoadEvent, LoadObserver};
use super::types::RawTable;
use crate::error::{AnalyzerError, Result};
use polars::prelude::*;
use std::io::Cursor;

/// UTF-8 when valid, Latin-1 otherwise. A leading BOM is dropped.
pub fn decode_bytes(bytes: &[u8], observer: &dyn LoadObserver) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            observer.on_event(&LoadEvent::Latin1Fallback);
            bytes.iter().map(|&b| b as char).collect()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// `;` if the header line has one, else `,`, else tab, else `,`
pub fn detect_separator(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("").trim();
    if header.contains(';') {
        b';'
    } else if header.contains(',') {
        b','
    } else if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Split CSV bytes into a string-only raw table.
pub fn read_raw_table(bytes: &[u8], observer: &dyn LoadObserver) -> Result<RawTable> {
    let text = decode_bytes(bytes, observer);
    if text.trim().is_empty() {
        return Err(AnalyzerError::Format("File is empty".to_string()));
    }

    let separator = detect_separator(&text);
    observer.on_event(&LoadEvent::SeparatorDetected(separator as char));

    // Every column is read as a string; typing happens during classification.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| AnalyzerError::Format(format!("Failed to read CSV: {}", e)))?;

    let raw = dataframe_to_raw(&df)?;
    observer.on_event(&LoadEvent::ColumnsFound(raw.headers.clone()));
    Ok(raw)
}

fn dataframe_to_raw(df: &DataFrame) -> Result<RawTable> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut columns = Vec::with_capacity(headers.len());
    for name in &headers {
        let series = df.column(name)?;
        let values = series.str()?;
        let cells: Vec<Option<String>> = (0..df.height())
            .map(|i| {
                values
                    .get(i)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .collect();
        columns.push(cells);
    }

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();

    RawTable::new(headers, rows)
}

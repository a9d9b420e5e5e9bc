use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Ambiguous numeric layouts are read month-first; day-first only when that fails.
const LENIENT_DATETIME_FORMATS: [&str; 10] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const LENIENT_DATE_FORMATS: [&str; 5] = ["%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y"];

/// ISO-8601 style timestamps only. Values without an offset are taken as UTC.
pub fn parse_strict(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(start_of_day)
}

/// Strict formats first, then slash and dash layouts, compact `YYYYMMDD` and `YYYY-MM`.
pub fn parse_lenient(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if let Some(dt) = parse_strict(s) {
        return Some(dt);
    }
    for fmt in LENIENT_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in LENIENT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return start_of_day(date);
        }
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s[0..4].parse().ok()?;
        let month: u32 = s[4..6].parse().ok()?;
        let day: u32 = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).and_then(start_of_day);
    }
    if s.len() == 7 && s.is_ascii() && s.as_bytes()[4] == b'-' {
        let year: i32 = s[0..4].parse().ok()?;
        let month: u32 = s[5..7].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1).and_then(start_of_day);
    }
    None
}

/// Strict parse with lenient retry
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    parse_strict(s).or_else(|| parse_lenient(s))
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|naive| naive.and_utc())
}

/// True for `YYYY-MM-DD` calendar dates
pub fn validate_date_format(s: &str) -> bool {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").is_ok()
}

/// Numeric coercion. Accepts a decimal comma when there is no dot; non-finite values are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let value = match s.parse::<f64>() {
        Ok(v) => v,
        Err(_) if s.contains(',') && !s.contains('.') => s.replace(',', ".").parse::<f64>().ok()?,
        Err(_) => return None,
    };
    value.is_finite().then_some(value)
}

//! Lenient interpretation of cell text.
//!
//! Vacancy exports are hand-edited, so numeric and date columns frequently
//! hold text such as `"75%"` or `"TBD"`. Nothing here fails: numbers fall back
//! to zero and dates to an `Invalid Date` marker.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Displayed in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped, then an optional sign, digits with an
/// optional fraction, and an optional exponent. `Infinity` is accepted.
/// Returns `None` when no digits are found.
///
/// # Examples
///
/// ```
/// use vacancy_dash::domain::parse_number;
///
/// assert_eq!(parse_number("75%"), Some(75.0));
/// assert_eq!(parse_number("  -1.5e2 applicants"), Some(-150.0));
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Numeric value used for filtering and sorting; anything unparseable is 0.
///
/// Negative zero is folded into zero so that it compares equal to a missing
/// value.
pub fn coerce_number(input: &str) -> f64 {
    match parse_number(input) {
        Some(value) if value != 0.0 => value,
        _ => 0.0,
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Renders a date cell as `M/D/YYYY`, or [`INVALID_DATE`].
pub fn format_date(input: &str) -> String {
    match parse_date(input) {
        Some(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        None => INVALID_DATE.to_string(),
    }
}

pub fn format_period(start: &str, end: &str) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

//! Text-to-typed coercions for form input.
//!
//! # Responsibility
//! - Turn raw user-entered text into numbers and calendar dates.
//! - Never fail: malformed input degrades to a caller-chosen fallback.
//!
//! # Invariants
//! - Numeric parsing reads the longest leading numeric prefix (`"12kg"` -> `12`).
//! - A parsed zero is treated like a parse failure and yields the fallback,
//!   so `parse_integer_or("0", 1)` returns `1`.
//! - Non-finite results always yield the fallback.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid decimal regex")
});
static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"));

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a decimal amount, falling back to `0.0`.
pub fn parse_number_or_zero(raw: &str) -> f64 {
    parse_number_or(raw, 0.0)
}

/// Parses a decimal amount from the leading numeric prefix of `raw`.
pub fn parse_number_or(raw: &str, fallback: f64) -> f64 {
    let parsed = LEADING_DECIMAL_RE
        .find(raw.trim_start())
        .and_then(|matched| matched.as_str().parse::<f64>().ok());

    match parsed {
        Some(value) if value.is_finite() && value != 0.0 => value,
        _ => fallback,
    }
}

/// Parses a whole-number count from the leading digits of `raw`.
pub fn parse_integer_or(raw: &str, fallback: i64) -> i64 {
    let parsed = LEADING_INTEGER_RE
        .find(raw.trim_start())
        .and_then(|matched| matched.as_str().parse::<i64>().ok());

    match parsed {
        Some(value) if value != 0 => value,
        _ => fallback,
    }
}

/// Parses a `YYYY-MM-DD` calendar date. Blank or malformed input is `None`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT).ok()
}

/// Parses a calendar date and anchors it at UTC midnight.
pub fn parse_date_at_midnight_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse_calendar_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses a checkbox-like flag (`true`/`yes`/`on`/`1`).
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Treats blank text as an absent optional value.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

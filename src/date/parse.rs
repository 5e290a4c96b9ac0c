//! Permissive date parsing for label text
//!
//! Mirrors the loose "whatever looks like a date" acceptance of the
//! rendering hosts this tool replaces: ISO dates, slashed day-first dates,
//! spelled-out dates with optional weekday prefix and ordinal suffixes,
//! and full timestamps. First match in the chain wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::utils::Timezone;

/// Slashed dates read day-first, matching the fixed rendering convention.
const NUMERIC_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// When parsing, chrono's `%B` accepts abbreviated month names too, so
/// "1 Jan 2024" and "1 January 2024" both land on the first entry.
const TEXTUAL_FORMATS: [&str; 3] = ["%d %B %Y", "%B %d, %Y", "%B %d %Y"];

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

const WEEKDAYS: [&str; 14] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "mon", "tue",
    "wed", "thu", "fri", "sat", "sun",
];

/// Interpret label text as a calendar date, or None if nothing in the
/// chain accepts it.
pub(crate) fn parse_label(text: &str, timezone: Timezone) -> Option<NaiveDate> {
    let cleaned = normalize(text);
    if cleaned.is_empty() {
        return None;
    }
    parse_numeric(&cleaned)
        .or_else(|| parse_textual(&cleaned))
        .or_else(|| parse_timestamp(&cleaned, timezone))
}

/// Trim and collapse inner whitespace so markup indentation inside a label
/// does not defeat the format chain.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_numeric(text: &str) -> Option<NaiveDate> {
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y%m%d") {
            return Some(date);
        }
    }
    NUMERIC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_textual(text: &str) -> Option<NaiveDate> {
    let bare = strip_ordinals(strip_weekday(text));
    TEXTUAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&bare, fmt).ok())
}

/// Timestamps with an offset are resolved through the display timezone;
/// naive timestamps are taken as wall-clock time and the date used as
/// written.
fn parse_timestamp(text: &str, timezone: Timezone) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(timezone.civil_date(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(timezone.civil_date(dt.with_timezone(&Utc)));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// Drop a leading weekday name ("Monday, 1 January 2024" → "1 January
/// 2024"). The weekday is decorative; the date fields decide.
fn strip_weekday(text: &str) -> &str {
    let Some((head, rest)) = text.split_once(' ') else {
        return text;
    };
    let head = head.trim_end_matches(',');
    if WEEKDAYS.iter().any(|day| head.eq_ignore_ascii_case(day)) {
        rest
    } else {
        text
    }
}

/// Rewrite ordinal day tokens ("1st", "22nd,") to bare numbers.
fn strip_ordinals(text: &str) -> String {
    text.split(' ')
        .map(strip_ordinal_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_ordinal_token(token: &str) -> String {
    let (body, tail) = match token.strip_suffix(',') {
        Some(body) => (body, ","),
        None => (token, ""),
    };
    let lower = body.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = lower.strip_suffix(suffix)
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return format!("{digits}{tail}");
        }
    }
    token.to_string()
}

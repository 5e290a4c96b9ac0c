use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Timezone used to resolve timestamp labels to a calendar date.
///
/// Bare dates ("2024-01-01") are never shifted; only labels carrying a
/// time component go through this.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Calendar date of an instant as observed in this timezone.
    pub(crate) fn civil_date(self, utc: DateTime<Utc>) -> NaiveDate {
        match self {
            Timezone::Local => utc.with_timezone(&Local).date_naive(),
            Timezone::Named(tz) => utc.with_timezone(&tz).date_naive(),
        }
    }
}

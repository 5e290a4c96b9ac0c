use chrono::NaiveDate;

use crate::consts::LONG_FORMAT;

/// Render a date long-form: full weekday, bare day number before the full
/// month name, four-digit year.
pub(crate) fn render_long(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

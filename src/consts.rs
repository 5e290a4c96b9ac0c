/// Class token that marks an element as a date label: `<span class="date">`
pub(crate) const DATE_CLASS: &str = "date";

/// Written back for labels whose text does not parse as a date
pub(crate) const INVALID_DATE: &str = "Invalid Date";

/// Long-form rendering used for every label: "Monday, 1 January 2024"
pub(crate) const LONG_FORMAT: &str = "%A, %-d %B %Y";

/// File extensions searched when an input path is a directory
pub(crate) const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

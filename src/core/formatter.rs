use crate::consts::INVALID_DATE;
use crate::date::{parse_label, render_long};
use crate::error::AppError;
use crate::utils::Timezone;

use super::LabelStore;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PassOptions {
    /// Resolves timestamp labels to a calendar date
    pub(crate) timezone: Timezone,
    /// Fail on the first unparsable label instead of writing the invalid
    /// indicator
    pub(crate) strict: bool,
}

/// Counters from one formatting pass over one store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PassReport {
    pub(crate) seen: usize,
    pub(crate) rewritten: usize,
    pub(crate) unchanged: usize,
    pub(crate) invalid: usize,
}

impl PassReport {
    pub(crate) fn add(&mut self, other: &PassReport) {
        self.seen += other.seen;
        self.rewritten += other.rewritten;
        self.unchanged += other.unchanged;
        self.invalid += other.invalid;
    }
}

/// Run the formatting pass: for each label in index order, read its text,
/// parse it as a calendar date and write back the long-form rendering.
///
/// The label count is snapshotted before the loop; labels the store did
/// not expose at that point are never touched. Each label is read once
/// and written once. Unparsable labels are written as the invalid
/// indicator, or abort the pass under strict mode.
pub(crate) fn format_labels(
    store: &mut dyn LabelStore,
    options: PassOptions,
) -> Result<PassReport, AppError> {
    let count = store.len();
    let mut report = PassReport::default();

    for index in 0..count {
        let Some(raw) = store.read(index).map(str::to_string) else {
            continue;
        };
        report.seen += 1;

        match parse_label(&raw, options.timezone) {
            Some(date) => {
                let rendered = render_long(date);
                if rendered == raw {
                    report.unchanged += 1;
                } else {
                    report.rewritten += 1;
                }
                store.write(index, rendered);
            }
            None => {
                if options.strict {
                    return Err(AppError::UnparsableLabel { text: raw });
                }
                report.invalid += 1;
                store.write(index, INVALID_DATE.to_string());
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;

    fn options() -> PassOptions {
        PassOptions {
            timezone: Timezone::Named(chrono_tz::UTC),
            strict: false,
        }
    }

    #[test]
    fn formats_valid_labels_long_form() {
        let mut store = MemoryStore::new(["2024-01-01", "2024-12-25"]);
        let report = format_labels(&mut store, options()).unwrap();

        assert_eq!(
            store.labels(),
            ["Monday, 1 January 2024", "Wednesday, 25 December 2024"]
        );
        assert_eq!(report.seen, 2);
        assert_eq!(report.rewritten, 2);
        assert_eq!(report.invalid, 0);
    }

    #[test]
    fn writes_invalid_indicator_for_garbage() {
        let mut store = MemoryStore::new(["not-a-date"]);
        let report = format_labels(&mut store, options()).unwrap();

        assert_eq!(store.labels(), ["Invalid Date"]);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.rewritten, 0);
    }

    #[test]
    fn empty_store_is_a_noop() {
        let mut store = MemoryStore::new(Vec::<String>::new());
        let report = format_labels(&mut store, options()).unwrap();

        assert_eq!(report, PassReport::default());
        assert!(store.labels().is_empty());
    }

    #[test]
    fn labels_are_processed_independently_in_order() {
        let mut store = MemoryStore::new(["2024-01-01", "bogus", "25/12/2024"]);
        let report = format_labels(&mut store, options()).unwrap();

        assert_eq!(
            store.labels(),
            [
                "Monday, 1 January 2024",
                "Invalid Date",
                "Wednesday, 25 December 2024"
            ]
        );
        assert_eq!(report.seen, 3);
        assert_eq!(report.rewritten, 2);
        assert_eq!(report.invalid, 1);
    }

    #[test]
    fn second_pass_is_a_fixed_point() {
        let mut store = MemoryStore::new(["2024-01-01"]);
        format_labels(&mut store, options()).unwrap();
        let first = store.labels().to_vec();

        let report = format_labels(&mut store, options()).unwrap();
        assert_eq!(store.labels(), first.as_slice());
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.rewritten, 0);
        assert_eq!(report.invalid, 0);
    }

    #[test]
    fn strict_mode_fails_on_unparsable_label() {
        let mut store = MemoryStore::new(["2024-01-01", "not-a-date"]);
        let err = format_labels(
            &mut store,
            PassOptions {
                strict: true,
                ..options()
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn report_add_accumulates() {
        let mut total = PassReport::default();
        total.add(&PassReport {
            seen: 2,
            rewritten: 1,
            unchanged: 1,
            invalid: 0,
        });
        total.add(&PassReport {
            seen: 1,
            rewritten: 0,
            unchanged: 0,
            invalid: 1,
        });
        assert_eq!(total.seen, 3);
        assert_eq!(total.rewritten, 1);
        assert_eq!(total.unchanged, 1);
        assert_eq!(total.invalid, 1);
    }
}

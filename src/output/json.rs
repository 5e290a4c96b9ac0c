use super::{FileOutcome, LabelRow};

pub(crate) fn labels_json(rows: &[LabelRow]) -> String {
    let output: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "file": row.file,
                "tag": row.tag,
                "raw": row.raw,
                "rendered": row.rendered,
                "status": row.status.as_str(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap()
}

pub(crate) fn check_json(outcomes: &[FileOutcome]) -> String {
    let output: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| {
            serde_json::json!({
                "file": outcome.path,
                "labels": outcome.report.seen,
                "rewritten": outcome.report.rewritten,
                "unchanged": outcome.report.unchanged,
                "invalid": outcome.report.invalid,
                "stale": outcome.modified,
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap()
}

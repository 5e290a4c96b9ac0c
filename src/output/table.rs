use comfy_table::{
    Cell, ContentArrangement, Table, modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::core::PassReport;

use super::format::{header_cell, right_cell, state_cell, status_cell};
use super::{FileOutcome, LabelRow};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub(crate) fn print_label_table(rows: &[LabelRow], use_color: bool) {
    let c = use_color;
    let mut table = base_table();
    table.set_header(vec![
        header_cell("File", c),
        header_cell("Tag", c),
        header_cell("Raw", c),
        header_cell("Rendered", c),
        header_cell("Status", c),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.file),
            Cell::new(&row.tag),
            Cell::new(&row.raw),
            Cell::new(&row.rendered),
            status_cell(row.status, c),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_check_table(outcomes: &[FileOutcome], use_color: bool) {
    let c = use_color;
    let mut table = base_table();
    table.set_header(vec![
        header_cell("File", c),
        header_cell("Labels", c),
        header_cell("Rewrite", c),
        header_cell("Invalid", c),
        header_cell("State", c),
    ]);
    for outcome in outcomes {
        table.add_row(vec![
            Cell::new(&outcome.path),
            right_cell(outcome.report.seen.to_string()),
            right_cell(outcome.report.rewritten.to_string()),
            right_cell(outcome.report.invalid.to_string()),
            state_cell(outcome.modified, c),
        ]);
    }
    println!("{table}");
}

/// One-line pass summary, on stderr so piped document output stays clean.
pub(crate) fn print_summary_line(total: &PassReport, files: usize, use_color: bool) {
    let text = summary_text(total, files);
    if use_color && total.invalid > 0 {
        eprintln!("\n  \x1b[33m{text}\x1b[0m\n");
    } else {
        eprintln!("\n  {text}\n");
    }
}

fn summary_text(total: &PassReport, files: usize) -> String {
    format!(
        "{} labels ({} rewritten, {} invalid) in {} file{}",
        total.seen,
        total.rewritten,
        total.invalid,
        files,
        if files == 1 { "" } else { "s" }
    )
}

use comfy_table::{Attribute, Cell, CellAlignment, Color};

use super::LabelStatus;

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color { cell.fg(Color::Cyan) } else { cell }
}

pub(super) fn right_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub(super) fn status_cell(status: LabelStatus, use_color: bool) -> Cell {
    let cell = Cell::new(status.as_str());
    if !use_color {
        return cell;
    }
    match status {
        LabelStatus::Rewritten => cell.fg(Color::Green),
        LabelStatus::Unchanged => cell.fg(Color::DarkGrey),
        LabelStatus::Invalid => cell.fg(Color::Red),
    }
}

pub(super) fn state_cell(modified: bool, use_color: bool) -> Cell {
    let cell = Cell::new(if modified { "stale" } else { "clean" });
    if !use_color {
        return cell;
    }
    if modified {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}

//! Date label interpretation
//!
//! A permissive parse chain turns label text into a calendar date, and a
//! single fixed rendering turns it back into display text.

pub(crate) mod parse;
pub(crate) mod render;

pub(crate) use parse::parse_label;
pub(crate) use render::render_long;

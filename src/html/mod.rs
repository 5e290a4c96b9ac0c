//! HTML document boundary
//!
//! A tolerant forward scan finds elements carrying the label class and a
//! document-backed store splices rewritten text into their inner ranges.
//! Markup outside matched elements is never touched. Case-insensitive tag
//! detection, local scanning within element blocks, no full-document
//! regexes.

mod scan;
mod store;

pub(crate) use store::DocumentStore;

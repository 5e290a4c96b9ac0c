use crate::core::LabelStore;

use super::scan::{LabelSpan, escape_text, scan_labels};

#[derive(Debug)]
struct DocLabel {
    span: LabelSpan,
    replacement: Option<String>,
}

/// A scanned HTML document exposed as a label store.
///
/// Reads return the text content captured at scan time, so writes during
/// a pass never feed back into later reads. Writes are deferred: the
/// rewritten document is produced once at the end by splicing
/// replacements into the matched inner ranges, back to front, leaving
/// every other byte of the source untouched.
#[derive(Debug)]
pub(crate) struct DocumentStore {
    html: String,
    labels: Vec<DocLabel>,
}

impl DocumentStore {
    pub(crate) fn parse(html: String, class_name: &str) -> Self {
        let labels = scan_labels(&html, class_name)
            .into_iter()
            .map(|span| DocLabel {
                span,
                replacement: None,
            })
            .collect();
        DocumentStore { html, labels }
    }

    /// (tag, raw text, replacement) for every matched label, in document
    /// order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str, Option<&str>)> {
        self.labels.iter().map(|label| {
            (
                label.span.tag.as_str(),
                label.span.text.as_str(),
                label.replacement.as_deref(),
            )
        })
    }

    /// True when splicing would produce a document that differs from the
    /// source.
    pub(crate) fn is_modified(&self) -> bool {
        (0..self.labels.len()).any(|index| self.splice_for(index).is_some())
    }

    pub(crate) fn into_html(mut self) -> String {
        for index in (0..self.labels.len()).rev() {
            if let Some(escaped) = self.splice_for(index) {
                let range = self.labels[index].span.inner.clone();
                self.html.replace_range(range, &escaped);
            }
        }
        self.html
    }

    /// Escaped replacement text, or None when the inner range already
    /// holds exactly that text.
    fn splice_for(&self, index: usize) -> Option<String> {
        let label = &self.labels[index];
        let replacement = label.replacement.as_ref()?;
        let escaped = escape_text(replacement);
        (escaped != self.html[label.span.inner.clone()]).then_some(escaped)
    }
}

impl LabelStore for DocumentStore {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn read(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|label| label.span.text.as_str())
    }

    fn write(&mut self, index: usize, text: String) {
        if let Some(label) = self.labels.get_mut(index) {
            label.replacement = Some(text);
        }
    }
}

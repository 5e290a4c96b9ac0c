use std::ops::Range;

/// Elements that never have an inner text range
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// One matched element: its tag, the byte range of its inner markup and
/// the text content captured at scan time.
#[derive(Debug, Clone)]
pub(crate) struct LabelSpan {
    pub(crate) tag: String,
    pub(crate) inner: Range<usize>,
    pub(crate) text: String,
}

/// Single forward pass over the document collecting every element whose
/// class list carries `class_name`, in document order.
///
/// Labels nested inside an already-matched label are skipped so spans
/// never overlap. Comments, `<script>` and `<style>` bodies are opaque.
/// Malformed markup ends the scan quietly; an unterminated element simply
/// yields no span.
pub(crate) fn scan_labels(html: &str, class_name: &str) -> Vec<LabelSpan> {
    let mut labels = Vec::new();
    let mut pos = 0;

    while let Some(i) = html[pos..].find('<').map(|i| pos + i) {
        let after = &html[i..];

        if after.starts_with("<!--") {
            match after.find("-->") {
                Some(j) => pos = i + j + 3,
                None => break,
            }
            continue;
        }
        if after.starts_with("</") || after.starts_with("<!") || after.starts_with("<?") {
            match after.find('>') {
                Some(j) => pos = i + j + 1,
                None => break,
            }
            continue;
        }

        let bytes = after.as_bytes();
        if bytes.len() < 2 || !bytes[1].is_ascii_alphabetic() {
            pos = i + 1;
            continue;
        }

        let mut name_end = 1;
        while name_end < bytes.len()
            && (bytes[name_end].is_ascii_alphanumeric() || bytes[name_end] == b'-')
        {
            name_end += 1;
        }
        let tag = after[1..name_end].to_ascii_lowercase();

        let Some(gt_rel) = find_tag_end(after, name_end) else {
            break;
        };
        let gt = i + gt_rel;
        let after_open = gt + 1;
        let self_closing = html[..gt].ends_with('/');

        if !self_closing && (tag == "script" || tag == "style") {
            pos = skip_raw_text(html, after_open, &tag);
            continue;
        }
        if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
            pos = after_open;
            continue;
        }

        let matched = class_attr(&after[name_end..gt_rel])
            .is_some_and(|classes| classes.split_whitespace().any(|token| token == class_name));
        if !matched {
            pos = after_open;
            continue;
        }

        match find_inner_end(html, after_open, &tag) {
            Some((inner_end, after_close)) => {
                labels.push(LabelSpan {
                    tag,
                    inner: after_open..inner_end,
                    text: text_content(&html[after_open..inner_end]),
                });
                pos = after_close;
            }
            None => pos = after_open,
        }
    }

    labels
}

/// Position of the '>' closing an open tag, skipping quoted attribute
/// values.
fn find_tag_end(tag: &str, from: usize) -> Option<usize> {
    let bytes = tag.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i),
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Value of the class attribute, tolerant of attribute order, stray
/// whitespace and all three quoting styles.
fn class_attr(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = &raw[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = "";
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                value = &raw[value_start..i];
                if i < bytes.len() {
                    i += 1;
                }
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = &raw[value_start..i];
            }
        }
        if name.eq_ignore_ascii_case("class") {
            return Some(value);
        }
    }
    None
}

/// End of the inner range of an element opened just before `from`:
/// returns (inner end, position after the close tag). Depth-tracks nested
/// same-name tags so `<div><div>…</div></div>` closes at the right one.
fn find_inner_end(html: &str, from: usize, tag: &str) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(i) = html[pos..].find('<').map(|i| pos + i) {
        let after = &html[i..];
        if after.starts_with("<!--") {
            match after.find("-->") {
                Some(j) => pos = i + j + 3,
                None => return None,
            }
            continue;
        }
        if let Some(rest) = after.strip_prefix("</") {
            if tag_name_matches(rest, tag) {
                let gt = i + after.find('>')?;
                depth -= 1;
                if depth == 0 {
                    return Some((i, gt + 1));
                }
                pos = gt + 1;
            } else {
                pos = i + 2;
            }
            continue;
        }
        if tag_name_matches(&after[1..], tag) {
            let gt = i + find_tag_end(after, 1)?;
            if !html[..gt].ends_with('/') {
                depth += 1;
            }
            pos = gt + 1;
            continue;
        }
        pos = i + 1;
    }
    None
}

fn tag_name_matches(rest: &str, tag: &str) -> bool {
    if rest.len() < tag.len()
        || !rest.as_bytes()[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
    {
        return false;
    }
    match rest.as_bytes().get(tag.len()) {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || *b == b'-'),
    }
}

/// Skip past the closing tag of a raw-text element (`script`, `style`).
fn skip_raw_text(html: &str, from: usize, tag: &str) -> usize {
    let close = format!("</{tag}");
    match find_ci(html, &close, from) {
        Some(c) => match html[c..].find('>') {
            Some(j) => c + j + 1,
            None => html.len(),
        },
        None => html.len(),
    }
}

fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from >= h.len() {
        return None;
    }
    let last = h.len().checked_sub(n.len())?;
    (from..=last).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Text content of an inner range: tags and comments dropped, entities
/// decoded, whitespace collapsed.
pub(crate) fn text_content(inner: &str) -> String {
    let mut text = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(i) = rest.find('<') {
        text.push_str(&rest[..i]);
        let after = &rest[i..];
        if let Some(body) = after.strip_prefix("<!--") {
            rest = match body.find("-->") {
                Some(j) => &body[j + 3..],
                None => "",
            };
        } else {
            rest = match after.find('>') {
                Some(j) => &after[j + 1..],
                None => "",
            };
        }
    }
    text.push_str(rest);
    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the named entities that show up in text content plus numeric
/// references. Unknown entities pass through literally.
pub(crate) fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let after = &rest[i..];
        match after.find(';') {
            Some(end) if end > 1 && end <= 10 => match decode_entity(&after[1..end]) {
                Some(decoded) => {
                    out.push(decoded);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &after[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

/// Escape text for splicing back into an element's inner range.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

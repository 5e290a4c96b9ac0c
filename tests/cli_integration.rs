use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

const PAGE: &str = r#"<html><body>
<p>posted on <span class="date">2024-01-01</span></p>
<div class="date">2024-12-25</div>
<div class="date">not-a-date</div>
</body></html>
"#;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

/// Run the binary with HOME pinned to the scratch dir so a developer's
/// real config file cannot leak into assertions.
fn run_datebrush(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let output = Command::new(env!("CARGO_BIN_EXE_datebrush"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .expect("run datebrush");
    (output.status.success(), output.stdout, output.stderr)
}

#[test]
fn rewrite_prints_formatted_document_to_stdout() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, PAGE);

    let (ok, stdout, stderr) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let out = String::from_utf8(stdout).expect("utf8");
    assert!(out.contains(r#"<span class="date">Monday, 1 January 2024</span>"#));
    assert!(out.contains(r#"<div class="date">Wednesday, 25 December 2024</div>"#));
    assert!(out.contains(r#"<div class="date">Invalid Date</div>"#));
    assert!(out.contains("<p>posted on "));

    // stdout mode leaves the file alone
    assert_eq!(fs::read_to_string(&page).expect("read back"), PAGE);
}

#[test]
fn bare_paths_default_to_rewrite() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, r#"<div class="date">2024-01-01</div>"#);

    let (ok, stdout, _) = run_datebrush(
        &[page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok);
    assert_eq!(
        String::from_utf8_lossy(&stdout),
        r#"<div class="date">Monday, 1 January 2024</div>"#
    );
}

#[test]
fn write_edits_in_place_and_is_idempotent() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, PAGE);

    let (ok, _, stderr) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--write", "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let first = fs::read_to_string(&page).expect("read back");
    assert!(first.contains("Monday, 1 January 2024"));
    assert!(first.contains("Invalid Date"));

    // a second pass settles: the formatted document checks out clean...
    let (ok, _, _) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--write", "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok);
    let second = fs::read_to_string(&page).expect("read back");
    // ...except the invalid indicator, which stays invalid by design
    assert_eq!(first, second);
}

#[test]
fn check_exits_nonzero_while_stale_and_zero_once_clean() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, r#"<div class="date">2024-01-01</div>"#);

    let (ok, _, _) = run_datebrush(
        &["check", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(!ok, "unformatted file must report stale");

    let (ok, _, _) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--write", "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok);

    let (ok, _, _) = run_datebrush(
        &["check", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok, "formatted file must check out clean");
}

#[test]
fn check_json_reports_counts_and_state() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, PAGE);

    let (_, stdout, stderr) = run_datebrush(
        &["check", page.to_str().unwrap(), "--json", "--timezone", "UTC"],
        root.path(),
    );
    let json: Value =
        serde_json::from_slice(&stdout).unwrap_or_else(|_| panic!("json; stderr: {}", String::from_utf8_lossy(&stderr)));
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["labels"].as_i64(), Some(3));
    assert_eq!(arr[0]["rewritten"].as_i64(), Some(2));
    assert_eq!(arr[0]["invalid"].as_i64(), Some(1));
    assert_eq!(arr[0]["stale"].as_bool(), Some(true));
}

#[test]
fn list_json_reports_each_label_in_document_order() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, PAGE);

    let (ok, stdout, stderr) = run_datebrush(
        &["list", page.to_str().unwrap(), "--json", "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 3);

    assert_eq!(arr[0]["tag"].as_str(), Some("span"));
    assert_eq!(arr[0]["raw"].as_str(), Some("2024-01-01"));
    assert_eq!(arr[0]["rendered"].as_str(), Some("Monday, 1 January 2024"));
    assert_eq!(arr[0]["status"].as_str(), Some("rewritten"));

    assert_eq!(arr[1]["raw"].as_str(), Some("2024-12-25"));
    assert_eq!(
        arr[1]["rendered"].as_str(),
        Some("Wednesday, 25 December 2024")
    );

    assert_eq!(arr[2]["raw"].as_str(), Some("not-a-date"));
    assert_eq!(arr[2]["status"].as_str(), Some("invalid"));
}

#[test]
fn timestamp_labels_resolve_through_the_display_timezone() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(
        &page,
        r#"<div class="date">2024-01-01T23:30:00Z</div>"#,
    );

    let (ok, stdout, _) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--timezone", "Asia/Tokyo"],
        root.path(),
    );
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("Tuesday, 2 January 2024"));
}

#[test]
fn strict_mode_fails_on_unparsable_label() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, PAGE);

    let (ok, _, stderr) = run_datebrush(
        &[
            "rewrite",
            page.to_str().unwrap(),
            "--write",
            "--strict",
            "--timezone",
            "UTC",
        ],
        root.path(),
    );
    assert!(!ok);
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("not-a-date"), "stderr: {err}");
    // strict aborts before any in-place write could happen
    assert_eq!(fs::read_to_string(&page).expect("read back"), PAGE);
}

#[test]
fn document_without_labels_passes_through_untouched() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("plain.html");
    let content = "<html><body><p>no dates here</p></body></html>";
    write_file(&page, content);

    let (ok, stdout, stderr) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok);
    assert_eq!(String::from_utf8_lossy(&stdout), content);
    assert!(String::from_utf8_lossy(&stderr).contains("0 labels"));

    let (ok, _, _) = run_datebrush(
        &["check", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok, "no labels means nothing to rewrite");
}

#[test]
fn class_flag_overrides_the_selector_token() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(
        &page,
        r#"<div class="stamp">2024-01-01</div><div class="date">2024-01-01</div>"#,
    );

    let (ok, stdout, _) = run_datebrush(
        &[
            "rewrite",
            page.to_str().unwrap(),
            "--class",
            "stamp",
            "--timezone",
            "UTC",
        ],
        root.path(),
    );
    assert!(ok);
    let out = String::from_utf8_lossy(&stdout);
    assert!(out.contains(r#"<div class="stamp">Monday, 1 January 2024</div>"#));
    // the default token is no longer matched
    assert!(out.contains(r#"<div class="date">2024-01-01</div>"#));
}

#[test]
fn directory_input_discovers_html_files() {
    let root = TempDir::new().expect("temp dir");
    let pages = root.path().join("pages");
    write_file(
        &pages.join("a.html"),
        r#"<div class="date">2024-01-01</div>"#,
    );
    write_file(
        &pages.join("nested").join("b.htm"),
        r#"<div class="date">2024-12-25</div>"#,
    );
    write_file(&pages.join("notes.txt"), "not html");

    let (_, stdout, _) = run_datebrush(
        &["check", pages.to_str().unwrap(), "--json", "--timezone", "UTC"],
        root.path(),
    );
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 2);
}

#[test]
fn config_file_supplies_defaults() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(&page, r#"<div class="stamp">2024-01-01</div>"#);
    write_file(
        &root
            .path()
            .join(".config")
            .join("datebrush")
            .join("config.toml"),
        "class = \"stamp\"\ntimezone = \"UTC\"\n",
    );

    let (ok, stdout, stderr) = run_datebrush(&["rewrite", page.to_str().unwrap()], root.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    assert!(
        String::from_utf8_lossy(&stdout).contains("Monday, 1 January 2024"),
        "config class token should be honored"
    );
}

#[test]
fn markup_outside_labels_is_byte_identical() {
    let root = TempDir::new().expect("temp dir");
    let page = root.path().join("page.html");
    write_file(
        &page,
        "<html>\n  <body class=\"posts\">\n    <div class=\"date\">2024-01-01</div>\n  </body>\n</html>\n",
    );

    let (ok, stdout, _) = run_datebrush(
        &["rewrite", page.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(ok);
    assert_eq!(
        String::from_utf8_lossy(&stdout),
        "<html>\n  <body class=\"posts\">\n    <div class=\"date\">Monday, 1 January 2024</div>\n  </body>\n</html>\n"
    );
}

#[test]
fn missing_file_fails_with_context() {
    let root = TempDir::new().expect("temp dir");
    let missing = root.path().join("gone.html");

    let (ok, _, stderr) = run_datebrush(
        &["rewrite", missing.to_str().unwrap(), "--timezone", "UTC"],
        root.path(),
    );
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("gone.html"));
}

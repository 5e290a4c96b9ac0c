use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::cli::{Action, Cli, parse_command};
use crate::consts::{HTML_EXTENSIONS, INVALID_DATE};
use crate::core::{LabelStore, PassOptions, PassReport, format_labels};
use crate::error::AppError;
use crate::html::DocumentStore;
use crate::output::{
    FileOutcome, LabelRow, LabelStatus, check_json, labels_json, print_check_table,
    print_label_table, print_summary_line,
};
use crate::utils::{Timezone, scan_debug_enabled};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) timezone: Timezone,
}

/// Everything one pass over one document produced
struct ProcessedFile {
    outcome: FileOutcome,
    rows: Vec<LabelRow>,
    document: String,
}

pub(crate) fn run(cli: &Cli) -> i32 {
    let timezone = match Timezone::parse(cli.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    let (action, paths) = parse_command(&cli.command, &cli.paths);
    if paths.is_empty() {
        eprintln!("No input paths given. Try: datebrush page.html");
        return 1;
    }

    let files = match collect_files(&paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    if files.is_empty() {
        println!("No HTML files found.");
        return 0;
    }

    let ctx = CommandContext { cli, timezone };
    match action {
        Action::Rewrite => handle_rewrite(&files, &ctx),
        Action::Check => handle_check(&files, &ctx),
        Action::List => handle_list(&files, &ctx),
    }
}

/// Expand input paths: directories are searched recursively for HTML
/// files, glob patterns expanded, plain paths taken as given.
fn collect_files(paths: &[String]) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for raw in paths {
        let path = Path::new(raw);
        if path.is_dir() {
            for ext in HTML_EXTENSIONS {
                let pattern = format!("{}/**/*.{ext}", raw.trim_end_matches('/'));
                expand_glob(&pattern, &mut files)?;
            }
        } else if raw.contains(['*', '?', '[']) {
            expand_glob(raw, &mut files)?;
        } else {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn expand_glob(pattern: &str, files: &mut Vec<PathBuf>) -> Result<(), AppError> {
    let entries = glob::glob(pattern).map_err(|source| AppError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })?;
    for entry in entries.flatten() {
        if entry.is_file() {
            files.push(entry);
        }
    }
    Ok(())
}

fn process_file(path: &Path, ctx: &CommandContext<'_>) -> Result<ProcessedFile, AppError> {
    let html = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut store = DocumentStore::parse(html, ctx.cli.class_name());
    if scan_debug_enabled() {
        eprintln!("{}: {} date labels", path.display(), store.len());
    }

    let report = format_labels(
        &mut store,
        PassOptions {
            timezone: ctx.timezone,
            strict: ctx.cli.strict,
        },
    )?;

    let rows = build_rows(path, &store);
    let outcome = FileOutcome {
        path: path.display().to_string(),
        report,
        modified: store.is_modified(),
    };
    Ok(ProcessedFile {
        outcome,
        rows,
        document: store.into_html(),
    })
}

fn build_rows(path: &Path, store: &DocumentStore) -> Vec<LabelRow> {
    store
        .entries()
        .map(|(tag, raw, replacement)| {
            let rendered = replacement.unwrap_or(raw).to_string();
            let status = if rendered == INVALID_DATE {
                LabelStatus::Invalid
            } else if rendered == raw {
                LabelStatus::Unchanged
            } else {
                LabelStatus::Rewritten
            };
            LabelRow {
                file: path.display().to_string(),
                tag: tag.to_string(),
                raw: raw.to_string(),
                rendered,
                status,
            }
        })
        .collect()
}

fn process_all<'a>(
    files: &'a [PathBuf],
    ctx: &CommandContext<'_>,
) -> Vec<(&'a PathBuf, Result<ProcessedFile, AppError>)> {
    files
        .par_iter()
        .map(|path| (path, process_file(path, ctx)))
        .collect()
}

fn handle_rewrite(files: &[PathBuf], ctx: &CommandContext<'_>) -> i32 {
    let mut total = PassReport::default();
    let mut failed = false;

    for (path, result) in process_all(files, ctx) {
        match result {
            Ok(processed) => {
                total.add(&processed.outcome.report);
                if ctx.cli.write {
                    if processed.outcome.modified
                        && let Err(source) = fs::write(path, &processed.document)
                    {
                        let e = AppError::Write {
                            path: path.clone(),
                            source,
                        };
                        eprintln!("{e}");
                        failed = true;
                    }
                } else {
                    print!("{}", processed.document);
                }
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    print_summary_line(&total, files.len(), ctx.cli.use_color());
    if failed { 1 } else { 0 }
}

fn handle_check(files: &[PathBuf], ctx: &CommandContext<'_>) -> i32 {
    let mut outcomes = Vec::new();
    let mut failed = false;

    for (path, result) in process_all(files, ctx) {
        match result {
            Ok(processed) => outcomes.push(processed.outcome),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    let stale = outcomes.iter().any(|outcome| outcome.modified);
    if ctx.cli.json {
        println!("{}", check_json(&outcomes));
    } else {
        print_check_table(&outcomes, ctx.cli.use_color());
        let mut total = PassReport::default();
        for outcome in &outcomes {
            total.add(&outcome.report);
        }
        print_summary_line(&total, outcomes.len(), ctx.cli.use_color());
    }

    if failed || stale { 1 } else { 0 }
}

fn handle_list(files: &[PathBuf], ctx: &CommandContext<'_>) -> i32 {
    let mut rows = Vec::new();
    let mut failed = false;

    for (path, result) in process_all(files, ctx) {
        match result {
            Ok(processed) => rows.extend(processed.rows),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    if ctx.cli.json {
        println!("{}", labels_json(&rows));
    } else {
        print_label_table(&rows, ctx.cli.use_color());
    }

    if failed { 1 } else { 0 }
}

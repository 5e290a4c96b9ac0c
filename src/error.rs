use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid glob pattern \"{pattern}\": {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Unparsable date label \"{text}\"")]
    UnparsableLabel { text: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Rewrite date labels in the given documents (default)
    Rewrite {
        /// Input files, directories or glob patterns
        #[arg(value_name = "PATH")]
        paths: Vec<String>,
    },
    /// Report which documents still need rewriting, without writing
    Check {
        /// Input files, directories or glob patterns
        #[arg(value_name = "PATH")]
        paths: Vec<String>,
    },
    /// List every matched date label and its rendering
    List {
        /// Input files, directories or glob patterns
        #[arg(value_name = "PATH")]
        paths: Vec<String>,
    },
}

/// Normalized command kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Rewrite,
    Check,
    List,
}

/// Normalize the CLI into an action and its input paths. Bare paths with
/// no subcommand mean rewrite.
pub(crate) fn parse_command(command: &Option<Commands>, top_level: &[String]) -> (Action, Vec<String>) {
    match command {
        Some(Commands::Rewrite { paths }) => (Action::Rewrite, paths.clone()),
        Some(Commands::Check { paths }) => (Action::Check, paths.clone()),
        Some(Commands::List { paths }) => (Action::List, paths.clone()),
        None => (Action::Rewrite, top_level.to_vec()),
    }
}

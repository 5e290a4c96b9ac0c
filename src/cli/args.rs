//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::consts::DATE_CLASS;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "datebrush")]
#[command(about = "Rewrite date labels in HTML documents as long-form dates", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Input files, directories or glob patterns (rewrites when no
    /// subcommand is given)
    #[arg(value_name = "PATH")]
    pub(crate) paths: Vec<String>,

    /// Edit files in place instead of printing to stdout
    #[arg(short, long, global = true)]
    pub(crate) write: bool,

    /// Fail on the first unparsable date label instead of writing the
    /// invalid indicator
    #[arg(long, global = true)]
    pub(crate) strict: bool,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Class token that marks a date label
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) class: Option<String>,

    /// Timezone for resolving timestamp labels (e.g. "Europe/London",
    /// "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show scan details)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // Boolean flags: config only applies if CLI is at the false default
        if !self.write && config.write {
            self.write = true;
        }
        if !self.strict && config.strict {
            self.strict = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(ref color) = config.color
            && self.color == ColorMode::Auto
        {
            match color.to_lowercase().as_str() {
                "always" => self.color = ColorMode::Always,
                "never" => self.color = ColorMode::Never,
                _ => {}
            }
        }

        // String options: only apply if CLI didn't set them
        if self.class.is_none() {
            self.class = config.class.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn class_name(&self) -> &str {
        self.class.as_deref().unwrap_or(DATE_CLASS)
    }
}

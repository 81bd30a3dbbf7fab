//! CLI argument definitions for the canvas CSS tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "canvas-css",
    version,
    about = "Inspect and edit the CSS rules stored for a canvas",
    long_about = "Inspect and edit the CSS rules stored for a page-building canvas.\n\n\
                  Rules live in a JSON storage file holding rendered CSS and/or\n\
                  serialized rule descriptors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show every stored rule.
    List(StorageArgs),

    /// Add a rule (or reuse the existing one) and set style properties on it.
    Add(AddArgs),

    /// Print the stored rules as CSS.
    Render(StorageArgs),

    /// Read rules from a stylesheet into the storage file.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct StorageArgs {
    /// Storage file holding the rules.
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Selector token (`name` or `.name` for classes, `#name` for ids).
    #[arg(
        long = "selector",
        short = 's',
        value_name = "TOKEN",
        required = true,
        allow_hyphen_values = true
    )]
    pub selectors: Vec<String>,

    /// Pseudo-state, e.g. `hover`.
    #[arg(long = "state")]
    pub state: Option<String>,

    /// Responsive breakpoint, e.g. `480px`.
    #[arg(long = "width", value_name = "MAX_WIDTH")]
    pub width: Option<String>,

    /// Style declaration as `property=value`. Repeatable.
    #[arg(long = "style", value_name = "PROPERTY=VALUE")]
    pub styles: Vec<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Stylesheet to read.
    #[arg(long = "css", value_name = "PATH")]
    pub css: PathBuf,

    /// Replace every stored rule instead of merging into them.
    ///
    /// Merging reuses rules with the same selectors, state and width and
    /// overwrites the imported properties on them.
    #[arg(long = "replace")]
    pub replace: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// covpaint: render source code painted with line and branch coverage
#[derive(Parser, Debug)]
#[command(name = "covpaint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render coverage-painted HTML rows for source files
    Render(RenderArgs),

    /// Print per-file coverage summaries
    Summary(SummaryArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Coverage snapshot (JSON)
    pub snapshot: PathBuf,

    /// Directory the snapshot paths are relative to
    #[arg(short, long, default_value = ".")]
    pub source_root: PathBuf,

    /// Only render these snapshot paths (repeatable)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Output directory; rows go to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of rendering threads (0 = one per CPU)
    #[arg(short = 'j', long, default_value = "0")]
    pub jobs: usize,
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Coverage snapshot (JSON)
    pub snapshot: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: SummaryFormat,
}

/// Summary output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

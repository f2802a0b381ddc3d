//! covpaint CLI Library
//!
//! Command-line front end for covpaint: loads a coverage snapshot and renders
//! the painted source rows or per-file summaries.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, RenderArgs, SummaryArgs, SummaryFormat};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;

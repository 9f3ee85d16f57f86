//! chums-runner library
//!
//! Command-line front end for the ChuMS end-to-end harness: lists the spec
//! catalogue, runs it in Chromium (or against the simulated app), and
//! writes a JSON run report.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, ListArgs, RunArgs};
pub use config::{apply_run_args, harness_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{catalogue_lines, result_line, ProgressReporter};
pub use runner::{list_specs, run_specs, show_config, RunSummary};

//! CLI module for tallybook
//!
//! Provides the command-line interface:
//! - serve: bind the HTTP API and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve};
pub use errors::{CliError, CliResult};

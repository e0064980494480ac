//! CLI argument definitions using clap
//!
//! Commands:
//! - tallybook serve --bind <addr> --max-limit <n>

use clap::{Parser, Subcommand};

use crate::api::DEFAULT_MAX_LIMIT;

/// tallybook - a multi-tenant bookkeeping backend
#[derive(Parser, Debug)]
#[command(name = "tallybook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,

        /// Hard cap on requested page sizes
        #[arg(long, default_value_t = DEFAULT_MAX_LIMIT)]
        max_limit: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

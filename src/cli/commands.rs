//! CLI command implementations
//!
//! `serve` builds the in-memory stores and the router, then hands the
//! listener to axum. The tokio runtime is created here so that `main`
//! stays free of async machinery.

use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use crate::api::{router, AppState};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch. This is the only entry point `main` calls.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { bind, max_limit } => serve(&bind, max_limit),
    }
}

/// Boot the API server and block until it exits.
pub fn serve(bind: &str, max_limit: i64) -> CliResult<()> {
    if max_limit < 1 {
        return Err(CliError::InvalidOption(format!(
            "max-limit must be at least 1, got {max_limit}"
        )));
    }

    let state = AppState::in_memory_with_cap(max_limit);
    let app = router(state);

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        let listener = TcpListener::bind(bind).await.map_err(|e| CliError::Bind {
            addr: bind.to_string(),
            source: e,
        })?;

        let max_limit_str = max_limit.to_string();
        Logger::info(
            "server_started",
            &[("bind", bind), ("max_limit", max_limit_str.as_str())],
        );

        axum::serve(listener, app).await?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_rejects_zero_cap() {
        let err = serve("127.0.0.1:0", 0).unwrap_err();
        assert!(matches!(err, CliError::InvalidOption(_)));
    }
}

//! CLI-specific error types
//!
//! All CLI errors are fatal; the process exits non-zero.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// The bind address could not be parsed or bound
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    /// Invalid option value
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The serve loop terminated with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_address() {
        let err = CliError::Bind {
            addr: "127.0.0.1:3000".to_string(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:3000"));
        assert!(msg.contains("in use"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: CliError = io::Error::new(io::ErrorKind::Other, "closed").into();
        assert!(matches!(err, CliError::Serve(_)));
    }
}

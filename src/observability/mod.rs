//! # Observability
//!
//! Structured request and write-path logging.

mod logger;

pub use logger::{Level, Logger};

//! # Structured Logger
//!
//! Synchronous single-line JSON logs. One log line is one event; keys are
//! emitted in deterministic (alphabetical) order so log diffs stay stable
//! across runs.

use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::Utc;

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Synchronous JSON logger. Info and below go to stdout, warnings and
/// errors to stderr. No buffering; each event is one write.
pub struct Logger;

impl Logger {
    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::write(Level::Debug, event, fields, &mut io::stdout());
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::write(Level::Info, event, fields, &mut io::stdout());
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::write(Level::Warn, event, fields, &mut io::stderr());
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write(Level::Error, event, fields, &mut io::stderr());
    }

    fn write<W: Write>(level: Level, event: &str, fields: &[(&str, &str)], out: &mut W) {
        let line = Self::render(level, event, fields);
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }

    /// Render one event as a single JSON line.
    fn render(level: Level, event: &str, fields: &[(&str, &str)]) -> String {
        let mut map = BTreeMap::new();
        map.insert("event", event.to_string());
        map.insert("level", level.as_str().to_string());
        map.insert("ts", Utc::now().to_rfc3339());
        for (key, value) in fields {
            map.insert(key, (*value).to_string());
        }

        // BTreeMap keys serialize alphabetically; serde_json handles escaping.
        let mut line = serde_json::to_string(&map).unwrap_or_else(|_| String::from("{}"));
        line.push('\n');
        line
    }
}

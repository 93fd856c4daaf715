//! Run log for webeval.
//!
//! Append-only NDJSON log (one JSON object per line) recording each agent
//! launch and configuration write, stored as `runs.ndjson` in the config
//! directory. Each record carries:
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: the operation performed (setup, run, eval)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `details`: freeform object with operation-specific details
//!
//! Logging is best-effort: callers print a warning on failure and continue.

use crate::error::{Result, WebevalError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run log filename inside the config directory.
pub const RUN_LOG_FILE_NAME: &str = "runs.ndjson";

/// Operations that are recorded in the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Host-tool configuration written
    Setup,
    /// Direct agent launch with inherited streams
    Run,
    /// Configure-then-launch with captured output
    Eval,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Setup => write!(f, "setup"),
            EventAction::Run => write!(f, "run"),
            EventAction::Eval => write!(f, "eval"),
        }
    }
}

/// One run log record, serialized as a single JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The operation that was performed.
    pub action: EventAction,

    /// Who performed it (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with operation-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            WebevalError::ConfigError(format!("failed to serialize run log event: {}", e))
        })
    }
}

/// Actor string for event metadata.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Path of the run log inside the given config directory.
pub fn run_log_path(config_dir: &Path) -> PathBuf {
    config_dir.join(RUN_LOG_FILE_NAME)
}

/// Append an event to the run log in the given config directory.
///
/// The directory and file are created if missing. Each append results in
/// one JSON line with a trailing newline.
pub fn append_event(config_dir: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if !config_dir.exists() {
        fs::create_dir_all(config_dir).map_err(|e| {
            WebevalError::ConfigError(format!(
                "failed to create config directory '{}': {}",
                config_dir.display(),
                e
            ))
        })?;
    }

    let log_path = run_log_path(config_dir);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| {
            WebevalError::ConfigError(format!(
                "failed to open run log '{}': {}",
                log_path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        WebevalError::ConfigError(format!(
            "failed to write to run log '{}': {}",
            log_path.display(),
            e
        ))
    })?;

    Ok(())
}

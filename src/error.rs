//! Error types for the webeval CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for webeval operations.
///
/// Each variant maps to a specific exit code so callers can distinguish
/// bad invocations from configuration and agent failures.
#[derive(Error, Debug)]
pub enum WebevalError {
    /// User provided invalid arguments or the environment is unusable.
    #[error("{0}")]
    UserError(String),

    /// Writing the host-tool configuration failed.
    #[error("Configuration failed: {0}")]
    ConfigError(String),

    /// The external agent process failed.
    #[error("Agent failed: {0}")]
    AgentError(String),
}

impl WebevalError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WebevalError::UserError(_) => exit_codes::USER_ERROR,
            WebevalError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            WebevalError::AgentError(_) => exit_codes::AGENT_FAILURE,
        }
    }
}

/// Result type alias for webeval operations.
pub type Result<T> = std::result::Result<T, WebevalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = WebevalError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = WebevalError::ConfigError("cannot write mcp.json".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn agent_error_has_correct_exit_code() {
        let err = WebevalError::AgentError("exit status 1".to_string());
        assert_eq!(err.exit_code(), exit_codes::AGENT_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = WebevalError::ConfigError("home directory not found".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration failed: home directory not found"
        );

        let err = WebevalError::AgentError("webEvalAgent exited with status 2".to_string());
        assert_eq!(
            err.to_string(),
            "Agent failed: webEvalAgent exited with status 2"
        );
    }
}

//! Exit code constants for the webeval CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing API key, unusable environment)
//! - 2: Configuration failure (mcp.json could not be written)
//! - 3: Agent failure (webEvalAgent missing or exited non-zero)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing API key, or unusable environment.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: the host-tool config could not be written.
pub const CONFIG_FAILURE: i32 = 2;

/// Agent failure: the external agent was missing or exited non-zero.
pub const AGENT_FAILURE: i32 = 3;

//! Host-tool configuration for the web-eval-agent MCP server.
//!
//! This module defines the `mcp.json` document written into the per-user
//! `.cursor` directory. The file tells a host tool how to launch the agent
//! (command, arguments, environment); webeval itself never reads it back.
//!
//! # File Format
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "web-eval-agent": {
//!       "command": "uvx",
//!       "args": [
//!         "--from",
//!         "git+https://github.com/Operative-Sh/web-eval-agent.git",
//!         "webEvalAgent"
//!       ],
//!       "env": {
//!         "OPERATIVE_API_KEY": "..."
//!       }
//!     }
//!   }
//! }
//! ```

use crate::error::{Result, WebevalError};
use crate::fs::atomic_write_file;
use crate::invocation::{AGENT_ENTRYPOINT, AGENT_SOURCE, API_KEY_VAR, DEFAULT_RUNNER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-user directory the host tool reads its configuration from.
pub const CONFIG_DIR_NAME: &str = ".cursor";

/// Configuration filename inside the config directory.
pub const CONFIG_FILE_NAME: &str = "mcp.json";

/// Server entry name registered for the agent.
pub const SERVER_NAME: &str = "web-eval-agent";

/// Top-level `mcp.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Server entries keyed by name.
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
}

/// One server entry: how the host tool launches the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerEntry {
    /// Program the host tool executes.
    pub command: String,
    /// Command-line arguments, in order.
    pub args: Vec<String>,
    /// Environment variables set for the launched process.
    pub env: BTreeMap<String, String>,
}

impl McpConfig {
    /// Build the config document for the web-eval-agent server, embedding
    /// the API key in the entry's environment map.
    pub fn for_web_eval_agent(api_key: &str) -> Self {
        let mut env = BTreeMap::new();
        env.insert(API_KEY_VAR.to_string(), api_key.to_string());

        let entry = McpServerEntry {
            command: DEFAULT_RUNNER.to_string(),
            args: vec![
                "--from".to_string(),
                AGENT_SOURCE.to_string(),
                AGENT_ENTRYPOINT.to_string(),
            ],
            env,
        };

        let mut mcp_servers = BTreeMap::new();
        mcp_servers.insert(SERVER_NAME.to_string(), entry);

        Self { mcp_servers }
    }
}

/// Resolve the default config directory (`$HOME/.cursor`).
pub fn default_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        WebevalError::ConfigError("could not determine the user home directory".to_string())
    })?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Write the config document to `<dir>/mcp.json`.
///
/// Creates the directory if it is missing (idempotent) and replaces any
/// prior file contents wholesale. The JSON is pretty-printed with two-space
/// indentation and a trailing newline.
///
/// Returns the path of the written file.
pub fn write_config(dir: &Path, config: &McpConfig) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        WebevalError::ConfigError(format!(
            "failed to create config directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let json = serde_json::to_string_pretty(config).map_err(|e| {
        WebevalError::ConfigError(format!("failed to serialize {}: {}", CONFIG_FILE_NAME, e))
    })?;

    let path = dir.join(CONFIG_FILE_NAME);
    atomic_write_file(&path, &format!("{}\n", json))?;

    Ok(path)
}

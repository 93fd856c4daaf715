//! The `setup` command: write the host-tool configuration.

use crate::cli::SetupArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::mcp::{self, McpConfig};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Ensure the config directory exists and write `mcp.json` with the
/// web-eval-agent server entry, replacing any prior contents.
pub fn cmd_setup(args: SetupArgs) -> Result<()> {
    let config_dir = args.resolved_config_dir()?;
    let path = write_agent_config(&config_dir, &args.api_key)?;
    println!("Wrote agent config: {}", path.display());
    Ok(())
}

/// Write the config document and record the write in the run log.
///
/// Shared with the `eval` command. Returns the path of the written file.
pub(crate) fn write_agent_config(config_dir: &Path, api_key: &str) -> Result<PathBuf> {
    let config = McpConfig::for_web_eval_agent(api_key);
    let path = mcp::write_config(config_dir, &config)?;

    let event = Event::new(EventAction::Setup).with_details(json!({
        "path": path.display().to_string(),
    }));
    if let Err(e) = append_event(config_dir, &event) {
        eprintln!("Warning: failed to record run log event: {}", e);
    }

    Ok(path)
}

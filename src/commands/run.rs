//! The `run` command: launch the agent directly with inherited streams.

use crate::cli::RunArgs;
use crate::error::{Result, WebevalError};
use crate::events::{Event, EventAction, append_event};
use crate::invocation::AgentInvocation;
use crate::mcp;
use serde_json::json;

/// Launch the published agent against the target URL, streaming its output
/// to the terminal, and fail with an agent error if it exits non-zero.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let invocation =
        AgentInvocation::registry(&args.runner, &args.url, &args.task, &args.api_key)?;

    let result = execute_run(&invocation);
    log_run(&invocation, &args.url, &result);
    result
}

/// Spawn the invocation and translate the exit status.
fn execute_run(invocation: &AgentInvocation) -> Result<()> {
    match invocation.run_inherited()? {
        Some(0) => Ok(()),
        Some(code) => Err(WebevalError::AgentError(format!(
            "webEvalAgent exited with status {}",
            code
        ))),
        None => Err(WebevalError::AgentError(
            "webEvalAgent was terminated by a signal".to_string(),
        )),
    }
}

/// Record the launch in the run log. Best-effort: a failure prints a
/// warning and never fails the command.
fn log_run(invocation: &AgentInvocation, url: &str, result: &Result<()>) {
    let Ok(config_dir) = mcp::default_config_dir() else {
        return;
    };

    let event = Event::new(EventAction::Run).with_details(json!({
        "url": url,
        "command": invocation.command_line(),
        "success": result.is_ok(),
    }));

    if let Err(e) = append_event(&config_dir, &event) {
        eprintln!("Warning: failed to record run log event: {}", e);
    }
}

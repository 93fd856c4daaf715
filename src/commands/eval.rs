//! The `eval` command: write the configuration, then launch the agent
//! with captured output.
//!
//! Two sequential steps with no branching: the configuration write from
//! `setup`, then a captured launch of the agent fetched from its Git
//! source. Agent failures in the second step are printed and swallowed;
//! only the configuration step can fail the command.

use super::setup::write_agent_config;
use crate::cli::EvalArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::invocation::{AgentInvocation, CapturedOutput};
use serde_json::json;

/// Write `mcp.json`, then run the agent with captured output and print
/// what it produced.
pub fn cmd_eval(args: EvalArgs) -> Result<()> {
    let config_dir = args.resolved_config_dir()?;
    let path = write_agent_config(&config_dir, &args.api_key)?;
    println!("Wrote agent config: {}", path.display());

    let invocation =
        AgentInvocation::from_source(&args.runner, &args.url, &args.task, &args.api_key)?;

    let outcome = invocation.run_captured();
    for line in report_lines(&outcome) {
        println!("{}", line);
    }

    let event = Event::new(EventAction::Eval).with_details(json!({
        "url": args.url,
        "command": invocation.command_line(),
        "exit_code": outcome.as_ref().ok().and_then(|o| o.exit_code),
    }));
    if let Err(e) = append_event(&config_dir, &event) {
        eprintln!("Warning: failed to record run log event: {}", e);
    }

    Ok(())
}

/// Lines to print for a captured agent run.
///
/// Captured stdout is always reported; stderr only when non-empty. A spawn
/// failure or non-zero exit produces a diagnostic line instead of an error.
fn report_lines(outcome: &Result<CapturedOutput>) -> Vec<String> {
    match outcome {
        Ok(output) => {
            let mut lines = vec![format!("Output: {}", output.stdout)];
            if !output.stderr.is_empty() {
                lines.push(format!("Errors: {}", output.stderr));
            }
            if !output.is_success() {
                lines.push(match output.exit_code {
                    Some(code) => format!("webEvalAgent exited with status {}", code),
                    None => "webEvalAgent was terminated by a signal".to_string(),
                });
            }
            lines
        }
        Err(e) => vec![format!("Error running command: {}", e)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::CONFIG_FILE_NAME;
    use tempfile::TempDir;

    fn eval_args(config_dir: std::path::PathBuf, runner: &str) -> EvalArgs {
        EvalArgs {
            url: "http://localhost:5174".to_string(),
            task: "Test the MS-DOS terminal interface".to_string(),
            api_key: "test-key".to_string(),
            config_dir: Some(config_dir),
            runner: runner.to_string(),
        }
    }

    fn captured(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Result<CapturedOutput> {
        Ok(CapturedOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn report_skips_stderr_line_when_stderr_is_empty() {
        let lines = report_lines(&captured(Some(0), "all good\n", ""));
        assert_eq!(lines, vec!["Output: all good\n"]);
    }

    #[test]
    fn report_includes_stderr_line_when_present() {
        let lines = report_lines(&captured(Some(0), "partial\n", "warning: slow page\n"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Errors: warning: slow page\n");
    }

    #[test]
    fn report_notes_nonzero_exit() {
        let lines = report_lines(&captured(Some(2), "", ""));
        assert!(lines.iter().any(|l| l.contains("exited with status 2")));
    }

    #[test]
    fn report_notes_spawn_failure() {
        let outcome = Err(crate::error::WebevalError::AgentError(
            "failed to execute 'uvx': not found".to_string(),
        ));
        let lines = report_lines(&outcome);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Error running command:"));
    }

    #[test]
    fn cmd_eval_swallows_agent_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        // `false` ignores its arguments and exits 1.
        let result = cmd_eval(eval_args(config_dir.clone(), "false"));

        assert!(result.is_ok());
        assert!(config_dir.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn cmd_eval_swallows_missing_agent() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        let result = cmd_eval(eval_args(config_dir, "nonexistent_command_xyz_123"));
        assert!(result.is_ok());
    }

    #[test]
    fn cmd_eval_records_both_steps_in_run_log() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        cmd_eval(eval_args(config_dir.clone(), "true")).unwrap();

        let log =
            std::fs::read_to_string(crate::events::run_log_path(&config_dir)).unwrap();
        assert!(log.contains("\"setup\""));
        assert!(log.contains("\"eval\""));
    }
}

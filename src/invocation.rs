//! Agent invocation builder and subprocess launcher.
//!
//! An [`AgentInvocation`] describes one launch of the external webEvalAgent
//! tool: the runner program, its full argument list, and the environment
//! variables the child receives. The environment is passed explicitly on the
//! spawn call rather than by mutating this process's environment, so the
//! secret never leaks into ambient global state.
//!
//! Two launch modes exist:
//! - inherited: the child's stdout/stderr stream straight to the terminal
//! - captured: the child's output is collected and decoded as text

use crate::error::{Result, WebevalError};
use std::collections::BTreeMap;
use std::process::{Command, Stdio};

/// Package runner used to fetch and execute the agent.
pub const DEFAULT_RUNNER: &str = "uvx";

/// Entry point name of the published agent tool.
pub const AGENT_ENTRYPOINT: &str = "webEvalAgent";

/// Git source the agent is fetched from in source mode.
pub const AGENT_SOURCE: &str = "git+https://github.com/Operative-Sh/web-eval-agent.git";

/// Environment variable carrying the agent's API key.
pub const API_KEY_VAR: &str = "OPERATIVE_API_KEY";

/// Default target URL for the locally running page under test.
pub const DEFAULT_URL: &str = "http://localhost:5174";

/// Default evaluation script for the `run` command.
pub const DEFAULT_RUN_TASK: &str = "Test the MS-DOS terminal interface: \
    1) Click the power button to start, \
    2) Verify the terminal appears with typing animation, \
    3) Test navigation between different sections (ABOUT, SKILLS, HISTORY, CONTACT), \
    4) Check if the ESC button works to return to main menu";

/// Default evaluation script for the `eval` command.
pub const DEFAULT_EVAL_TASK: &str = "Test the MS-DOS terminal interface";

/// A single planned launch of the external agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInvocation {
    /// Program to execute (first word of the runner string).
    pub program: String,
    /// Full argument list, in order.
    pub args: Vec<String>,
    /// Environment variables set for the child process only.
    pub env: BTreeMap<String, String>,
}

/// Output collected from a captured agent run.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Exit code of the process (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Decoded stdout text.
    pub stdout: String,
    /// Decoded stderr text.
    pub stderr: String,
}

impl CapturedOutput {
    /// Check if the agent run was successful.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl AgentInvocation {
    /// Build an invocation of the published agent by entry-point name:
    /// `<runner> webEvalAgent --url <url> --task <task>`.
    pub fn registry(runner: &str, url: &str, task: &str, api_key: &str) -> Result<Self> {
        let trailing = vec![
            AGENT_ENTRYPOINT.to_string(),
            "--url".to_string(),
            url.to_string(),
            "--task".to_string(),
            task.to_string(),
        ];
        Self::with_runner(runner, trailing, api_key)
    }

    /// Build an invocation that fetches the agent from its Git source:
    /// `<runner> --from <git-url> webEvalAgent <url> <task>`.
    pub fn from_source(runner: &str, url: &str, task: &str, api_key: &str) -> Result<Self> {
        let trailing = vec![
            "--from".to_string(),
            AGENT_SOURCE.to_string(),
            AGENT_ENTRYPOINT.to_string(),
            url.to_string(),
            task.to_string(),
        ];
        Self::with_runner(runner, trailing, api_key)
    }

    /// Split the runner string (it may carry embedded arguments, e.g.
    /// `"uvx --python 3.12"`) and append the agent arguments.
    fn with_runner(runner: &str, trailing: Vec<String>, api_key: &str) -> Result<Self> {
        let mut words = shell_words::split(runner).map_err(|e| {
            WebevalError::UserError(format!(
                "failed to parse runner command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                runner, e
            ))
        })?;

        if words.is_empty() {
            return Err(WebevalError::UserError(format!(
                "runner command is empty after parsing: '{}'",
                runner
            )));
        }

        let program = words.remove(0);
        words.extend(trailing);

        let mut env = BTreeMap::new();
        env.insert(API_KEY_VAR.to_string(), api_key.to_string());

        Ok(Self {
            program,
            args: words,
            env,
        })
    }

    /// Render the invocation as a single command line for diagnostics.
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.clone());
        words.extend(self.args.iter().cloned());
        shell_words::join(words.iter().map(String::as_str))
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run the agent with inherited stdio, blocking until it exits.
    ///
    /// The child's output streams straight to the terminal; nothing is
    /// captured. Returns the exit code (None if terminated by signal).
    pub fn run_inherited(&self) -> Result<Option<i32>> {
        let status = self
            .command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(&self.program, &e))?;

        Ok(status.code())
    }

    /// Run the agent with captured output, blocking until it exits.
    ///
    /// Stdout and stderr are collected and decoded as UTF-8 text (lossily,
    /// so invalid bytes never fail the run).
    pub fn run_captured(&self) -> Result<CapturedOutput> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&self.program, &e))?;

        Ok(CapturedOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn spawn_error(program: &str, e: &std::io::Error) -> WebevalError {
    WebevalError::AgentError(format!(
        "failed to execute '{}': {}\n\
         Fix: ensure the command is installed and in PATH.",
        program, e
    ))
}

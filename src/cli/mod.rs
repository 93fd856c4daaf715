//! CLI argument parsing for webeval.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::invocation::{DEFAULT_EVAL_TASK, DEFAULT_RUNNER, DEFAULT_RUN_TASK, DEFAULT_URL};
use crate::mcp;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Webeval: CLI launcher for webEvalAgent browser-based page evaluations.
///
/// Drives an automated browser evaluation of a locally running page by
/// launching the external webEvalAgent tool via the `uvx` package runner,
/// and writes the host-tool configuration that lets an MCP host launch
/// the same agent on its own.
#[derive(Parser, Debug)]
#[command(name = "webeval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for webeval.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the agent directly against a target URL.
    ///
    /// Runs `uvx webEvalAgent --url <url> --task <task>` synchronously,
    /// streaming the agent's output straight to the terminal.
    Run(RunArgs),

    /// Write the host-tool configuration (mcp.json).
    ///
    /// Ensures the per-user config directory exists and writes the
    /// web-eval-agent server entry, replacing any prior contents.
    Setup(SetupArgs),

    /// Write the configuration, then launch the agent with captured output.
    ///
    /// Fetches the agent from its Git source, collects stdout/stderr as
    /// text, and prints them. Agent failures are reported, not propagated.
    Eval(EvalArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// URL of the locally running page under test.
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Natural-language evaluation task for the agent.
    #[arg(long, default_value = DEFAULT_RUN_TASK)]
    pub task: String,

    /// API key for the agent service.
    #[arg(long, env = "OPERATIVE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Package runner used to launch the agent (may carry extra arguments).
    #[arg(long, default_value = DEFAULT_RUNNER)]
    pub runner: String,
}

/// Arguments for the `setup` command.
#[derive(Parser, Debug)]
pub struct SetupArgs {
    /// API key for the agent service.
    #[arg(long, env = "OPERATIVE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Config directory to write into (defaults to ~/.cursor).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

/// Arguments for the `eval` command.
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// URL of the locally running page under test.
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Natural-language evaluation task for the agent.
    #[arg(long, default_value = DEFAULT_EVAL_TASK)]
    pub task: String,

    /// API key for the agent service.
    #[arg(long, env = "OPERATIVE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Config directory to write into (defaults to ~/.cursor).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Package runner used to launch the agent (may carry extra arguments).
    #[arg(long, default_value = DEFAULT_RUNNER)]
    pub runner: String,
}

impl SetupArgs {
    /// Resolve the config directory: explicit flag or `$HOME/.cursor`.
    pub fn resolved_config_dir(&self) -> crate::error::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => mcp::default_config_dir(),
        }
    }
}

impl EvalArgs {
    /// Resolve the config directory: explicit flag or `$HOME/.cursor`.
    pub fn resolved_config_dir(&self) -> crate::error::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => mcp::default_config_dir(),
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn parse_run_defaults() {
        let cli =
            Cli::try_parse_from(["webeval", "run", "--api-key", "test-key"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.url, "http://localhost:5174");
            assert!(args.task.starts_with("Test the MS-DOS terminal interface:"));
            assert_eq!(args.api_key, "test-key");
            assert_eq!(args.runner, "uvx");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    #[serial]
    fn parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "webeval",
            "run",
            "--url",
            "http://localhost:3000",
            "--task",
            "Check the signup flow",
            "--api-key",
            "k",
            "--runner",
            "uvx --python 3.12",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.url, "http://localhost:3000");
            assert_eq!(args.task, "Check the signup flow");
            assert_eq!(args.runner, "uvx --python 3.12");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    #[serial]
    fn parse_run_reads_api_key_from_environment() {
        unsafe { std::env::set_var("OPERATIVE_API_KEY", "env-key") };
        let result = Cli::try_parse_from(["webeval", "run"]);
        unsafe { std::env::remove_var("OPERATIVE_API_KEY") };

        let cli = result.unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.api_key, "env-key");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    #[serial]
    fn parse_run_requires_api_key() {
        unsafe { std::env::remove_var("OPERATIVE_API_KEY") };
        let result = Cli::try_parse_from(["webeval", "run"]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn parse_setup() {
        let cli = Cli::try_parse_from([
            "webeval",
            "setup",
            "--api-key",
            "k",
            "--config-dir",
            "/tmp/cursor-test",
        ])
        .unwrap();
        if let Command::Setup(args) = cli.command {
            assert_eq!(args.api_key, "k");
            assert_eq!(
                args.config_dir,
                Some(PathBuf::from("/tmp/cursor-test"))
            );
        } else {
            panic!("Expected Setup command");
        }
    }

    #[test]
    #[serial]
    fn parse_setup_without_config_dir() {
        let cli = Cli::try_parse_from(["webeval", "setup", "--api-key", "k"]).unwrap();
        if let Command::Setup(args) = cli.command {
            assert!(args.config_dir.is_none());
        } else {
            panic!("Expected Setup command");
        }
    }

    #[test]
    #[serial]
    fn parse_eval_defaults() {
        let cli = Cli::try_parse_from(["webeval", "eval", "--api-key", "k"]).unwrap();
        if let Command::Eval(args) = cli.command {
            assert_eq!(args.url, "http://localhost:5174");
            assert_eq!(args.task, "Test the MS-DOS terminal interface");
            assert_eq!(args.runner, "uvx");
            assert!(args.config_dir.is_none());
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    #[serial]
    fn resolved_config_dir_prefers_explicit_flag() {
        let args = SetupArgs {
            api_key: "k".to_string(),
            config_dir: Some(PathBuf::from("/tmp/explicit")),
        };
        assert_eq!(
            args.resolved_config_dir().unwrap(),
            PathBuf::from("/tmp/explicit")
        );
    }
}

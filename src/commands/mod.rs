//! Command implementations for webeval.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod eval;
mod run;
mod setup;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Setup(args) => setup::cmd_setup(args),
        Command::Eval(args) => eval::cmd_eval(args),
    }
}

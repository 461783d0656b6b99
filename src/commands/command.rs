//! Command trait definition for CLI commands.
//!
//! Every subcommand implements [`Command`]; `enum_dispatch` routes the parsed
//! subcommand enum to the right implementation without boxing.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all perfect-aligner CLI commands.
///
/// `command_line` is the full invocation, logged before the command runs.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}

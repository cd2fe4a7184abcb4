//! Command-line interface.
//!
//! Flags are handled before the TUI starts. Session commands run against the
//! same [`ConsoleContext`] the TUI uses, so `--login` stores the session the
//! console restores on its next start.
//!
//! ```ignore
//! use minewatch::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = runtime.block_on(run_cli_command(command, &context)) {
//!     result?;
//!     return Ok(());
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
mod session;

pub use args::{parse_args, CliCommand, USAGE};
pub use session::{handle_health, handle_login, handle_logout, handle_whoami};

use color_eyre::Result;

use crate::startup::ConsoleContext;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version or usage for the commands that need no setup. Returns
/// whether `command` was one of them.
pub fn handle_info_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => println!("minewatch {}", VERSION),
        CliCommand::Help => println!("{}", USAGE),
        _ => return false,
    }
    true
}

/// Run a CLI command if applicable.
///
/// Returns `None` for [`CliCommand::RunTui`].
pub async fn run_cli_command(command: CliCommand, context: &ConsoleContext) -> Option<Result<()>> {
    let result = match command {
        CliCommand::RunTui => return None,
        CliCommand::Version | CliCommand::Help => {
            handle_info_command(&command);
            Ok(())
        }
        CliCommand::Login { username } => handle_login(context, username).await,
        CliCommand::Logout => handle_logout(context).await,
        CliCommand::WhoAmI { verify } => handle_whoami(context, verify).await,
        CliCommand::Health => handle_health(context).await,
    };
    Some(result)
}

//! Command dispatch: bridges CLI args -> store intents -> output formatting.

pub mod config_cmd;
pub mod customers;
pub mod dashboard;
pub mod menu;
pub mod util;

use trattoria_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Customers(args) => customers::handle(console, args, global).await,
        Command::Menu(args) => menu::handle(console, args, global).await,
        Command::Dashboard => dashboard::handle(console, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

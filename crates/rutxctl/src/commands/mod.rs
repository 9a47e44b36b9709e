//! Command dispatch: bridges CLI args -> core operations -> output.

pub mod lease;
pub mod restore;
pub mod setup_cmd;
pub mod system;
pub mod util;
pub mod wifi;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
///
/// Every arm starts with [`util::connect`], which pings the device,
/// resolves credentials, and logs in.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::RestoreDefaults(args) => restore::handle(args, global).await,
        Command::Wifi(args) => wifi::handle(args, global).await,
        Command::Lease(args) => lease::handle(args, global).await,
        Command::Reboot => system::reboot(global).await,
        // Setup and Completions are handled before dispatch
        Command::Setup(_) | Command::Completions(_) => unreachable!(),
    }
}

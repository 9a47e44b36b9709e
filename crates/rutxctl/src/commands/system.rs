//! System command handlers.

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn reboot(global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm("Reboot the router?", global.yes)? {
        return Ok(());
    }

    let client = util::connect(global).await?;
    client.reboot().await?;

    if !global.quiet {
        println!("Reboot requested; the router will be back in about a minute");
    }
    Ok(())
}

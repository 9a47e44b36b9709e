//! Shared helpers for command handlers.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use rutx_api::{DeviceClient, TlsMode, TransportConfig};
use rutx_core::net;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Ping the device, resolve credentials, and log in to the web API.
///
/// The ping pre-check turns a 30s connect timeout into an immediate,
/// explicit "router not reachable" error. Credentials come from flags,
/// environment, or interactive prompts, in that order.
pub async fn connect(global: &GlobalOpts) -> Result<DeviceClient, CliError> {
    if !net::ping(&global.device).await {
        return Err(CliError::DeviceUnreachable {
            host: global.device.clone(),
        });
    }

    // The router serves a self-signed cert on its LAN address.
    let base_url: Url = format!("https://{}", global.device)
        .parse()
        .map_err(|_| CliError::Validation {
            field: "device".into(),
            reason: format!("invalid host '{}'", global.device),
        })?;

    let transport = TransportConfig {
        tls: TlsMode::DangerAcceptInvalid,
        timeout: Duration::from_secs(global.timeout),
    };
    let client = DeviceClient::new(base_url, &transport)?;

    let username = match &global.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Router username")
            .default("admin".to_owned())
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = match &global.password {
        Some(p) => SecretString::from(p.clone()),
        None => SecretString::from(rpassword::prompt_password("Router password: ")?),
    };

    client.login(&username, &password).await?;
    Ok(client)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Spinner shown while a poller waits for connectivity.
pub fn wait_spinner(message: &'static str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

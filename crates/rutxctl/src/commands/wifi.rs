//! Wi-Fi uplink command handlers.

use owo_colors::OwoColorize;
use secrecy::SecretString;
use tabled::Tabled;

use rutx_api::models::MultiApNetwork;
use rutx_core::{
    PollOutcome, PollSettings, WifiReconcile, add_wifi_network, net, remove_wifi_network,
    wait_for_connectivity,
};

use crate::cli::{GlobalOpts, WifiArgs, WifiCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WifiRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&MultiApNetwork> for WifiRow {
    fn from(n: &MultiApNetwork) -> Self {
        Self {
            id: n.id.clone(),
            ssid: n.ssid.clone(),
            enabled: match n.enabled.as_deref() {
                Some("1") => "yes".into(),
                Some(_) | None => "no".into(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: WifiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let client = util::connect(global).await?;

    match args.command {
        WifiCommand::Connect {
            ssid,
            password,
            no_wait,
        } => {
            let key = match password {
                Some(p) => SecretString::from(p),
                None => SecretString::from(rpassword::prompt_password(format!(
                    "Password for '{ssid}': "
                ))?),
            };

            match add_wifi_network(&client, &ssid, &key).await? {
                WifiReconcile::Updated { id } => {
                    tracing::info!(ssid, id, "updated existing uplink entry");
                }
                WifiReconcile::Created => {
                    tracing::info!(ssid, "created uplink entry");
                }
            }

            if no_wait {
                if !global.quiet {
                    println!("Network '{ssid}' configured (not waiting for connectivity)");
                }
                return Ok(());
            }

            let spinner = util::wait_spinner("waiting for internet connectivity");
            let outcome = wait_for_connectivity(
                PollSettings::wifi_connect(),
                net::internet_reachable,
                || async { None },
                |_attempt| spinner.tick(),
            )
            .await;
            spinner.finish_and_clear();

            match outcome {
                PollOutcome::Connected => {
                    if !global.quiet {
                        println!("{}", format!("Connected to '{ssid}'").green());
                    }
                    Ok(())
                }
                PollOutcome::TimedOut => Err(CliError::NoInternet {
                    hint: format!(
                        "The router joined '{ssid}' but no internet followed.\n\
                         Check the network password and upstream connectivity."
                    ),
                }),
                // the HTTP flow has no auth diagnostic channel
                PollOutcome::AuthFailed => Err(CliError::WrongWifiPassword),
            }
        }

        WifiCommand::Disconnect { ssid } => {
            if remove_wifi_network(&client, &ssid).await? {
                if !global.quiet {
                    println!("Network '{ssid}' removed");
                }
            } else if !global.quiet {
                println!("Network '{ssid}' was not configured, nothing to remove");
            }
            Ok(())
        }

        WifiCommand::List => {
            let networks = client.list_multi_ap_networks().await?;
            let out = output::render_list(
                &global.output,
                &networks,
                |n| WifiRow::from(n),
                |n| n.ssid.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

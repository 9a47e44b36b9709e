//! setup command handler: the SSH/UCI variant.
//!
//! Drives the on-robot flow: load and validate the local JSON setup
//! file, rewrite the multi-Wi-Fi uplink list over SSH, wait for
//! internet connectivity (with the kernel-log auth heuristic), then
//! join Husarnet when configured.

use std::time::Duration;

use figment::Figment;
use figment::providers::{Format, Json};
use owo_colors::OwoColorize;

use rutx_core::{
    PollOutcome, PollSettings, SetupConfig, SshRunner, multi_wifi_rewrite, net,
    wait_for_connectivity,
};

use crate::cli::{GlobalOpts, SetupArgs};
use crate::error::CliError;

use super::util;

pub async fn handle(args: SetupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config: SetupConfig = Figment::new()
        .merge(Json::file_exact(&args.config))
        .extract()
        .map_err(|source| CliError::SetupFile {
            path: args.config.display().to_string(),
            source: Box::new(source),
        })?;

    // Validate everything before the first SSH round-trip.
    let clients = config.validated_clients()?;

    if !net::ping(&global.device).await {
        return Err(CliError::DeviceUnreachable {
            host: global.device.clone(),
        });
    }

    // One master connection for the whole flow; the probes and the
    // connectivity poll reuse it instead of re-prompting for the
    // router password.
    let runner = SshRunner::new(global.device.clone(), args.user.clone()).with_multiplexing();

    if let Some(clients) = clients {
        let desired = config.client_radio();
        let current = runner.multi_wifi_device().await?;
        let radio_change =
            (current.as_deref() != Some(desired.device_name())).then_some(desired);
        if radio_change.is_some() {
            tracing::info!(radio = desired.device_name(), "retargeting uplink radio");
        }

        let existing = runner.multi_wifi_count().await?;
        let batch = multi_wifi_rewrite(existing, &clients, radio_change);

        tracing::debug!(commands = batch.len(), "applying UCI batch");
        runner.apply_batch(&batch).await?;

        if !global.quiet {
            println!("Router configuration saved");
        }

        // Give the router a moment before probing; reload_config tears
        // the uplink down briefly.
        tokio::time::sleep(Duration::from_secs(3)).await;
    } else if !global.quiet {
        println!("wifi_client section not defined, skipping client configuration");
    }

    if !args.no_wait {
        wait_for_internet(&runner, global).await?;
    }

    if let Some(husarnet) = &config.husarnet {
        match husarnet.resolved() {
            Some((join_code, hostname)) => {
                net::husarnet_join(join_code, hostname).await?;
                if !global.quiet {
                    println!("{}", format!("Joined Husarnet as '{hostname}'").green());
                }
            }
            None => {
                if !global.quiet {
                    println!("Husarnet section incomplete, skipping Husarnet configuration");
                }
            }
        }
    }

    Ok(())
}

/// Poll for internet through the new uplink, using the router's kernel
/// log to distinguish a wrong password from a slow association.
async fn wait_for_internet(runner: &SshRunner, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.quiet {
        println!(
            "Waiting for internet connectivity; this can take up to 8 minutes \
             depending on the chosen radio"
        );
    }

    let spinner = util::wait_spinner("waiting for internet connectivity");
    let probe_runner = runner.clone();

    let outcome = wait_for_connectivity(
        PollSettings::uci_setup(),
        net::internet_reachable,
        move || {
            let runner = probe_runner.clone();
            // SSH hiccups during reassociation are expected; treat them
            // as "no diagnostic this round".
            async move { runner.auth_indicator().await.ok().flatten() }
        },
        |attempt| {
            spinner.set_message(format!(
                "waiting for internet connectivity (try {attempt}/{})",
                PollSettings::uci_setup().max_attempts
            ));
        },
    )
    .await;
    spinner.finish_and_clear();

    match outcome {
        PollOutcome::Connected => {
            if !global.quiet {
                println!("{}", "Internet connection established".green());
            }
            Ok(())
        }
        PollOutcome::AuthFailed => Err(CliError::WrongWifiPassword),
        PollOutcome::TimedOut => Err(CliError::NoInternet {
            hint: "Check that the chosen Wi-Fi network is in range and the SSID is correct."
                .into(),
        }),
    }
}

//! restore-defaults command handler.

use owo_colors::OwoColorize;

use rutx_core::{RobotModel, provisioning_plan, restore_defaults};

use crate::cli::{GlobalOpts, RestoreArgs};
use crate::error::CliError;

use super::util;

pub async fn handle(args: RestoreArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let model: RobotModel = args.model.parse().map_err(CliError::from)?;
    let plan = provisioning_plan(model, &args.serial)?;

    if !util::confirm(
        &format!(
            "Restore router defaults for {model} {} ({} steps) and reboot?",
            args.serial,
            plan.len()
        ),
        global.yes,
    )? {
        return Ok(());
    }

    let client = util::connect(global).await?;

    let report = restore_defaults(&client, &plan).await;

    if !global.quiet {
        for step in &report.steps {
            if step.succeeded() {
                println!("  {} {}", "ok".green(), step.domain);
            } else {
                println!("  {} {}", "failed".red(), step.domain);
            }
        }
    }

    if !report.is_clean() {
        // Partial application is an accepted outcome; report and keep
        // going so the reboot still lands.
        eprintln!(
            "{} {} of {} steps failed; re-run or fix via the web UI",
            "warning:".yellow(),
            report.failed_count(),
            report.steps.len()
        );
    }

    client.reboot().await?;
    if !global.quiet {
        println!(
            "{}",
            "Defaults restored; the router is rebooting to apply them".green()
        );
    }

    Ok(())
}

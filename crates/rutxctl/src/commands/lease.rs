//! Static DHCP lease command handlers.

use tabled::Tabled;

use rutx_api::models::StaticLease;
use rutx_core::{LeaseSpec, add_static_lease, reset_static_leases};

use crate::cli::{GlobalOpts, LeaseArgs, LeaseCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LeaseRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&StaticLease> for LeaseRow {
    fn from(l: &StaticLease) -> Self {
        Self {
            ip: l.ip.clone(),
            mac: l.mac.clone(),
            name: l.name.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: LeaseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        LeaseCommand::Add { ip, mac, name } => {
            let spec = LeaseSpec { ip, mac, name };
            spec.validate()?;

            let client = util::connect(global).await?;
            add_static_lease(&client, &spec).await?;
            if !global.quiet {
                println!("Lease {} -> {} ({}) added", spec.mac, spec.ip, spec.name);
            }
            Ok(())
        }

        LeaseCommand::List => {
            let client = util::connect(global).await?;
            let leases = client.list_static_leases().await?;
            let out = output::render_list(
                &global.output,
                &leases,
                |l| LeaseRow::from(l),
                |l| l.ip.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LeaseCommand::Reset { ip, mac, name } => {
            // clap guarantees mac and name when ip is present
            let assert = match (ip, mac, name) {
                (Some(ip), Some(mac), Some(name)) => Some(LeaseSpec { ip, mac, name }),
                _ => None,
            };
            if let Some(spec) = &assert {
                spec.validate()?;
            }

            if !util::confirm("Delete all static leases?", global.yes)? {
                return Ok(());
            }

            let client = util::connect(global).await?;
            reset_static_leases(&client, assert.as_ref()).await?;
            if !global.quiet {
                println!("Static leases reset");
            }
            Ok(())
        }
    }
}

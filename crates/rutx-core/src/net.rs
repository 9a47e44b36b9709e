// Local-host network helpers.
//
// Connectivity checks shell out to the system ping binary rather than
// opening raw ICMP sockets, which would need elevated privileges. The
// same applies to the Husarnet VPN join, which is a one-shot call into
// the locally installed husarnet CLI.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;

/// Address probed for internet reachability.
pub const INTERNET_PROBE_ADDR: &str = "8.8.8.8";

/// Send a single ICMP echo with a 1-second deadline.
///
/// Returns `false` on timeout, unreachable host, or a missing ping
/// binary -- the caller only cares whether the host answered.
pub async fn ping(host: &str) -> bool {
    let status = Command::new("ping")
        .args(["-c", "1", "-W", "1", host])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(s) => s.success(),
        Err(e) => {
            debug!("ping {host} failed to spawn: {e}");
            false
        }
    }
}

/// Probe internet reachability (single echo to a well-known address).
pub async fn internet_reachable() -> bool {
    ping(INTERNET_PROBE_ADDR).await
}

/// Join a Husarnet network via the local husarnet CLI.
///
/// Requires the husarnet daemon to be installed and the process to run
/// with enough privilege to talk to it.
pub async fn husarnet_join(join_code: &str, hostname: &str) -> Result<(), CoreError> {
    debug!(hostname, "joining husarnet network");

    let output = Command::new("husarnet")
        .args(["join", join_code, hostname])
        .output()
        .await
        .map_err(|source| CoreError::Subprocess {
            program: "husarnet",
            source,
        })?;

    if !output.status.success() {
        return Err(CoreError::SubprocessFailed {
            program: "husarnet",
            message: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(())
}

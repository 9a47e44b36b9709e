//! Thin wrapper over the system `ssh` binary.
//!
//! Password entry stays interactive (the router ships with password
//! auth only), so the child inherits the terminal and we never pass
//! `BatchMode`.

use std::path::PathBuf;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;
use crate::readiness::AuthIndicator;
use crate::uci::UciBatch;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// How long the multiplexing master stays alive after the last
/// command. Covers the full connectivity poll (50 tries at 10 s).
const CONTROL_PERSIST_SECS: u64 = 600;

/// Runs commands on the router over SSH.
#[derive(Debug, Clone)]
pub struct SshRunner {
    host: String,
    user: String,
    connect_timeout_secs: u64,
    control_path: Option<PathBuf>,
}

impl SshRunner {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            control_path: None,
        }
    }

    /// Multiplex every command over one master connection, so the
    /// operator types the router password once instead of once per
    /// spawned `ssh`.
    #[must_use]
    pub fn with_multiplexing(mut self) -> Self {
        self.control_path = Some(
            std::env::temp_dir().join(format!("rutxctl-ssh-{}.sock", std::process::id())),
        );
        self
    }

    /// `user@host` as passed to ssh.
    pub fn target(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// The `-o` options preceding the target.
    fn options(&self) -> Vec<String> {
        let mut opts = vec![
            "StrictHostKeyChecking=accept-new".to_owned(),
            format!("ConnectTimeout={}", self.connect_timeout_secs),
        ];
        if let Some(path) = &self.control_path {
            opts.push("ControlMaster=auto".to_owned());
            opts.push(format!("ControlPath={}", path.display()));
            opts.push(format!("ControlPersist={CONTROL_PERSIST_SECS}"));
        }
        opts
    }

    async fn exec(&self, command: &str) -> Result<Output, CoreError> {
        debug!(target = %self.target(), %command, "running remote command");
        let mut cmd = Command::new("ssh");
        for opt in self.options() {
            cmd.arg("-o").arg(opt);
        }
        cmd.arg(self.target())
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CoreError::Subprocess {
                program: "ssh",
                source,
            })
    }

    /// Run a remote command, capturing stdout. A non-zero exit status
    /// is an error carrying the remote stderr.
    pub async fn run(&self, command: &str) -> Result<String, CoreError> {
        let output = self.exec(command).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::ssh(format!(
                "remote command failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like [`run`](Self::run), but `uci: Entry not found` means "not
    /// there" rather than an error. Used for `uci get` probes of
    /// options that may legitimately be unset; anything else failing
    /// (connection refused, timeout) still propagates.
    pub async fn try_run(&self, command: &str) -> Result<Option<String>, CoreError> {
        let output = self.exec(command).await?;

        if output.status.success() {
            return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_unset_entry(&stderr) {
            return Ok(None);
        }
        Err(CoreError::ssh(format!(
            "remote command failed: {}",
            stderr.trim()
        )))
    }

    /// Seconds since the router booted.
    pub async fn uptime_secs(&self) -> Result<f64, CoreError> {
        let raw = self.run("cat /proc/uptime").await?;
        parse_uptime(&raw)
    }

    /// Kernel timestamp of the most recent Wi-Fi auth denial, if any.
    pub async fn last_auth_denied_secs(&self) -> Result<Option<f64>, CoreError> {
        let raw = self
            .run("dmesg | grep 'denied authentication (status 1)' | tail -1 | awk '{print $2}'")
            .await?;
        Ok(parse_dmesg_seconds(&raw))
    }

    /// Snapshot uptime and the latest auth denial in one go. `None`
    /// when nothing was ever denied.
    pub async fn auth_indicator(&self) -> Result<Option<AuthIndicator>, CoreError> {
        let Some(denied_at_secs) = self.last_auth_denied_secs().await? else {
            return Ok(None);
        };
        let uptime_secs = self.uptime_secs().await?;
        Ok(Some(AuthIndicator {
            uptime_secs,
            denied_at_secs,
        }))
    }

    /// Which radio the Multi-AP uplink currently uses.
    pub async fn multi_wifi_device(&self) -> Result<Option<String>, CoreError> {
        Ok(self
            .try_run("uci get wireless.multi_wifi.device")
            .await?
            .map(|out| out.trim().to_owned()))
    }

    /// How many uplink networks are configured. The last section's
    /// priority equals the count because priorities follow list order.
    pub async fn multi_wifi_count(&self) -> Result<u32, CoreError> {
        let Some(raw) = self
            .try_run("uci get multi_wifi.@wifi-iface[-1].priority")
            .await?
        else {
            return Ok(0);
        };
        parse_priority_count(&raw)
    }

    /// Run a whole UCI batch as one remote shell line.
    pub async fn apply_batch(&self, batch: &UciBatch) -> Result<(), CoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        self.run(&batch.render()).await?;
        Ok(())
    }
}

/// `uci get` of a missing section or option says so on stderr; any
/// other failure text (connection refused, timeout) is a real error.
fn is_unset_entry(stderr: &str) -> bool {
    stderr.contains("Entry not found")
}

/// A garbled priority must not be read as "zero entries", or stale
/// sections would survive the rewrite.
fn parse_priority_count(raw: &str) -> Result<u32, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::ssh(format!("unexpected multi_wifi priority value: {raw:?}")))
}

fn parse_uptime(raw: &str) -> Result<f64, CoreError> {
    raw.split_whitespace()
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| CoreError::ssh(format!("unexpected /proc/uptime output: {raw:?}")))
}

/// The awk field looks like `12.3456]`; strip the bracket. Empty
/// output means dmesg had no matching line.
fn parse_dmesg_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches(']');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uptime_takes_first_field() {
        assert_eq!(parse_uptime("1234.56 4567.89\n").unwrap(), 1234.56);
        assert!(parse_uptime("").is_err());
        assert!(parse_uptime("garbage here").is_err());
    }

    #[test]
    fn dmesg_field_keeps_trailing_bracket_out() {
        assert_eq!(parse_dmesg_seconds("12.3456]\n"), Some(12.3456));
        assert_eq!(parse_dmesg_seconds("98.0]"), Some(98.0));
        assert_eq!(parse_dmesg_seconds(""), None);
        assert_eq!(parse_dmesg_seconds("\n"), None);
    }

    #[test]
    fn target_formats_user_at_host() {
        let runner = SshRunner::new("10.15.20.1", "root");
        assert_eq!(runner.target(), "root@10.15.20.1");
    }

    #[test]
    fn unset_entry_is_not_a_connection_failure() {
        assert!(is_unset_entry("uci: Entry not found\n"));
        assert!(!is_unset_entry(
            "ssh: connect to host 10.15.20.1 port 22: Connection refused"
        ));
        assert!(!is_unset_entry("Connection timed out during banner exchange"));
        assert!(!is_unset_entry(""));
    }

    #[test]
    fn priority_count_rejects_garbled_values() {
        assert_eq!(parse_priority_count("3\n").unwrap(), 3);
        assert_eq!(parse_priority_count("  1  ").unwrap(), 1);
        assert!(parse_priority_count("three").is_err());
        assert!(parse_priority_count("").is_err());
    }

    #[test]
    fn multiplexing_adds_control_options() {
        let plain = SshRunner::new("10.15.20.1", "root");
        assert!(!plain.options().iter().any(|o| o.starts_with("ControlMaster")));

        let muxed = SshRunner::new("10.15.20.1", "root").with_multiplexing();
        let opts = muxed.options();
        assert!(opts.contains(&"ControlMaster=auto".to_owned()));
        assert!(opts.iter().any(|o| o.starts_with("ControlPath=")));
        assert!(opts.iter().any(|o| o.starts_with("ControlPersist=")));
    }
}

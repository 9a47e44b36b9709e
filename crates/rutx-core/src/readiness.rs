// Post-configuration readiness polling.
//
// After a reboot or an uplink change the router needs anywhere from
// seconds to minutes to reach the internet. The poller probes
// connectivity on a fixed interval until success or a ceiling, with an
// optional auth-failure check that distinguishes "still connecting"
// from "wrong Wi-Fi credentials" using the device's own kernel log.
//
// State machine: Polling -> { Connected, TimedOut, AuthFailed }.
// All three outcomes are terminal; there is no retry within a run.

use std::time::Duration;

use tracing::debug;

/// A Wi-Fi authentication denial seen in the device kernel log,
/// positioned against the device uptime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthIndicator {
    /// Device uptime in seconds at the moment of the check.
    pub uptime_secs: f64,
    /// Kernel timestamp of the newest "denied authentication" event.
    pub denied_at_secs: f64,
}

/// Denials older than this (relative to now) are leftovers from a
/// previous association attempt and are ignored.
const DENIAL_WINDOW_SECS: f64 = 15.0;

impl AuthIndicator {
    /// Whether the denial happened within the recent window, i.e. the
    /// router is actively being rejected with the current credentials.
    pub fn is_recent(&self) -> bool {
        self.denied_at_secs > self.uptime_secs - DENIAL_WINDOW_SECS
    }
}

/// Terminal outcome of one polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The connectivity probe succeeded.
    Connected,
    /// The attempt ceiling was reached without a successful probe.
    TimedOut,
    /// The device reported a recent authentication denial -- the
    /// uplink credentials are wrong, waiting longer will not help.
    AuthFailed,
}

/// Timing knobs for a polling run.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Grace period before the first probe (lets the router finish
    /// reconfiguring).
    pub startup_delay: Duration,
    /// Fixed delay between probes.
    pub interval: Duration,
    /// Hard ceiling on the number of probes.
    pub max_attempts: u32,
}

impl PollSettings {
    /// Settings for the HTTP wifi-connect flow: ~3 minutes total.
    pub fn wifi_connect() -> Self {
        Self {
            startup_delay: Duration::ZERO,
            interval: Duration::from_secs(2),
            max_attempts: 90,
        }
    }

    /// Settings for the SSH/UCI setup flow: 50 tries, 10 s apart
    /// (~8 minutes), after a 10 s reconfiguration grace period.
    pub fn uci_setup() -> Self {
        Self {
            startup_delay: Duration::from_secs(10),
            interval: Duration::from_secs(10),
            max_attempts: 50,
        }
    }
}

/// Poll until connected, the ceiling is hit, or auth visibly failed.
///
/// `probe` answers "is the internet reachable right now"; `auth_probe`
/// may surface an [`AuthIndicator`] from the device (pass a closure
/// returning `None` when no diagnostic channel exists, as in the HTTP
/// flow). `on_attempt` is called after each failed probe with the
/// 1-based attempt number -- the CLI uses it to drive its spinner.
///
/// Guaranteed to terminate after at most `max_attempts` probes.
pub async fn wait_for_connectivity<P, PF, A, AF>(
    settings: PollSettings,
    mut probe: P,
    mut auth_probe: A,
    mut on_attempt: impl FnMut(u32),
) -> PollOutcome
where
    P: FnMut() -> PF,
    PF: Future<Output = bool>,
    A: FnMut() -> AF,
    AF: Future<Output = Option<AuthIndicator>>,
{
    tokio::time::sleep(settings.startup_delay).await;

    for attempt in 1..=settings.max_attempts {
        if probe().await {
            debug!(attempt, "connectivity probe succeeded");
            return PollOutcome::Connected;
        }
        on_attempt(attempt);

        if let Some(indicator) = auth_probe().await {
            debug!(?indicator, "auth indicator from device");
            if indicator.is_recent() {
                return PollOutcome::AuthFailed;
            }
        }

        tokio::time::sleep(settings.interval).await;
    }

    PollOutcome::TimedOut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(max_attempts: u32) -> PollSettings {
        PollSettings {
            startup_delay: Duration::from_secs(1),
            interval: Duration::from_secs(10),
            max_attempts,
        }
    }

    async fn no_auth() -> Option<AuthIndicator> {
        None
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_probe_terminates_at_ceiling() {
        let mut attempts_seen = 0u32;
        let outcome = wait_for_connectivity(
            fast(5),
            || async { false },
            no_auth,
            |_| attempts_seen += 1,
        )
        .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(attempts_seen, 5, "exactly the configured ceiling");
    }

    #[tokio::test(start_paused = true)]
    async fn connects_on_first_success() {
        let mut calls = 0u32;
        let outcome = wait_for_connectivity(
            fast(10),
            || {
                calls += 1;
                let up = calls >= 3;
                async move { up }
            },
            no_auth,
            |_| {},
        )
        .await;

        assert_eq!(outcome, PollOutcome::Connected);
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn recent_denial_short_circuits_to_auth_failed() {
        let outcome = wait_for_connectivity(
            fast(50),
            || async { false },
            || async {
                Some(AuthIndicator {
                    uptime_secs: 120.0,
                    denied_at_secs: 118.5,
                })
            },
            |_| {},
        )
        .await;

        assert_eq!(outcome, PollOutcome::AuthFailed);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_denial_is_ignored() {
        let outcome = wait_for_connectivity(
            fast(3),
            || async { false },
            || async {
                Some(AuthIndicator {
                    uptime_secs: 120.0,
                    denied_at_secs: 30.0,
                })
            },
            |_| {},
        )
        .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
    }

    #[test]
    fn denial_window_boundary() {
        let at = |denied_at_secs| AuthIndicator {
            uptime_secs: 100.0,
            denied_at_secs,
        };
        assert!(at(90.0).is_recent());
        assert!(!at(85.0).is_recent());
        assert!(!at(10.0).is_recent());
    }
}

// Best-effort sequential apply engine
//
// The provisioning sequence is a list of (domain, method, endpoint,
// payload) entries -- data, not code. A failed step is logged and
// recorded, and the next step still executes; there is no rollback and
// no retry. Partial application is an accepted outcome.

use rutx_api::{DeviceClient, Method};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::reconcile::{replace_multi_ap_interface, reset_static_leases};

/// One configuration write in a provisioning plan.
#[derive(Debug, Clone)]
pub struct ApplyStep {
    /// Human-readable subsystem name, used in logs and the report.
    pub domain: &'static str,
    pub method: Method,
    pub endpoint: String,
    /// Inner payload; the client wraps it in the `data` envelope.
    pub payload: Value,
}

impl ApplyStep {
    pub fn put(domain: &'static str, endpoint: &str, payload: Value) -> Self {
        Self {
            domain,
            method: Method::Put,
            endpoint: endpoint.to_owned(),
            payload,
        }
    }

    pub fn post(domain: &'static str, endpoint: &str, payload: Value) -> Self {
        Self {
            domain,
            method: Method::Post,
            endpoint: endpoint.to_owned(),
            payload,
        }
    }
}

/// Outcome of one step.
#[derive(Debug)]
pub struct StepResult {
    pub domain: &'static str,
    pub error: Option<CoreError>,
}

impl StepResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-step outcomes for a whole plan run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub steps: Vec<StepResult>,
}

impl ApplyReport {
    /// Number of failed steps.
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.succeeded()).count()
    }

    /// `true` when every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }

    /// Iterator over the failed steps.
    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.succeeded())
    }

    /// Fold the outcome of a follow-up operation into the report.
    pub fn record(&mut self, domain: &'static str, result: Result<(), CoreError>) {
        match &result {
            Ok(()) => info!("{domain} configured"),
            Err(err) => warn!("failed to configure {domain}: {err}"),
        }
        self.steps.push(StepResult {
            domain,
            error: result.err(),
        });
    }
}

/// Apply every step in order, never aborting on a step failure.
///
/// Each failure is logged with the device's response text; the caller
/// decides what to do with the report (the CLI prints a summary).
pub async fn apply_steps(client: &DeviceClient, steps: &[ApplyStep]) -> ApplyReport {
    let mut report = ApplyReport::default();

    for step in steps {
        let result = client.send(step.method, &step.endpoint, &step.payload).await;
        match result {
            Ok(()) => {
                info!("{} configured", step.domain);
                report.steps.push(StepResult {
                    domain: step.domain,
                    error: None,
                });
            }
            Err(err) => {
                warn!("failed to configure {}: {err}", step.domain);
                report.steps.push(StepResult {
                    domain: step.domain,
                    error: Some(err.into()),
                });
            }
        }
    }

    report
}

/// Run the full factory-defaults sequence: the declarative sweep, then
/// the Multi-AP station swap and the lease wipe.
///
/// Every part is best-effort. A failure anywhere is recorded in the
/// report and the remaining parts still run, so the caller can always
/// proceed to the reboot.
pub async fn restore_defaults(client: &DeviceClient, steps: &[ApplyStep]) -> ApplyReport {
    let mut report = apply_steps(client, steps).await;
    report.record(
        "multi-ap station",
        replace_multi_ap_interface(client).await,
    );
    report.record(
        "static leases",
        reset_static_leases(client, None).await,
    );
    report
}

// rutx-core: the provisioning engine.
//
// Everything stateful about first-time router setup lives here: the
// declarative best-effort apply engine, the read-modify-write
// reconcilers for collection resources, the post-reboot readiness
// poller, and the SSH/UCI path used by the setup-file flow. The HTTP
// mechanics live in rutx-api; the CLI drives both.

pub mod apply;
pub mod error;
pub mod net;
pub mod plan;
pub mod readiness;
pub mod reconcile;
pub mod setup;
pub mod ssh;
pub mod uci;

pub use apply::{ApplyReport, ApplyStep, StepResult, apply_steps, restore_defaults};
pub use error::CoreError;
pub use plan::{RobotModel, provisioning_plan};
pub use readiness::{AuthIndicator, PollOutcome, PollSettings, wait_for_connectivity};
pub use reconcile::{
    LeaseSpec, WifiReconcile, add_static_lease, add_wifi_network, remove_wifi_network,
    replace_multi_ap_interface, reset_static_leases,
};
pub use setup::{ClientNetwork, Radio, SetupConfig, multi_wifi_rewrite};
pub use ssh::SshRunner;
pub use uci::UciBatch;

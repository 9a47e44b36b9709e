// System actions

use serde_json::json;
use tracing::debug;

use crate::client::DeviceClient;
use crate::endpoint;
use crate::error::Error;

impl DeviceClient {
    /// Reboot the device.
    ///
    /// `POST /api/system/actions/reboot`. The session does not survive
    /// the reboot; callers wanting to talk to the device again must
    /// create a fresh client and log in.
    pub async fn reboot(&self) -> Result<(), Error> {
        debug!("rebooting device");
        self.post(endpoint::REBOOT, &json!({})).await
    }
}

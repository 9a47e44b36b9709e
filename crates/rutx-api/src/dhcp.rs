// DHCP endpoints
//
// Static-lease collection CRUD. Bulk delete takes an id list in the
// request body, matching the device's collection-DELETE convention.

use serde_json::json;
use tracing::debug;

use crate::client::DeviceClient;
use crate::endpoint;
use crate::error::Error;
use crate::models::StaticLease;

impl DeviceClient {
    /// List static DHCP leases.
    ///
    /// `GET /api/dhcp/static_leases/ipv4/config`
    pub async fn list_static_leases(&self) -> Result<Vec<StaticLease>, Error> {
        debug!("listing static leases");
        self.get_data(endpoint::DHCP_STATIC_LEASES).await
    }

    /// Create one static lease.
    ///
    /// `POST /api/dhcp/static_leases/ipv4/config`
    pub async fn create_static_lease(&self, ip: &str, mac: &str, name: &str) -> Result<(), Error> {
        debug!(ip, mac, name, "creating static lease");
        self.post(
            endpoint::DHCP_STATIC_LEASES,
            &json!({ "ip": ip, "mac": mac, "name": name }),
        )
        .await
    }

    /// Bulk-delete static leases by id.
    ///
    /// `DELETE /api/dhcp/static_leases/ipv4/config` with an id list body.
    pub async fn delete_static_leases(&self, ids: &[String]) -> Result<(), Error> {
        debug!(?ids, "deleting static leases");
        self.delete(endpoint::DHCP_STATIC_LEASES, &ids).await
    }
}

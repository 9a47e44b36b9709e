// Wireless endpoints
//
// Multi-AP network collection (the uplink list) and the wireless
// interfaces collection. These back the read-modify-write reconcilers
// in rutx-core.

use serde_json::Value;
use tracing::debug;

use crate::client::DeviceClient;
use crate::endpoint;
use crate::error::Error;
use crate::models::{MultiApNetwork, WirelessInterface};

impl DeviceClient {
    /// List Multi-AP networks.
    ///
    /// `GET /api/wireless/multi_ap/config`
    pub async fn list_multi_ap_networks(&self) -> Result<Vec<MultiApNetwork>, Error> {
        debug!("listing multi-AP networks");
        self.get_data(endpoint::WIRELESS_MULTI_AP).await
    }

    /// Create a Multi-AP network entry.
    ///
    /// `POST /api/wireless/multi_ap/config`
    pub async fn create_multi_ap_network(&self, attrs: &Value) -> Result<(), Error> {
        debug!("creating multi-AP network");
        self.post(endpoint::WIRELESS_MULTI_AP, attrs).await
    }

    /// Update a Multi-AP network entry by id.
    ///
    /// `PUT /api/wireless/multi_ap/config/{id}`
    pub async fn update_multi_ap_network(&self, id: &str, attrs: &Value) -> Result<(), Error> {
        debug!(id, "updating multi-AP network");
        self.put(&endpoint::entry(endpoint::WIRELESS_MULTI_AP, id), attrs)
            .await
    }

    /// Delete a Multi-AP network entry by id.
    ///
    /// `DELETE /api/wireless/multi_ap/config/{id}`
    pub async fn delete_multi_ap_network(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting multi-AP network");
        self.delete_entry(&endpoint::entry(endpoint::WIRELESS_MULTI_AP, id))
            .await
    }

    /// List wireless interfaces.
    ///
    /// `GET /api/wireless/interfaces/config`
    pub async fn list_wireless_interfaces(&self) -> Result<Vec<WirelessInterface>, Error> {
        debug!("listing wireless interfaces");
        self.get_data(endpoint::WIRELESS_INTERFACES).await
    }

    /// Create a wireless interface.
    ///
    /// `POST /api/wireless/interfaces/config`
    pub async fn create_wireless_interface(&self, attrs: &Value) -> Result<(), Error> {
        debug!("creating wireless interface");
        self.post(endpoint::WIRELESS_INTERFACES, attrs).await
    }

    /// Bulk-delete wireless interfaces by id.
    ///
    /// `DELETE /api/wireless/interfaces/config` with an id list body.
    pub async fn delete_wireless_interfaces(&self, ids: &[String]) -> Result<(), Error> {
        debug!(?ids, "deleting wireless interfaces");
        self.delete(endpoint::WIRELESS_INTERFACES, &ids).await
    }
}

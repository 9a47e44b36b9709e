// Read-modify-write reconcilers for collection resources.
//
// The caller never tracks remote ids across runs, so every operation
// starts with a GET and matches on the secondary key (ssid, mac).
// Unlike apply-engine steps, failures here are raised to the caller.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info, warn};

use rutx_api::DeviceClient;

use crate::error::CoreError;

/// How an add-network call converged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WifiReconcile {
    /// An entry with the SSID already existed; its key was updated.
    Updated { id: String },
    /// No entry matched; a new one was created.
    Created,
}

/// Ensure exactly one Multi-AP network entry exists for `ssid`.
///
/// Idempotent with respect to SSID: an existing entry is updated in
/// place (password and enable flag), otherwise one is created. Two
/// calls with the same SSID leave a single entry.
pub async fn add_wifi_network(
    client: &DeviceClient,
    ssid: &str,
    key: &SecretString,
) -> Result<WifiReconcile, CoreError> {
    let networks = client.list_multi_ap_networks().await?;

    let attrs = json!({
        "enabled": "1",
        "ssid": ssid,
        "key": key.expose_secret(),
    });

    if let Some(existing) = networks.iter().find(|n| n.ssid == ssid) {
        info!(ssid, id = existing.id, "network already exists, updating");
        client.update_multi_ap_network(&existing.id, &attrs).await?;
        return Ok(WifiReconcile::Updated {
            id: existing.id.clone(),
        });
    }

    client.create_multi_ap_network(&attrs).await?;
    Ok(WifiReconcile::Created)
}

/// Remove the Multi-AP network entry for `ssid`, if one exists.
///
/// Returns `false` (with a warning) when no entry matches; an absent
/// network is not an error.
pub async fn remove_wifi_network(client: &DeviceClient, ssid: &str) -> Result<bool, CoreError> {
    let networks = client.list_multi_ap_networks().await?;

    match networks.iter().find(|n| n.ssid == ssid) {
        Some(existing) => {
            client.delete_multi_ap_network(&existing.id).await?;
            info!(ssid, "network removed");
            Ok(true)
        }
        None => {
            warn!(ssid, "network not found, nothing to remove");
            Ok(false)
        }
    }
}

/// Replace the Multi-AP station interface with the canonical one.
///
/// Deletes any wireless interface in `multi_ap` mode, then creates the
/// fixed station interface on radio1 bound to the wwan network. At
/// most one such interface can exist afterwards; there is a brief
/// window with none during the swap.
pub async fn replace_multi_ap_interface(client: &DeviceClient) -> Result<(), CoreError> {
    let interfaces = client.list_wireless_interfaces().await?;

    if let Some(existing) = interfaces
        .iter()
        .find(|i| i.mode.as_deref() == Some("multi_ap"))
    {
        debug!(id = existing.id, "deleting existing Multi-AP interface");
        client
            .delete_wireless_interfaces(std::slice::from_ref(&existing.id))
            .await?;
    }

    client
        .create_wireless_interface(&json!({
            "id": "wifi-iface",
            "network": "wwan",
            "device": ["radio1"],
            "mode": "multi_ap",
            "enabled": "1",
            "scan_time": "30",
        }))
        .await?;

    Ok(())
}

/// A static DHCP lease to assert.
#[derive(Debug, Clone)]
pub struct LeaseSpec {
    pub ip: String,
    pub mac: String,
    pub name: String,
}

impl LeaseSpec {
    /// Validate before touching the device: all fields present, IP is
    /// a dotted quad, MAC is six colon-separated hex octets.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ip.is_empty() || self.mac.is_empty() || self.name.is_empty() {
            return Err(CoreError::validation("IP, MAC and name are required"));
        }
        if self.ip.parse::<std::net::Ipv4Addr>().is_err() {
            return Err(CoreError::validation(format!(
                "invalid IP address '{}'",
                self.ip
            )));
        }
        let octets: Vec<&str> = self.mac.split(':').collect();
        let mac_ok = octets.len() == 6
            && octets
                .iter()
                .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()));
        if !mac_ok {
            return Err(CoreError::validation(format!(
                "invalid MAC address '{}'",
                self.mac
            )));
        }
        Ok(())
    }
}

/// Create one static lease after validating its fields.
pub async fn add_static_lease(client: &DeviceClient, lease: &LeaseSpec) -> Result<(), CoreError> {
    lease.validate()?;
    client
        .create_static_lease(&lease.ip, &lease.mac, &lease.name)
        .await?;
    Ok(())
}

/// Wipe all static leases, then assert one if given.
///
/// Used to clear leases left over from a previous provisioning run;
/// afterwards the collection holds exactly the asserted entry (or
/// nothing).
pub async fn reset_static_leases(
    client: &DeviceClient,
    assert: Option<&LeaseSpec>,
) -> Result<(), CoreError> {
    let leases = client.list_static_leases().await?;

    if !leases.is_empty() {
        let ids: Vec<String> = leases.into_iter().map(|l| l.id).collect();
        debug!(count = ids.len(), "deleting stale static leases");
        client.delete_static_leases(&ids).await?;
    }

    if let Some(lease) = assert {
        add_static_lease(client, lease).await?;
    }

    Ok(())
}

//! Wire types for the collection resources the provisioning flow
//! reconciles.
//!
//! Identity is the remote-assigned `id` string; callers never track ids
//! across runs, so lookups match on the secondary key (ssid, mac). The
//! device stringifies booleans and integers ("1", "0") -- fields keep
//! that representation rather than inventing a richer schema.

use serde::{Deserialize, Serialize};

/// One entry in the Multi-AP network list (an uplink the router may
/// join as a station).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultiApNetwork {
    pub id: String,
    pub ssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,
}

/// A fixed DHCP IP-to-MAC binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticLease {
    pub id: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub name: String,
}

/// A wireless interface entry. Only the fields the reconciler needs:
/// `mode` identifies the Multi-AP station interface.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WirelessInterface {
    pub id: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub ssid: Option<String>,
}

//! Local setup-file model for the SSH/UCI flow.
//!
//! The setup file is a small JSON document with optional sections; an
//! absent section means "skip that part", never an error. Validation
//! happens eagerly, before any SSH traffic.

use secrecy::SecretString;
use serde::Deserialize;
use tracing::warn;

use crate::error::CoreError;
use crate::uci::UciBatch;

/// WPA2 minimum passphrase length; anything shorter (but non-empty)
/// is a configuration mistake, not an open network.
const MIN_PASSPHRASE_LEN: usize = 8;

/// Join codes are shipped with this placeholder in the template file.
const HUSARNET_PLACEHOLDER: &str = "your_join_code";

/// Which radio carries the Multi-AP uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radio {
    /// 2.4 GHz radio (the default).
    #[default]
    Radio0,
    /// 5 GHz radio.
    Radio1,
}

impl Radio {
    /// UCI device name for this radio.
    pub fn device_name(self) -> &'static str {
        match self {
            Self::Radio0 => "radio0",
            Self::Radio1 => "radio1",
        }
    }
}

// Accept 0/1 both as JSON numbers and as strings; the template files
// in the field use either form.
impl<'de> Deserialize<'de> for Radio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Number(n) if n.as_u64() == Some(0) => Ok(Self::Radio0),
            serde_json::Value::Number(n) if n.as_u64() == Some(1) => Ok(Self::Radio1),
            serde_json::Value::String(s) if s == "0" => Ok(Self::Radio0),
            serde_json::Value::String(s) if s == "1" => Ok(Self::Radio1),
            _ => Err(serde::de::Error::custom(
                "allowed values for wifi_client_radio are 0 or 1",
            )),
        }
    }
}

/// One Wi-Fi network as written in the setup file.
#[derive(Debug, Clone, Deserialize)]
pub struct WifiNetworkSpec {
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// The `husarnet` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HusarnetSection {
    #[serde(default, alias = "joincode")]
    pub join_code: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

impl HusarnetSection {
    /// The (join_code, hostname) pair when the section is actually
    /// filled in; `None` for missing fields or the template
    /// placeholder code.
    pub fn resolved(&self) -> Option<(&str, &str)> {
        let code = self.join_code.as_deref()?;
        let hostname = self.hostname.as_deref()?;
        if code == HUSARNET_PLACEHOLDER {
            warn!("husarnet join code is the template placeholder, skipping");
            return None;
        }
        Some((code, hostname))
    }
}

/// The whole setup file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub wifi_ap: Option<Vec<WifiNetworkSpec>>,
    #[serde(default)]
    pub wifi_client: Option<Vec<WifiNetworkSpec>>,
    #[serde(default)]
    pub wifi_client_radio: Option<Radio>,
    #[serde(default)]
    pub husarnet: Option<HusarnetSection>,
}

/// A validated client-uplink network.
#[derive(Debug, Clone)]
pub struct ClientNetwork {
    pub ssid: String,
    /// `None` means an open network.
    pub key: Option<SecretString>,
}

impl SetupConfig {
    /// The radio for the Multi-AP uplink, defaulting (with a warning)
    /// to 2.4 GHz when the section is absent.
    pub fn client_radio(&self) -> Radio {
        self.wifi_client_radio.unwrap_or_else(|| {
            warn!("wifi_client_radio not defined, assuming 2.4GHz radio");
            Radio::default()
        })
    }

    /// Validate the `wifi_client` section into uplink networks.
    ///
    /// Returns `None` when the section is absent (skip the client
    /// configuration entirely). An empty SSID is fatal; an empty or
    /// missing password downgrades to an open network with a warning;
    /// a short password is fatal.
    pub fn validated_clients(&self) -> Result<Option<Vec<ClientNetwork>>, CoreError> {
        let Some(specs) = &self.wifi_client else {
            return Ok(None);
        };
        validate_networks(specs, "wifi_client").map(Some)
    }
}

fn validate_networks(
    specs: &[WifiNetworkSpec],
    section: &str,
) -> Result<Vec<ClientNetwork>, CoreError> {
    let mut out = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        let entry = index + 1;

        if spec.ssid.is_empty() {
            return Err(CoreError::validation(format!(
                "no SSID for {section} entry {entry}"
            )));
        }

        let key = match spec.password.as_deref() {
            None | Some("") => {
                warn!(
                    "no password for {section} entry {entry}, assuming an open network -- \
                     make sure this is correct"
                );
                None
            }
            Some(p) if p.len() < MIN_PASSPHRASE_LEN => {
                return Err(CoreError::validation(format!(
                    "password for {section} entry {entry} is shorter than \
                     the minimal length of {MIN_PASSPHRASE_LEN}"
                )));
            }
            Some(p) => Some(SecretString::from(p.to_owned())),
        };

        out.push(ClientNetwork {
            ssid: spec.ssid.clone(),
            key,
        });
    }

    Ok(out)
}

/// Build the UCI batch that rewrites the Multi-AP uplink list.
///
/// Deletes the `existing` entries (popping index 0 shifts the rest
/// down), appends one section per network with priority following list
/// order, optionally retargets the uplink radio, then commits and
/// reloads.
pub fn multi_wifi_rewrite(
    existing: u32,
    networks: &[ClientNetwork],
    change_radio_to: Option<Radio>,
) -> UciBatch {
    use secrecy::ExposeSecret;

    let mut batch = UciBatch::new();

    for _ in 0..existing {
        batch.delete("multi_wifi.@wifi-iface[0]");
    }

    for (index, network) in networks.iter().enumerate() {
        batch.add("multi_wifi", "wifi-iface");
        batch.set("multi_wifi.@wifi-iface[-1].ssid", &network.ssid);
        if let Some(key) = &network.key {
            batch.set("multi_wifi.@wifi-iface[-1].key", key.expose_secret());
        }
        batch.set("multi_wifi.@wifi-iface[-1].enabled", "1");
        batch.set(
            "multi_wifi.@wifi-iface[-1].priority",
            &(index + 1).to_string(),
        );
    }

    if let Some(radio) = change_radio_to {
        batch.set("wireless.multi_wifi.device", radio.device_name());
    }

    batch.commit().reload();
    batch
}

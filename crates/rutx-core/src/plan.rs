//! The factory provisioning plan.
//!
//! Fixed payloads for every subsystem a fresh router needs, in apply
//! order. The only inputs are the robot model (SSID prefix) and the
//! 4-character serial number; everything else is canonical data.

use std::fmt;
use std::str::FromStr;

use serde_json::json;

use crate::apply::ApplyStep;
use crate::error::CoreError;
use rutx_api::endpoint;

/// NMEA sentences forwarded to the robot computer, one rule each.
const NMEA_SENTENCES: [&str; 11] = [
    "GPGSV", "GPGGA", "GPVTG", "GPRMC", "GPGSA", "GLGSV", "GNGSA", "GNGNS", "GAGSV", "PQGSV",
    "PQGSA",
];

/// Default Wi-Fi access-point password asserted during provisioning.
const DEFAULT_AP_KEY: &str = "husarion";

/// Robot model, selecting the SSID name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotModel {
    Panther,
    Lynx,
}

impl RobotModel {
    /// Three-letter code used on data plates and in prompts.
    pub fn code(self) -> &'static str {
        match self {
            Self::Panther => "PTH",
            Self::Lynx => "LNX",
        }
    }

    /// SSID prefix for the default access points.
    pub fn ssid_prefix(self) -> &'static str {
        match self {
            Self::Panther => "Panther_",
            Self::Lynx => "Lynx_",
        }
    }
}

impl FromStr for RobotModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PTH" => Ok(Self::Panther),
            "LNX" => Ok(Self::Lynx),
            other => Err(CoreError::validation(format!(
                "invalid robot model '{other}': valid options are 'PTH' or 'LNX'"
            ))),
        }
    }
}

impl fmt::Display for RobotModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Build the full fixed apply sequence for a factory reset.
///
/// Fails before any remote work if the serial number is not exactly
/// four characters. The Multi-AP interface and static-lease cleanup
/// are reconciler operations run after this plan, not steps in it.
pub fn provisioning_plan(model: RobotModel, serial: &str) -> Result<Vec<ApplyStep>, CoreError> {
    if serial.chars().count() != 4 {
        return Err(CoreError::validation(
            "robot serial number must be 4 characters long",
        ));
    }

    let prefix = model.ssid_prefix();

    let nmea_rules: Vec<_> = NMEA_SENTENCES
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "forwarding_enabled": "1",
                "forwarding_interval": "1",
            })
        })
        .collect();

    Ok(vec![
        ApplyStep::put(
            "DHCP server",
            endpoint::DHCP_SERVER_LAN,
            json!({ "leasetime": "12h" }),
        ),
        ApplyStep::put(
            "WAN interfaces",
            endpoint::INTERFACES,
            json!([
                { "id": "wan", "enabled": "0", "ifname": [] },
                { "id": "wan6", "enabled": "0", "ifname": [] },
            ]),
        ),
        ApplyStep::post(
            "WWAN interface",
            endpoint::INTERFACES,
            json!({
                "area_type": "wan",
                "id": "wwan",
                "metric": "2",
                "proto": "dhcp",
                "name": "wwan",
            }),
        ),
        ApplyStep::put(
            "LAN interface",
            endpoint::INTERFACES_LAN,
            json!({
                "ipaddr": "10.15.20.1",
                "ifname": ["eth0", "eth1"],
            }),
        ),
        ApplyStep::put(
            "firewall zone",
            endpoint::FIREWALL_ZONE_WAN,
            json!({ "network": ["wan", "wan6", "mob1s1a1", "mob1s2a1", "wwan"] }),
        ),
        ApplyStep::put(
            "NTP client",
            endpoint::NTP_CLIENT,
            json!({
                "enabled": "1",
                "zoneName": "Europe/Warsaw",
                "interval": "86400",
                "sync_enabled": "1",
            }),
        ),
        // The web UI writes 7/3 for glonass/beidou but the API only
        // accepts 0 or 1.
        ApplyStep::put(
            "GPS",
            endpoint::GPS_GLOBAL,
            json!({
                "enabled": "1",
                "galileo_sup": "1",
                "glonass_sup": "1",
                "beidou_sup": "1",
            }),
        ),
        ApplyStep::put(
            "NMEA forwarding",
            endpoint::GPS_NMEA_FORWARDING,
            json!({
                "enabled": "1",
                "port": "5000",
                "proto": "udp",
                "hostname": "10.15.20.2",
            }),
        ),
        ApplyStep::put(
            "NMEA rules",
            endpoint::GPS_NMEA_RULES,
            json!(nmea_rules),
        ),
        ApplyStep::put(
            "wireless radios",
            endpoint::WIRELESS_DEVICES,
            json!([
                { "id": "radio0", "channel": "auto" },
                { "id": "radio1", "channel": "auto" },
            ]),
        ),
        ApplyStep::put(
            "wireless country",
            endpoint::WIRELESS_DEVICES_GLOBAL,
            json!({ "country": "PL" }),
        ),
        ApplyStep::put(
            "access-point SSIDs",
            endpoint::WIRELESS_INTERFACES,
            json!([
                {
                    "id": "default_radio0",
                    "ssid": format!("{prefix}{serial}"),
                    "key": DEFAULT_AP_KEY,
                },
                {
                    "id": "default_radio1",
                    "ssid": format!("{prefix}5G_{serial}"),
                    "key": DEFAULT_AP_KEY,
                },
            ]),
        ),
    ])
}

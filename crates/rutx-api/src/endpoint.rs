//! REST endpoint paths on the RUTX11.
//!
//! Every path the provisioning flow touches, in one place. Collection
//! endpoints take `/{id}` suffixes for single-entry operations; the
//! [`entry`] helper builds those.

pub const LOGIN: &str = "/api/login";
pub const REBOOT: &str = "/api/system/actions/reboot";

pub const DHCP_SERVER_LAN: &str = "/api/dhcp/servers/ipv4/config/lan";
pub const DHCP_STATIC_LEASES: &str = "/api/dhcp/static_leases/ipv4/config";

pub const INTERFACES: &str = "/api/interfaces/config";
pub const INTERFACES_LAN: &str = "/api/interfaces/config/lan";

pub const WIRELESS_DEVICES: &str = "/api/wireless/devices/config";
pub const WIRELESS_DEVICES_GLOBAL: &str = "/api/wireless/devices/global";
pub const WIRELESS_INTERFACES: &str = "/api/wireless/interfaces/config";
pub const WIRELESS_MULTI_AP: &str = "/api/wireless/multi_ap/config";

pub const GPS_GLOBAL: &str = "/api/gps/global";
pub const GPS_NMEA_FORWARDING: &str = "/api/gps/nmea/config/nmea_forwarding";
pub const GPS_NMEA_RULES: &str = "/api/gps/nmea/rules/config";

pub const NTP_CLIENT: &str = "/api/date_time/ntp/client/config/ntpclient";

/// Zone 3 is the WAN zone on a factory-default RUTX11.
pub const FIREWALL_ZONE_WAN: &str = "/api/firewall/zones/config/3";

/// Path for a single entry inside a collection endpoint.
pub fn entry(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

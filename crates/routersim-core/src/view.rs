// ── Read views ──
//
// Immutable snapshots handed out by `RouterEngine`. They own their data,
// so holding one never holds the engine lock. Secrets are reduced to
// masks or lengths before they get here.

use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{
    ConnectedDevice, DetectedNetwork, DeviceType, FrequencyBand, MacAddress, SecurityMode,
    TrafficStats,
};

/// What a masked secret renders as.
pub const MASKED_SECRET: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub status: String,
    pub ssid: String,
    pub is_on: bool,
    pub frequency_band: FrequencyBand,
    pub channel: u16,
    pub security_mode: SecurityMode,
    pub connected_devices: usize,
    pub max_devices: usize,
    pub firmware_version: String,
    pub update_available: bool,
    /// "5 days, 0 hours"
    pub uptime: String,
    pub uptime_seconds: u64,
    pub reboot_count: u32,
    /// "enabled" or "disabled"
    pub guest_network: String,
}

/// Router configuration with every password masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigView {
    pub ssid: String,
    pub password: String,
    pub password_length: usize,
    pub is_on: bool,
    pub frequency_band: FrequencyBand,
    pub channel: u16,
    pub security_mode: SecurityMode,
    pub guest_network_enabled: bool,
    pub guest_ssid: Option<String>,
    pub guest_password: Option<String>,
    pub firmware_version: String,
    pub uptime_seconds: u64,
    pub uptime_readable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceView {
    pub mac: MacAddress,
    pub ip: IpAddr,
    pub hostname: String,
    pub device_type: DeviceType,
    pub signal_dbm: i32,
    pub signal_bars: u8,
    pub connected_at: DateTime<Utc>,
    /// Association time rendered by `humantime`, e.g. "2h 15m".
    pub connected_for: String,
}

impl DeviceView {
    pub(crate) fn from_device(device: &ConnectedDevice, now: DateTime<Utc>) -> Self {
        let secs = (now - device.connected_at).num_seconds().max(0);
        let whole = Duration::from_secs(u64::try_from(secs).unwrap_or_default());
        Self {
            mac: device.mac.clone(),
            ip: device.ip,
            hostname: device.hostname.clone(),
            device_type: device.device_type,
            signal_dbm: device.signal_dbm,
            signal_bars: device.signal_bars(),
            connected_at: device.connected_at,
            connected_for: humantime::format_duration(whole).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevicesView {
    pub connected_devices: Vec<DeviceView>,
    pub total_devices: usize,
    pub max_devices: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworksView {
    pub available_networks: Vec<DetectedNetwork>,
    pub total_networks: usize,
    pub scanned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    #[serde(flatten)]
    pub traffic: TrafficStats,
    pub connected_devices: usize,
}

/// Facts a security review needs, without the secrets themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityPosture {
    pub ssid: String,
    pub security_mode: SecurityMode,
    pub password_length: usize,
    pub guest_network_enabled: bool,
    /// `None` while the guest network is disabled.
    pub guest_password_distinct: Option<bool>,
    pub firmware_version: String,
    pub update_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_view_renders_connection_age() {
        let now = Utc::now();
        let device = ConnectedDevice {
            mac: MacAddress::new("aa:bb:cc:dd:ee:01"),
            ip: IpAddr::from([192, 168, 1, 101]),
            hostname: "iPhone 14".into(),
            device_type: DeviceType::Phone,
            signal_dbm: -45,
            connected_at: now - chrono::Duration::hours(2),
        };
        let view = DeviceView::from_device(&device, now);
        assert_eq!(view.connected_for, "2h");
        assert_eq!(view.signal_bars, 4);
    }
}

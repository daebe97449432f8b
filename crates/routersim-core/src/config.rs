// ── Runtime engine configuration ──
//
// These types describe the router a `RouterEngine` starts out as and how
// its simulation behaves. They never touch disk: the config crate (or a
// test) builds an `EngineConfig` and hands it in.

use std::net::IpAddr;
use std::time::Duration;

use secrecy::SecretString;

use crate::model::{DeviceType, FrequencyBand, SecurityMode};

/// A device present on the network at construction time.
#[derive(Debug, Clone)]
pub struct DeviceSeed {
    pub mac: String,
    pub ip: IpAddr,
    pub hostname: String,
    pub device_type: DeviceType,
    pub signal_dbm: i32,
    /// How long the device has already been associated.
    pub connected_for: Duration,
}

/// Initial router state. Validated with the same rules as the operations.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub ssid: String,
    pub password: SecretString,
    pub band: FrequencyBand,
    pub channel: u16,
    pub security_mode: SecurityMode,
    pub firmware_version: String,
    pub uptime_secs: u64,
    pub max_devices: usize,
    pub devices: Vec<DeviceSeed>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            ssid: "HomeNetwork".into(),
            password: SecretString::from("secure_password_123".to_string()),
            band: FrequencyBand::TwoPointFourGhz,
            channel: 6,
            security_mode: SecurityMode::Wpa3,
            firmware_version: "v2.1.4".into(),
            uptime_secs: 432_000,
            max_devices: 32,
            devices: default_devices(),
        }
    }
}

fn default_devices() -> Vec<DeviceSeed> {
    vec![
        DeviceSeed {
            mac: "AA:BB:CC:DD:EE:01".into(),
            ip: IpAddr::from([192, 168, 1, 101]),
            hostname: "iPhone 14".into(),
            device_type: DeviceType::Phone,
            signal_dbm: -45,
            connected_for: Duration::from_secs(2 * 3_600),
        },
        DeviceSeed {
            mac: "AA:BB:CC:DD:EE:02".into(),
            ip: IpAddr::from([192, 168, 1, 102]),
            hostname: "MacBook Pro".into(),
            device_type: DeviceType::Laptop,
            signal_dbm: -38,
            connected_for: Duration::from_secs(5 * 3_600),
        },
        DeviceSeed {
            mac: "AA:BB:CC:DD:EE:03".into(),
            ip: IpAddr::from([192, 168, 1, 103]),
            hostname: "Smart TV".into(),
            device_type: DeviceType::Tv,
            signal_dbm: -55,
            connected_for: Duration::from_secs(5 * 86_400),
        },
    ]
}

/// Simulation tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Log entries kept before the oldest are dropped.
    pub log_retention: usize,
    /// Upper bound on networks returned by a scan (own networks included).
    pub scan_max_networks: usize,
    /// Chance that a firmware check reports an available update.
    pub firmware_update_probability: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            log_retention: 100,
            scan_max_networks: 8,
            firmware_update_probability: 0.25,
        }
    }
}

/// Everything a `RouterEngine` needs to come up.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub router: RouterSettings,
    pub simulation: SimulationSettings,
}

impl EngineConfig {
    /// Default router with a fixed RNG seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            simulation: SimulationSettings {
                seed: Some(seed),
                ..SimulationSettings::default()
            },
            ..Self::default()
        }
    }
}

//! Configuration for the routersim binary.
//!
//! TOML file + `ROUTERSIM_` environment layering through `figment`, and
//! translation to `routersim_core::EngineConfig`. Every router value has
//! a default matching the factory state, so an empty file is valid.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use routersim_core::{
    CoreError, DeviceSeed, DeviceType, EngineConfig, FrequencyBand, RouterEngine, RouterSettings,
    SecurityMode, SimulationSettings,
};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `ROUTERSIM_ROUTER__SSID`.
pub const ENV_PREFIX: &str = "ROUTERSIM_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("router settings rejected: {0}")]
    Engine(#[from] CoreError),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub router: RouterSection,

    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub server: ServerSection,
}

/// CLI presentation defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// The router the engine starts out as.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterSection {
    pub ssid: String,

    /// WiFi password (plaintext; prefer `password_env`). Unset means the
    /// factory password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the WiFi password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// "2.4GHz", "5GHz" or "dual".
    pub band: String,

    pub channel: u16,

    /// "Open", "WPA2", "WPA3" or "WPA2/WPA3".
    pub security_mode: String,

    pub firmware_version: String,

    pub uptime_secs: u64,

    pub max_devices: usize,

    pub devices: Vec<DeviceEntry>,
}

impl Default for RouterSection {
    fn default() -> Self {
        let factory = RouterSettings::default();
        Self {
            ssid: factory.ssid,
            password: None,
            password_env: None,
            band: factory.band.to_string(),
            channel: factory.channel,
            security_mode: factory.security_mode.to_string(),
            firmware_version: factory.firmware_version,
            uptime_secs: factory.uptime_secs,
            max_devices: factory.max_devices,
            devices: factory.devices.iter().map(DeviceEntry::from_seed).collect(),
        }
    }
}

/// A device already associated when the router comes up.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceEntry {
    pub mac: String,
    pub ip: IpAddr,
    pub hostname: String,
    #[serde(default = "default_device_type")]
    pub device_type: DeviceType,
    #[serde(default = "default_signal")]
    pub signal_dbm: i32,
    /// How long the device has been connected, e.g. "2h" or "5days".
    #[serde(default = "default_connected_for")]
    pub connected_for: String,
}

fn default_device_type() -> DeviceType {
    DeviceType::Other
}
fn default_signal() -> i32 {
    -50
}
fn default_connected_for() -> String {
    "0s".into()
}

impl DeviceEntry {
    fn from_seed(seed: &DeviceSeed) -> Self {
        Self {
            mac: seed.mac.clone(),
            ip: seed.ip,
            hostname: seed.hostname.clone(),
            device_type: seed.device_type,
            signal_dbm: seed.signal_dbm,
            connected_for: humantime::format_duration(seed.connected_for).to_string(),
        }
    }

    fn to_seed(&self) -> Result<DeviceSeed, ConfigError> {
        let connected_for = humantime::parse_duration(&self.connected_for).map_err(|e| {
            ConfigError::validation(
                "router.devices.connected_for",
                format!("'{}' for {}: {e}", self.connected_for, self.hostname),
            )
        })?;
        Ok(DeviceSeed {
            mac: self.mac.clone(),
            ip: self.ip,
            hostname: self.hostname.clone(),
            device_type: self.device_type,
            signal_dbm: self.signal_dbm,
            connected_for,
        })
    }
}

/// Simulation tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Fixed RNG seed for reproducible runs. Unset seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub log_retention: usize,
    pub scan_max_networks: usize,
    pub firmware_update_probability: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let factory = SimulationSettings::default();
        Self {
            seed: factory.seed,
            log_retention: factory.log_retention,
            scan_max_networks: factory.scan_max_networks,
            firmware_update_probability: factory.firmware_update_probability,
        }
    }
}

/// Transport the `serve` command starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "routersim", "routersim").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("routersim");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an
/// error; defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Write config to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Translation ─────────────────────────────────────────────────────

/// Resolve the WiFi password: `password_env` first, then the plaintext
/// `password`, then the factory default.
fn resolve_password(router: &RouterSection) -> SecretString {
    if let Some(ref env_name) = router.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }
    match router.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => RouterSettings::default().password,
    }
}

/// Build an `EngineConfig`. Parses the string-typed fields; range and
/// consistency checks are left to the engine.
pub fn to_engine_config(cfg: &Config) -> Result<EngineConfig, ConfigError> {
    let router = &cfg.router;

    let band = FrequencyBand::from_str(router.band.trim()).map_err(|_| {
        ConfigError::validation(
            "router.band",
            format!("expected '2.4GHz', '5GHz', or 'dual', got '{}'", router.band),
        )
    })?;
    let security_mode = SecurityMode::from_str(router.security_mode.trim()).map_err(|_| {
        ConfigError::validation(
            "router.security_mode",
            format!(
                "expected 'Open', 'WPA2', 'WPA3', or 'WPA2/WPA3', got '{}'",
                router.security_mode
            ),
        )
    })?;
    let devices = router
        .devices
        .iter()
        .map(DeviceEntry::to_seed)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EngineConfig {
        router: RouterSettings {
            ssid: router.ssid.clone(),
            password: resolve_password(router),
            band,
            channel: router.channel,
            security_mode,
            firmware_version: router.firmware_version.clone(),
            uptime_secs: router.uptime_secs,
            max_devices: router.max_devices,
            devices,
        },
        simulation: SimulationSettings {
            seed: cfg.simulation.seed,
            log_retention: cfg.simulation.log_retention,
            scan_max_networks: cfg.simulation.scan_max_networks,
            firmware_update_probability: cfg.simulation.firmware_update_probability,
        },
    })
}

/// Translate and construct in one step.
pub fn build_engine(cfg: &Config) -> Result<RouterEngine, ConfigError> {
    let engine = RouterEngine::new(to_engine_config(cfg)?)?;
    Ok(engine)
}

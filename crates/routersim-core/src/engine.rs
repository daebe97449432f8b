// ── Router engine ──
//
// Owns the router aggregate behind a single reader-writer lock and
// exposes the administrative operations plus read-only views. Every
// operation is synchronous and runs to completion under the lock.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::command::{
    BandChange, ChannelChange, Command, CommandResult, FirmwareCheck, GuestNetworkChange,
    PasswordChange, RebootReport, SpeedTestResult, SsidChange,
};
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::model::{ConnectedDevice, DetectedNetwork, LogEntry, MacAddress, SystemInfo};
use crate::store::RouterState;
use crate::view::{
    ConfigView, DeviceView, DevicesView, MASKED_SECRET, NetworksView, SecurityPosture,
    StatsView, StatusSnapshot,
};

/// The simulated router.
///
/// Construct one per scenario; instances share nothing. Wrap it in an
/// `Arc` to hand it to several transports at once.
pub struct RouterEngine {
    state: RwLock<RouterState>,
}

impl std::fmt::Debug for RouterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterEngine").finish_non_exhaustive()
    }
}

impl RouterEngine {
    /// Build an engine from configuration. The RNG is seeded from
    /// `simulation.seed`, or from OS entropy when unset.
    pub fn new(config: EngineConfig) -> Result<Self, CoreError> {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build an engine that draws all simulated values from `rng`.
    pub fn with_rng<R>(config: EngineConfig, rng: R) -> Result<Self, CoreError>
    where
        R: RngCore + Send + Sync + 'static,
    {
        let state = RouterState::from_config(config, Box::new(rng))?;
        info!(
            ssid = %state.network.ssid,
            band = %state.network.band,
            channel = state.network.channel,
            devices = state.devices.len(),
            "router engine initialized"
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    // Transitions validate before mutating, so a poisoned lock still
    // guards a consistent aggregate.
    fn read(&self) -> RwLockReadGuard<'_, RouterState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RouterState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Command routing ─────────────────────────────────────────────

    /// Run any operation expressed as a [`Command`].
    pub fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(command = cmd.name(), "executing command");
        let result = match cmd {
            Command::ScanNetworks => Ok(CommandResult::Networks(self.scan_networks())),
            Command::GetStatus => Ok(CommandResult::Status(self.get_status())),
            Command::Reboot => Ok(CommandResult::Rebooted(self.reboot())),
            Command::ChangeWifiPassword(req) => self
                .change_wifi_password(&req.new_password)
                .map(CommandResult::PasswordChanged),
            Command::ChangeSsid(req) => self
                .change_ssid(&req.new_ssid)
                .map(CommandResult::SsidChanged),
            Command::EnableGuestNetwork(req) => self
                .enable_guest_network(
                    req.enabled,
                    req.guest_ssid.as_deref(),
                    req.guest_password.as_deref(),
                )
                .map(CommandResult::GuestNetwork),
            Command::DisconnectDevice(req) => self
                .disconnect_device(&req.mac_address)
                .map(CommandResult::DeviceDisconnected),
            Command::ChangeChannel(req) => self
                .change_channel(req.channel)
                .map(CommandResult::ChannelChanged),
            Command::SetFrequencyBand(req) => self
                .set_frequency_band(&req.band)
                .map(CommandResult::BandChanged),
            Command::CheckFirmwareUpdate => {
                Ok(CommandResult::Firmware(self.check_firmware_update()))
            }
            Command::RunSpeedTest => Ok(CommandResult::SpeedTest(self.run_speed_test())),
        };
        if let Err(e) = &result {
            warn!(error = %e, kind = %e.kind(), "command rejected");
        }
        result
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Survey the air. Replaces the cached scan; never logs.
    pub fn scan_networks(&self) -> Vec<DetectedNetwork> {
        let found = self.write().scan();
        debug!(count = found.len(), "scan complete");
        found
    }

    pub fn get_status(&self) -> StatusSnapshot {
        let state = self.read();
        StatusSnapshot {
            status: "online".into(),
            ssid: state.network.ssid.clone(),
            is_on: true,
            frequency_band: state.network.band,
            channel: state.network.channel,
            security_mode: state.network.security_mode,
            connected_devices: state.devices.len(),
            max_devices: state.system.max_devices,
            firmware_version: state.system.firmware_version.clone(),
            update_available: state.system.update_available,
            uptime: state.system.uptime_readable(),
            uptime_seconds: state.system.uptime_secs,
            reboot_count: state.system.reboot_count,
            guest_network: if state.network.guest_enabled() {
                "enabled".into()
            } else {
                "disabled".into()
            },
        }
    }

    /// Reset uptime and bump the reboot counter. Returns immediately;
    /// the downtime in the report is advisory.
    pub fn reboot(&self) -> RebootReport {
        let report = self.write().reboot();
        info!(reboot_count = report.reboot_count, "router rebooted");
        report
    }

    pub fn change_wifi_password(&self, new_password: &str) -> Result<PasswordChange, CoreError> {
        let change = self.write().set_password(new_password)?;
        info!(length = change.new_password_length, "wifi password changed");
        Ok(change)
    }

    pub fn change_ssid(&self, new_ssid: &str) -> Result<SsidChange, CoreError> {
        let change = self.write().set_ssid(new_ssid)?;
        info!(old = %change.old_ssid, new = %change.new_ssid, "ssid changed");
        Ok(change)
    }

    /// Enabling needs both guest credentials; disabling discards them.
    pub fn enable_guest_network(
        &self,
        enabled: bool,
        guest_ssid: Option<&str>,
        guest_password: Option<&str>,
    ) -> Result<GuestNetworkChange, CoreError> {
        let change = self
            .write()
            .set_guest_network(enabled, guest_ssid, guest_password)?;
        info!(enabled = change.enabled, "guest network updated");
        Ok(change)
    }

    /// Remove a device. A MAC that is not connected (including one that
    /// was just disconnected) is `NotFound`.
    pub fn disconnect_device(&self, mac_address: &str) -> Result<ConnectedDevice, CoreError> {
        let device = self.write().disconnect(mac_address)?;
        info!(mac = %device.mac, hostname = %device.hostname, "device disconnected");
        Ok(device)
    }

    pub fn change_channel(&self, channel: u16) -> Result<ChannelChange, CoreError> {
        let change = self.write().set_channel(channel)?;
        info!(
            old = change.old_channel,
            new = change.new_channel,
            "channel changed"
        );
        Ok(change)
    }

    /// Accepts `2.4GHz`, `5GHz` or `dual` in any case. A channel that is
    /// illegal on the new band is reset to that band's default.
    pub fn set_frequency_band(&self, band: &str) -> Result<BandChange, CoreError> {
        let change = self.write().set_band(band)?;
        info!(old = %change.old_band, new = %change.new_band, "frequency band changed");
        if let Some(reset) = change.channel_reset {
            warn!(
                from = reset.old_channel,
                to = reset.new_channel,
                "channel reset for new band"
            );
        }
        Ok(change)
    }

    /// Ask the update server. Records availability; never installs.
    pub fn check_firmware_update(&self) -> FirmwareCheck {
        let check = self.write().check_firmware();
        info!(
            current = %check.current_version,
            latest = %check.latest_version,
            update_available = check.update_available,
            "firmware check"
        );
        check
    }

    pub fn run_speed_test(&self) -> SpeedTestResult {
        let result = self.write().speed_test();
        info!(
            download_mbps = result.download_mbps,
            upload_mbps = result.upload_mbps,
            latency_ms = result.latency_ms,
            "speed test completed"
        );
        result
    }

    // ── Read views ──────────────────────────────────────────────────

    pub fn config_view(&self) -> ConfigView {
        let state = self.read();
        let guest = state.network.guest.as_ref();
        ConfigView {
            ssid: state.network.ssid.clone(),
            password: MASKED_SECRET.into(),
            password_length: state.network.password_len(),
            is_on: true,
            frequency_band: state.network.band,
            channel: state.network.channel,
            security_mode: state.network.security_mode,
            guest_network_enabled: guest.is_some(),
            guest_ssid: guest.map(|g| g.ssid.clone()),
            guest_password: guest.map(|_| MASKED_SECRET.to_string()),
            firmware_version: state.system.firmware_version.clone(),
            uptime_seconds: state.system.uptime_secs,
            uptime_readable: state.system.uptime_readable(),
        }
    }

    pub fn devices_view(&self) -> DevicesView {
        let state = self.read();
        let now = Utc::now();
        let connected_devices: Vec<DeviceView> = state
            .devices
            .snapshot()
            .iter()
            .map(|d| DeviceView::from_device(d, now))
            .collect();
        DevicesView {
            total_devices: connected_devices.len(),
            connected_devices,
            max_devices: state.system.max_devices,
        }
    }

    /// Look up one connected device by MAC, in any common notation.
    pub fn device(&self, mac_address: &str) -> Option<ConnectedDevice> {
        self.read().devices.get(&MacAddress::new(mac_address)).cloned()
    }

    pub fn traffic_stats(&self) -> StatsView {
        let state = self.read();
        StatsView {
            traffic: state.stats.clone(),
            connected_devices: state.devices.len(),
        }
    }

    /// Activity log, oldest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.read().logs.snapshot()
    }

    /// The most recent scan, without running a new one.
    pub fn networks_view(&self) -> NetworksView {
        let state = self.read();
        NetworksView {
            available_networks: state.last_scan.clone(),
            total_networks: state.last_scan.len(),
            scanned_at: state.last_scan_at,
        }
    }

    pub fn system_info(&self) -> SystemInfo {
        self.read().system.clone()
    }

    pub fn security_posture(&self) -> SecurityPosture {
        let state = self.read();
        SecurityPosture {
            ssid: state.network.ssid.clone(),
            security_mode: state.network.security_mode,
            password_length: state.network.password_len(),
            guest_network_enabled: state.network.guest_enabled(),
            guest_password_distinct: state.network.guest_password_distinct(),
            firmware_version: state.system.firmware_version.clone(),
            update_available: state.system.update_available,
        }
    }

    /// Whether `candidate` is the current WiFi password. The password
    /// itself is never readable.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.read().password_matches(candidate)
    }
}

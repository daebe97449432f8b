// ── Router state aggregate ──
//
// One `RouterState` per engine. Each transition validates its whole
// input first and only then mutates, so an `Err` always leaves the
// aggregate exactly as it was.

use chrono::{DateTime, Utc};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};

use crate::command::{
    BandChange, ChannelChange, FirmwareCheck, GuestNetworkChange, PasswordChange, RebootReport,
    SpeedTestResult, SsidChange,
};
use crate::config::{EngineConfig, SimulationSettings};
use crate::error::CoreError;
use crate::model::{
    ConnectedDevice, DetectedNetwork, FrequencyBand, GuestNetwork, MacAddress, NetworkConfig,
    SystemInfo, TrafficStats,
};
use crate::sim::{firmware, scan, speed};
use crate::validate;

use super::device_table::DeviceTable;
use super::log_buffer::LogBuffer;

/// Downtime a reboot reports. The engine itself never waits.
pub(crate) const REBOOT_DOWNTIME_SECS: u64 = 120;

pub(crate) struct RouterState {
    pub(crate) network: NetworkConfig,
    pub(crate) devices: DeviceTable,
    pub(crate) last_scan: Vec<DetectedNetwork>,
    pub(crate) last_scan_at: Option<DateTime<Utc>>,
    pub(crate) stats: TrafficStats,
    pub(crate) system: SystemInfo,
    pub(crate) logs: LogBuffer,
    main_bssid: MacAddress,
    guest_bssid: MacAddress,
    sim: SimulationSettings,
    rng: Box<dyn RngCore + Send + Sync>,
}

impl RouterState {
    /// Build the initial aggregate, rejecting any setting an operation
    /// would also reject.
    pub(crate) fn from_config(
        config: EngineConfig,
        mut rng: Box<dyn RngCore + Send + Sync>,
    ) -> Result<Self, CoreError> {
        let EngineConfig { router, simulation } = config;

        validate::ssid("ssid", &router.ssid)?;
        validate::password("password", router.password.expose_secret())?;
        validate::channel(router.band, router.channel)?;
        validate::probability(
            "firmware_update_probability",
            simulation.firmware_update_probability,
        )?;
        if router.firmware_version.trim().is_empty() {
            return Err(CoreError::validation(
                "firmware_version",
                "firmware version cannot be empty",
            ));
        }
        if router.devices.len() > router.max_devices {
            return Err(CoreError::validation(
                "devices",
                format!(
                    "{} devices configured but max_devices is {}",
                    router.devices.len(),
                    router.max_devices
                ),
            ));
        }

        let now = Utc::now();
        let mut devices = DeviceTable::new();
        for seed in router.devices {
            let mac = MacAddress::new(&seed.mac);
            if !mac.is_well_formed() {
                return Err(CoreError::validation(
                    "devices.mac",
                    format!("'{}' is not a MAC address", seed.mac),
                ));
            }
            if devices.contains(&mac) {
                return Err(CoreError::validation(
                    "devices.mac",
                    format!("duplicate device MAC {mac}"),
                ));
            }
            if seed.hostname.trim().is_empty() {
                return Err(CoreError::validation(
                    "devices.hostname",
                    format!("device {mac} has no hostname"),
                ));
            }
            validate::signal(seed.signal_dbm)?;
            let connected_for =
                chrono::Duration::from_std(seed.connected_for).unwrap_or(chrono::Duration::zero());
            devices.upsert(ConnectedDevice {
                mac,
                ip: seed.ip,
                hostname: seed.hostname,
                device_type: seed.device_type,
                signal_dbm: seed.signal_dbm,
                connected_at: now - connected_for,
            });
        }

        let network = NetworkConfig {
            ssid: router.ssid,
            password: router.password,
            band: router.band,
            channel: router.channel,
            security_mode: router.security_mode,
            guest: None,
        };
        let system = SystemInfo {
            firmware_version: router.firmware_version,
            update_available: false,
            latest_version: None,
            uptime_secs: router.uptime_secs,
            reboot_count: 0,
            max_devices: router.max_devices,
        };

        let mut logs = LogBuffer::new(simulation.log_retention);
        logs.info("Router system started");
        logs.info(format!("Firmware updated to {}", system.firmware_version));
        logs.info("Guest network disabled");
        logs.info(format!("Channel set to {}", network.channel));
        logs.info(format!("Security mode set to {}", network.security_mode));

        let main_bssid = MacAddress::random_local(&mut *rng);
        let guest_bssid = MacAddress::random_local(&mut *rng);

        let mut state = Self {
            network,
            devices,
            last_scan: Vec::new(),
            last_scan_at: None,
            stats: TrafficStats::default(),
            system,
            logs,
            main_bssid,
            guest_bssid,
            sim: simulation,
            rng,
        };
        state.scan();
        Ok(state)
    }

    // ── Simulations ─────────────────────────────────────────────────

    /// Replace the cached survey with a fresh one. Never logs.
    pub(crate) fn scan(&mut self) -> Vec<DetectedNetwork> {
        let own = self.own_beacons();
        let found = scan::survey(&mut *self.rng, &own, self.sim.scan_max_networks);
        self.last_scan.clone_from(&found);
        self.last_scan_at = Some(Utc::now());
        found
    }

    fn own_beacons(&self) -> Vec<scan::OwnBeacon> {
        let radios: Vec<(FrequencyBand, u16)> = match self.network.band {
            FrequencyBand::Dual => {
                // The configured channel lives on one radio; the other
                // radio sits on its own band's default.
                let primary = FrequencyBand::of_channel(self.network.channel)
                    .unwrap_or(FrequencyBand::TwoPointFourGhz);
                let secondary = if primary == FrequencyBand::FiveGhz {
                    FrequencyBand::TwoPointFourGhz
                } else {
                    FrequencyBand::FiveGhz
                };
                vec![
                    (primary, self.network.channel),
                    (secondary, secondary.default_channel()),
                ]
            }
            band => vec![(band, self.network.channel)],
        };

        let mut beacons = Vec::new();
        for (band, channel) in radios {
            beacons.push(scan::OwnBeacon {
                ssid: self.network.ssid.clone(),
                bssid: self.main_bssid.clone(),
                channel,
                band,
                security: self.network.security_mode,
            });
            if let Some(guest) = &self.network.guest {
                beacons.push(scan::OwnBeacon {
                    ssid: guest.ssid.clone(),
                    bssid: self.guest_bssid.clone(),
                    channel,
                    band,
                    security: self.network.security_mode,
                });
            }
        }
        beacons
    }

    pub(crate) fn check_firmware(&mut self) -> FirmwareCheck {
        let draw = firmware::check(
            &mut *self.rng,
            &self.system.firmware_version,
            self.sim.firmware_update_probability,
        );
        self.system.update_available = draw.update_available;
        self.system.latest_version = Some(draw.latest_version.clone());
        if draw.update_available {
            self.logs.info(format!(
                "Firmware update check: {} available",
                draw.latest_version
            ));
        } else {
            self.logs.info("Firmware update check: Up to date");
        }
        FirmwareCheck {
            current_version: self.system.firmware_version.clone(),
            latest_version: draw.latest_version,
            update_available: draw.update_available,
            checked_at: Utc::now(),
        }
    }

    pub(crate) fn speed_test(&mut self) -> SpeedTestResult {
        let link = speed::LinkConditions {
            band: self.network.band,
            channel: self.network.channel,
            device_count: self.devices.len(),
        };
        let sample = speed::measure(&mut *self.rng, link);
        let tested_at = Utc::now();

        self.stats.download_mbps = sample.download_mbps;
        self.stats.upload_mbps = sample.upload_mbps;
        self.stats.latency_ms = sample.latency_ms;
        self.stats.jitter_ms = sample.jitter_ms;
        self.stats.packet_loss_percent = sample.packet_loss_percent;
        self.stats.packets_sent = self.stats.packets_sent.saturating_add(sample.packets_sent);
        self.stats.packets_received = self
            .stats
            .packets_received
            .saturating_add(sample.packets_sent.saturating_sub(sample.packets_lost));
        self.stats.last_measured = Some(tested_at);

        self.logs.info(format!(
            "Speed test completed: {} Mbps down, {} Mbps up",
            sample.download_mbps, sample.upload_mbps
        ));

        SpeedTestResult {
            band: link.band,
            channel: link.channel,
            download_mbps: sample.download_mbps,
            upload_mbps: sample.upload_mbps,
            latency_ms: sample.latency_ms,
            jitter_ms: sample.jitter_ms,
            packet_loss_percent: sample.packet_loss_percent,
            tested_at,
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    pub(crate) fn reboot(&mut self) -> RebootReport {
        self.system.uptime_secs = 0;
        self.system.reboot_count = self.system.reboot_count.saturating_add(1);
        self.logs.info("Router rebooted");
        RebootReport {
            reboot_count: self.system.reboot_count,
            estimated_downtime_secs: REBOOT_DOWNTIME_SECS,
            rebooted_at: Utc::now(),
        }
    }

    pub(crate) fn set_password(&mut self, new_password: &str) -> Result<PasswordChange, CoreError> {
        validate::password("new_password", new_password)?;
        self.network.password = SecretString::from(new_password.to_string());
        self.logs.info(password_changed_message());
        Ok(PasswordChange {
            new_password_length: self.network.password_len(),
        })
    }

    pub(crate) fn set_ssid(&mut self, new_ssid: &str) -> Result<SsidChange, CoreError> {
        validate::ssid("new_ssid", new_ssid)?;
        let old_ssid = std::mem::replace(&mut self.network.ssid, new_ssid.to_string());
        self.logs
            .info(format!("SSID changed from '{old_ssid}' to '{new_ssid}'"));
        Ok(SsidChange {
            old_ssid,
            new_ssid: new_ssid.to_string(),
        })
    }

    pub(crate) fn set_guest_network(
        &mut self,
        enabled: bool,
        guest_ssid: Option<&str>,
        guest_password: Option<&str>,
    ) -> Result<GuestNetworkChange, CoreError> {
        if !enabled {
            self.network.guest = None;
            self.logs.info("Guest network disabled");
            return Ok(GuestNetworkChange {
                enabled: false,
                guest_ssid: None,
                guest_password_set: false,
            });
        }

        let ssid = guest_ssid.unwrap_or_default();
        validate::ssid("guest_ssid", ssid)?;
        let password = guest_password.ok_or_else(|| {
            CoreError::validation(
                "guest_password",
                "a guest password is required to enable the guest network",
            )
        })?;
        validate::password("guest_password", password)?;

        self.network.guest = Some(GuestNetwork {
            ssid: ssid.to_string(),
            password: SecretString::from(password.to_string()),
        });
        self.logs.info(format!("Guest network enabled: {ssid}"));
        Ok(GuestNetworkChange {
            enabled: true,
            guest_ssid: Some(ssid.to_string()),
            guest_password_set: true,
        })
    }

    pub(crate) fn disconnect(&mut self, mac_address: &str) -> Result<ConnectedDevice, CoreError> {
        let mac = MacAddress::new(mac_address);
        let device = self
            .devices
            .remove(&mac)
            .ok_or_else(|| CoreError::not_found("Device", mac_address.trim()))?;
        self.logs.warning(format!(
            "Device disconnected: {} ({})",
            device.hostname, device.mac
        ));
        Ok(device)
    }

    pub(crate) fn set_channel(&mut self, channel: u16) -> Result<ChannelChange, CoreError> {
        validate::channel(self.network.band, channel)?;
        let old_channel = std::mem::replace(&mut self.network.channel, channel);
        self.logs
            .info(format!("Channel changed from {old_channel} to {channel}"));
        Ok(ChannelChange {
            old_channel,
            new_channel: channel,
        })
    }

    /// Switching band keeps the channel when it is still legal; otherwise
    /// the channel falls back to the new band's default.
    pub(crate) fn set_band(&mut self, band: &str) -> Result<BandChange, CoreError> {
        let new_band = validate::band(band)?;
        let old_band = std::mem::replace(&mut self.network.band, new_band);
        self.logs
            .info(format!("Frequency band changed from {old_band} to {new_band}"));

        let channel_reset = if new_band.supports_channel(self.network.channel) {
            None
        } else {
            let new_channel = new_band.default_channel();
            let old_channel = std::mem::replace(&mut self.network.channel, new_channel);
            self.logs.warning(format!(
                "Channel {old_channel} is not valid on {new_band}; reset to {new_channel}"
            ));
            Some(ChannelChange {
                old_channel,
                new_channel,
            })
        };

        Ok(BandChange {
            old_band,
            new_band,
            channel_reset,
        })
    }

    pub(crate) fn password_matches(&self, candidate: &str) -> bool {
        self.network.password.expose_secret() == candidate
    }
}

/// Takes no input, so the secret cannot end up in the log.
fn password_changed_message() -> &'static str {
    "WiFi password changed"
}

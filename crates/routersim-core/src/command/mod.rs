// ── Command API ──
//
// Every engine operation can be expressed as a `Command` and run through
// `RouterEngine::execute`. Adapters build commands from tool arguments;
// Rust callers can also use the typed methods on `RouterEngine` directly.

pub mod requests;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ConnectedDevice, DetectedNetwork, FrequencyBand};
use crate::view::StatusSnapshot;

pub use requests::{
    ChangeChannelRequest, ChangePasswordRequest, ChangeSsidRequest, DisconnectDeviceRequest,
    EnableGuestNetworkRequest, SetFrequencyBandRequest,
};

/// All operations the router engine accepts.
#[derive(Debug, Clone)]
pub enum Command {
    ScanNetworks,
    GetStatus,
    Reboot,
    ChangeWifiPassword(ChangePasswordRequest),
    ChangeSsid(ChangeSsidRequest),
    EnableGuestNetwork(EnableGuestNetworkRequest),
    DisconnectDevice(DisconnectDeviceRequest),
    ChangeChannel(ChangeChannelRequest),
    SetFrequencyBand(SetFrequencyBandRequest),
    CheckFirmwareUpdate,
    RunSpeedTest,
}

impl Command {
    /// Stable operation name, used in traces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScanNetworks => "scan_networks",
            Self::GetStatus => "get_status",
            Self::Reboot => "reboot",
            Self::ChangeWifiPassword(_) => "change_wifi_password",
            Self::ChangeSsid(_) => "change_ssid",
            Self::EnableGuestNetwork(_) => "enable_guest_network",
            Self::DisconnectDevice(_) => "disconnect_device",
            Self::ChangeChannel(_) => "change_channel",
            Self::SetFrequencyBand(_) => "set_frequency_band",
            Self::CheckFirmwareUpdate => "check_firmware_update",
            Self::RunSpeedTest => "run_speed_test",
        }
    }

    /// Whether the command can change router state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::GetStatus)
    }
}

// ── Results ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebootReport {
    pub reboot_count: u32,
    pub estimated_downtime_secs: u64,
    pub rebooted_at: DateTime<Utc>,
}

/// Deliberately carries only the length of the new password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub new_password_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsidChange {
    pub old_ssid: String,
    pub new_ssid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestNetworkChange {
    pub enabled: bool,
    pub guest_ssid: Option<String>,
    pub guest_password_set: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelChange {
    pub old_channel: u16,
    pub new_channel: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandChange {
    pub old_band: FrequencyBand,
    pub new_band: FrequencyBand,
    /// Set when the old channel was illegal on the new band and got reset.
    pub channel_reset: Option<ChannelChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareCheck {
    pub current_version: String,
    pub latest_version: String,
    pub update_available: bool,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedTestResult {
    pub band: FrequencyBand,
    pub channel: u16,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    pub packet_loss_percent: f64,
    pub tested_at: DateTime<Utc>,
}

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    Networks(Vec<DetectedNetwork>),
    Status(StatusSnapshot),
    Rebooted(RebootReport),
    PasswordChanged(PasswordChange),
    SsidChanged(SsidChange),
    GuestNetwork(GuestNetworkChange),
    DeviceDisconnected(ConnectedDevice),
    ChannelChanged(ChannelChange),
    BandChanged(BandChange),
    Firmware(FirmwareCheck),
    SpeedTest(SpeedTestResult),
}

impl CommandResult {
    /// One-line summary suitable for a human or an agent.
    pub fn message(&self) -> String {
        match self {
            Self::Networks(found) => format!("Found {} networks", found.len()),
            Self::Status(status) => format!(
                "Router is {} on {} channel {}",
                status.status, status.frequency_band, status.channel
            ),
            Self::Rebooted(report) => format!(
                "Router is rebooting. This will take approximately {} minutes.",
                report.estimated_downtime_secs / 60
            ),
            Self::PasswordChanged(_) => {
                "WiFi password updated successfully. All devices will need to reconnect.".into()
            }
            Self::SsidChanged(change) => format!(
                "SSID changed from '{}' to '{}'. All devices will need to reconnect.",
                change.old_ssid, change.new_ssid
            ),
            Self::GuestNetwork(change) => {
                if change.enabled {
                    "Guest network enabled".into()
                } else {
                    "Guest network disabled".into()
                }
            }
            Self::DeviceDisconnected(device) => {
                format!("Device '{}' disconnected successfully", device.hostname)
            }
            Self::ChannelChanged(change) => format!(
                "Channel changed from {} to {}",
                change.old_channel, change.new_channel
            ),
            Self::BandChanged(change) => match change.channel_reset {
                Some(reset) => format!(
                    "Frequency band changed from {} to {}; channel {} is not valid on {} and was reset to {}",
                    change.old_band,
                    change.new_band,
                    reset.old_channel,
                    change.new_band,
                    reset.new_channel
                ),
                None => format!(
                    "Frequency band changed from {} to {}",
                    change.old_band, change.new_band
                ),
            },
            Self::Firmware(check) => {
                if check.update_available {
                    format!(
                        "Firmware {} is available (installed: {})",
                        check.latest_version, check.current_version
                    )
                } else {
                    "Your router firmware is up to date".into()
                }
            }
            Self::SpeedTest(result) => format!(
                "Speed test completed: {} Mbps down, {} Mbps up, {} ms latency",
                result.download_mbps, result.upload_mbps, result.latency_ms
            ),
        }
    }
}

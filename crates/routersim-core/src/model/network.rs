// ── Wireless network configuration types ──

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Longest SSID a router will broadcast.
pub const MAX_SSID_LEN: usize = 32;

/// Shortest accepted WPA passphrase.
pub const MIN_PASSWORD_LEN: usize = 8;

const CHANNELS_2_4GHZ: &[u16] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

const CHANNELS_5GHZ: &[u16] = &[
    36, 40, 44, 48, 52, 56, 60, 64, 100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140, 144,
    149, 153, 157, 161, 165,
];

/// Radio frequency band selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum FrequencyBand {
    #[serde(rename = "2.4GHz")]
    #[strum(serialize = "2.4GHz")]
    TwoPointFourGhz,
    #[serde(rename = "5GHz")]
    #[strum(serialize = "5GHz")]
    FiveGhz,
    #[serde(rename = "dual")]
    #[strum(serialize = "dual")]
    Dual,
}

impl FrequencyBand {
    /// Channels a radio on this band may be tuned to.
    ///
    /// Dual-band accepts any channel legal on either radio.
    pub fn channels(self) -> Vec<u16> {
        match self {
            Self::TwoPointFourGhz => CHANNELS_2_4GHZ.to_vec(),
            Self::FiveGhz => CHANNELS_5GHZ.to_vec(),
            Self::Dual => CHANNELS_2_4GHZ
                .iter()
                .chain(CHANNELS_5GHZ)
                .copied()
                .collect(),
        }
    }

    pub fn supports_channel(self, channel: u16) -> bool {
        match self {
            Self::TwoPointFourGhz => CHANNELS_2_4GHZ.contains(&channel),
            Self::FiveGhz => CHANNELS_5GHZ.contains(&channel),
            Self::Dual => CHANNELS_2_4GHZ.contains(&channel) || CHANNELS_5GHZ.contains(&channel),
        }
    }

    /// Channel a radio falls back to when its current one is illegal.
    pub fn default_channel(self) -> u16 {
        match self {
            Self::TwoPointFourGhz | Self::Dual => 6,
            Self::FiveGhz => 36,
        }
    }

    /// The single radio band a channel number lives on.
    pub fn of_channel(channel: u16) -> Option<Self> {
        if CHANNELS_2_4GHZ.contains(&channel) {
            Some(Self::TwoPointFourGhz)
        } else if CHANNELS_5GHZ.contains(&channel) {
            Some(Self::FiveGhz)
        } else {
            None
        }
    }

    /// Human-readable listing used in validation messages.
    pub fn channel_summary(self) -> &'static str {
        match self {
            Self::TwoPointFourGhz => "1-11",
            Self::FiveGhz => "36-64, 100-144 or 149-165 (multiples of 4, plus 165)",
            Self::Dual => "1-11 or a 5GHz channel (36-165)",
        }
    }
}

/// Wireless security mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SecurityMode {
    #[serde(rename = "Open")]
    #[strum(serialize = "Open")]
    Open,
    #[serde(rename = "WPA2")]
    #[strum(serialize = "WPA2")]
    Wpa2,
    #[serde(rename = "WPA3")]
    #[strum(serialize = "WPA3")]
    Wpa3,
    #[serde(rename = "WPA2/WPA3")]
    #[strum(serialize = "WPA2/WPA3")]
    Wpa2Wpa3,
}

/// Guest network credentials. Exists only while the guest network is enabled.
#[derive(Debug, Clone)]
pub struct GuestNetwork {
    pub ssid: String,
    pub password: SecretString,
}

/// The router's singleton wireless configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: SecretString,
    pub band: FrequencyBand,
    pub channel: u16,
    pub security_mode: SecurityMode,
    pub guest: Option<GuestNetwork>,
}

impl NetworkConfig {
    pub fn guest_enabled(&self) -> bool {
        self.guest.is_some()
    }

    pub fn password_len(&self) -> usize {
        self.password.expose_secret().chars().count()
    }

    /// Whether the guest network uses a different passphrase than the main one.
    /// `None` while the guest network is disabled.
    pub fn guest_password_distinct(&self) -> Option<bool> {
        self.guest
            .as_ref()
            .map(|g| g.password.expose_secret() != self.password.expose_secret())
    }
}

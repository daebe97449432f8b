// ── Site survey result ──

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;
use super::network::{FrequencyBand, SecurityMode};

/// One access point seen during a scan. Only lives until the next scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedNetwork {
    pub ssid: String,
    pub bssid: MacAddress,
    pub channel: u16,
    /// The radio band this beacon was heard on (never `Dual`).
    pub band: FrequencyBand,
    pub signal_dbm: i32,
    pub security: SecurityMode,
}

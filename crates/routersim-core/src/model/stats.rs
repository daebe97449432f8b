// ── Traffic statistics ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of the most recent speed test plus cumulative packet counters.
///
/// Only the speed-test simulation writes these; there is no setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficStats {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    pub packet_loss_percent: f64,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub last_measured: Option<DateTime<Utc>>,
}

impl Default for TrafficStats {
    fn default() -> Self {
        Self {
            download_mbps: 95.5,
            upload_mbps: 48.2,
            latency_ms: 12,
            jitter_ms: 2,
            packet_loss_percent: 0.1,
            packets_sent: 0,
            packets_received: 0,
            last_measured: None,
        }
    }
}

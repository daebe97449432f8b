// ── Router system information ──

use serde::{Deserialize, Serialize};

/// Firmware and lifecycle counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub firmware_version: String,
    pub update_available: bool,
    /// Newest version seen by the last firmware check, if any.
    pub latest_version: Option<String>,
    pub uptime_secs: u64,
    pub reboot_count: u32,
    pub max_devices: usize,
}

impl SystemInfo {
    /// "5 days, 3 hours" rendering used by status payloads and prompts.
    pub fn uptime_readable(&self) -> String {
        let days = self.uptime_secs / 86_400;
        let hours = (self.uptime_secs % 86_400) / 3_600;
        format!("{days} days, {hours} hours")
    }
}

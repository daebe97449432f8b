// ── Connected device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::Display;

use super::mac::MacAddress;

/// Strongest signal a client can report.
pub const SIGNAL_CEILING_DBM: i32 = -30;
/// Weakest signal before a client drops off.
pub const SIGNAL_FLOOR_DBM: i32 = -90;

/// Rough device classification, as a router's fingerprinting would guess it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum DeviceType {
    Phone,
    Laptop,
    Desktop,
    Tablet,
    Tv,
    Iot,
    Other,
}

/// A station associated with the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedDevice {
    pub mac: MacAddress,
    pub ip: IpAddr,
    pub hostname: String,
    pub device_type: DeviceType,
    pub signal_dbm: i32,
    pub connected_at: DateTime<Utc>,
}

impl ConnectedDevice {
    /// Five-step signal quality, 0 (unusable) to 4 (excellent).
    pub fn signal_bars(&self) -> u8 {
        match self.signal_dbm {
            s if s >= -50 => 4,
            s if s >= -60 => 3,
            s if s >= -70 => 2,
            s if s >= -80 => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(signal_dbm: i32) -> ConnectedDevice {
        ConnectedDevice {
            mac: MacAddress::new("aa:bb:cc:dd:ee:10"),
            ip: IpAddr::from([192, 168, 1, 110]),
            hostname: "Test".into(),
            device_type: DeviceType::Other,
            signal_dbm,
            connected_at: Utc::now(),
        }
    }

    #[test]
    fn signal_bars_thresholds() {
        assert_eq!(device(-38).signal_bars(), 4);
        assert_eq!(device(-55).signal_bars(), 3);
        assert_eq!(device(-65).signal_bars(), 2);
        assert_eq!(device(-79).signal_bars(), 1);
        assert_eq!(device(-90).signal_bars(), 0);
    }
}

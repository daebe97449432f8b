// ── Domain model ──
//
// Canonical types for everything the simulated router knows about.
// None of these reference each other by pointer; cross-entity effects
// are engine side effects.

pub mod device;
pub mod log;
pub mod mac;
pub mod network;
pub mod scan;
pub mod stats;
pub mod system;

pub use device::{ConnectedDevice, DeviceType, SIGNAL_CEILING_DBM, SIGNAL_FLOOR_DBM};
pub use log::{LogEntry, LogSeverity};
pub use mac::MacAddress;
pub use network::{
    FrequencyBand, GuestNetwork, MAX_SSID_LEN, MIN_PASSWORD_LEN, NetworkConfig, SecurityMode,
};
pub use scan::DetectedNetwork;
pub use stats::TrafficStats;
pub use system::SystemInfo;

//! Simulated WiFi router state engine.
//!
//! This crate owns the router's in-memory state and the validated
//! operations that change it. Transports (JSON-RPC, HTTP, CLI) live in
//! other crates and only talk to [`RouterEngine`].
//!
//! - **[`RouterEngine`]**: the facade. Holds one state aggregate behind a
//!   reader-writer lock; every operation validates fully, then mutates,
//!   so a failed call never leaves partial state behind.
//!
//! - **[`Command`]**: typed operation requests, routed through
//!   [`RouterEngine::execute`]. Request payloads deserialize straight from
//!   tool argument objects.
//!
//! - **Simulation** ([`sim`]): scan, speed-test and firmware generators.
//!   All draw from the engine's RNG, which is seedable through
//!   [`SimulationSettings::seed`] or injectable via [`RouterEngine::with_rng`].
//!
//! - **Domain model** ([`model`]) and **read views** ([`view`]): canonical
//!   types plus the snapshots handed to adapters, with passwords masked.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod sim;
mod store;
mod validate;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{DeviceSeed, EngineConfig, RouterSettings, SimulationSettings};
pub use engine::RouterEngine;
pub use error::{CoreError, ErrorKind};

// Model re-exports
pub use model::{
    ConnectedDevice, DetectedNetwork, DeviceType, FrequencyBand, LogEntry, LogSeverity,
    MacAddress, SecurityMode, SystemInfo, TrafficStats,
};

// View re-exports
pub use view::{
    ConfigView, DeviceView, DevicesView, NetworksView, SecurityPosture, StatsView, StatusSnapshot,
};

// ── Resources ──
//
// Read-only `router://` views. Logs are plain text, one entry per line;
// everything else is JSON.

use serde::Serialize;
use serde_json::Value;
use strum::{EnumIter, IntoEnumIterator};

use routersim_core::RouterEngine;

use crate::error::AdapterError;

const SCHEME: &str = "router://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ResourceKind {
    Devices,
    Stats,
    Config,
    Logs,
    Networks,
}

impl ResourceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::Stats => "stats",
            Self::Config => "config",
            Self::Logs => "logs",
            Self::Networks => "networks",
        }
    }

    pub fn uri(self) -> String {
        format!("{SCHEME}{}", self.name())
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Logs => "text/plain",
            _ => "application/json",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Devices => "Connected Devices",
            Self::Stats => "Network Statistics",
            Self::Config => "Router Configuration",
            Self::Logs => "Router Logs",
            Self::Networks => "Available Networks",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Devices => "Devices currently connected to the router",
            Self::Stats => "Throughput, latency and packet counters from the last speed test",
            Self::Config => "Router configuration with passwords masked",
            Self::Logs => "Router activity log, oldest entry first",
            Self::Networks => "WiFi networks seen by the most recent scan",
        }
    }

    /// Accepts `router://devices` or the bare name `devices`.
    pub fn resolve(uri: &str) -> Result<Self, AdapterError> {
        let trimmed = uri.trim();
        let name = trimmed.strip_prefix(SCHEME).unwrap_or(trimmed);
        Self::iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| AdapterError::UnknownResource(uri.to_string()))
    }
}

/// A resource as advertised to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDef {
    pub uri: String,
    pub name: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    pub description: &'static str,
}

pub fn catalog() -> Vec<ResourceDef> {
    ResourceKind::iter()
        .map(|kind| ResourceDef {
            uri: kind.uri(),
            name: kind.title(),
            mime_type: kind.mime_type(),
            description: kind.description(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceBody {
    Json(Value),
    Text(String),
}

/// The content of one resource read.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceContent {
    pub kind: ResourceKind,
    pub body: ResourceBody,
}

impl ResourceContent {
    /// Body as text: JSON pretty-printed, logs verbatim.
    pub fn text(&self) -> String {
        match &self.body {
            ResourceBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResourceBody::Text(text) => text.clone(),
        }
    }

    /// Body as a JSON value; text becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self.body {
            ResourceBody::Json(value) => value,
            ResourceBody::Text(text) => Value::String(text),
        }
    }
}

pub fn read_resource(engine: &RouterEngine, uri: &str) -> Result<ResourceContent, AdapterError> {
    let kind = ResourceKind::resolve(uri)?;
    let body = match kind {
        ResourceKind::Devices => ResourceBody::Json(serde_json::to_value(engine.devices_view())?),
        ResourceKind::Stats => ResourceBody::Json(serde_json::to_value(engine.traffic_stats())?),
        ResourceKind::Config => ResourceBody::Json(serde_json::to_value(engine.config_view())?),
        ResourceKind::Networks => {
            ResourceBody::Json(serde_json::to_value(engine.networks_view())?)
        }
        ResourceKind::Logs => ResourceBody::Text(
            engine
                .logs()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    };
    Ok(ResourceContent { kind, body })
}

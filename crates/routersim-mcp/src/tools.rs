// ── Tool catalog and dispatch ──
//
// Each tool maps 1:1 onto an engine operation. Arguments decode into the
// core request structs; the result is a JSON object carrying a `status`
// of "success", "cancelled" or "error" plus a human-readable message.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use routersim_core::command::{
    ChangeChannelRequest, ChangePasswordRequest, ChangeSsidRequest, DisconnectDeviceRequest,
    EnableGuestNetworkRequest, SetFrequencyBandRequest,
};
use routersim_core::{Command, CommandResult, CoreError, RouterEngine};

use crate::error::AdapterError;

/// A tool as advertised to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

/// All tools, in the order they are listed.
pub fn catalog() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "scan_networks",
            description: "Scan for available WiFi networks in range",
            input_schema: no_arguments(),
        },
        ToolDef {
            name: "get_router_status",
            description: "Get current router status including connection info and system health",
            input_schema: no_arguments(),
        },
        ToolDef {
            name: "reboot_router",
            description: "Reboot the WiFi router",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "confirm": { "type": "boolean", "description": "Must be true to reboot" }
                },
                "required": ["confirm"]
            }),
        },
        ToolDef {
            name: "change_wifi_password",
            description: "Change the WiFi network password",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "new_password": {
                        "type": "string",
                        "minLength": 8,
                        "description": "New WiFi password (at least 8 characters)"
                    }
                },
                "required": ["new_password"]
            }),
        },
        ToolDef {
            name: "change_ssid",
            description: "Change the WiFi network name (SSID)",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "new_ssid": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": 32,
                        "description": "New WiFi network name"
                    }
                },
                "required": ["new_ssid"]
            }),
        },
        ToolDef {
            name: "enable_guest_network",
            description: "Enable or disable the guest WiFi network",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "enabled": {
                        "type": "boolean",
                        "description": "true to enable, false to disable"
                    },
                    "guest_ssid": {
                        "type": "string",
                        "description": "Guest network SSID (required when enabling)"
                    },
                    "guest_password": {
                        "type": "string",
                        "description": "Guest network password, 8+ characters (required when enabling)"
                    }
                },
                "required": ["enabled"]
            }),
        },
        ToolDef {
            name: "disconnect_device",
            description: "Disconnect a specific device from the network",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mac_address": {
                        "type": "string",
                        "description": "MAC address of the device, e.g. AA:BB:CC:DD:EE:01"
                    }
                },
                "required": ["mac_address"]
            }),
        },
        ToolDef {
            name: "change_channel",
            description: "Change the WiFi channel",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channel": {
                        "type": "integer",
                        "description": "Channel number (1-11 for 2.4GHz, 36-165 for 5GHz)"
                    }
                },
                "required": ["channel"]
            }),
        },
        ToolDef {
            name: "set_frequency_band",
            description: "Set the WiFi frequency band",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "band": {
                        "type": "string",
                        "enum": ["2.4GHz", "5GHz", "dual"],
                        "description": "Frequency band to use"
                    }
                },
                "required": ["band"]
            }),
        },
        ToolDef {
            name: "check_firmware_update",
            description: "Check for available firmware updates",
            input_schema: no_arguments(),
        },
        ToolDef {
            name: "run_speed_test",
            description: "Run an internet speed test",
            input_schema: no_arguments(),
        },
    ]
}

#[derive(Debug, Default, Deserialize)]
struct RebootArgs {
    #[serde(default)]
    confirm: bool,
}

/// Decode an argument object into a request, reporting shape problems as
/// validation failures the caller can correct.
fn decode<T: DeserializeOwned>(args: Value) -> Result<T, CoreError> {
    serde_json::from_value(args).map_err(|e| CoreError::validation("arguments", e.to_string()))
}

/// Map a tool call onto a command. `Ok(None)` means the call was
/// declined before reaching the engine.
fn command_for(
    name: &str,
    args: Value,
) -> Result<Result<Option<Command>, CoreError>, AdapterError> {
    let cmd = match name {
        "scan_networks" => Ok(Some(Command::ScanNetworks)),
        "get_router_status" => Ok(Some(Command::GetStatus)),
        "reboot_router" => decode::<RebootArgs>(args)
            .map(|a| a.confirm.then_some(Command::Reboot)),
        "change_wifi_password" => {
            decode::<ChangePasswordRequest>(args).map(|r| Some(Command::ChangeWifiPassword(r)))
        }
        "change_ssid" => decode::<ChangeSsidRequest>(args).map(|r| Some(Command::ChangeSsid(r))),
        "enable_guest_network" => decode::<EnableGuestNetworkRequest>(args)
            .map(|r| Some(Command::EnableGuestNetwork(r))),
        "disconnect_device" => decode::<DisconnectDeviceRequest>(args)
            .map(|r| Some(Command::DisconnectDevice(r))),
        "change_channel" => {
            decode::<ChangeChannelRequest>(args).map(|r| Some(Command::ChangeChannel(r)))
        }
        "set_frequency_band" => decode::<SetFrequencyBandRequest>(args)
            .map(|r| Some(Command::SetFrequencyBand(r))),
        "check_firmware_update" => Ok(Some(Command::CheckFirmwareUpdate)),
        "run_speed_test" => Ok(Some(Command::RunSpeedTest)),
        other => return Err(AdapterError::UnknownTool(other.to_string())),
    };
    Ok(cmd)
}

/// Invoke a tool. Unknown names and non-object arguments are adapter
/// errors; everything the engine rejects comes back as an `"error"`
/// payload.
pub fn call_tool(
    engine: &RouterEngine,
    name: &str,
    arguments: Value,
) -> Result<Value, AdapterError> {
    let args = match arguments {
        Value::Null => Value::Object(Map::new()),
        Value::Object(_) => arguments,
        other => {
            return Err(AdapterError::InvalidArguments(format!(
                "expected an object, got {other}"
            )));
        }
    };
    debug!(tool = name, "calling tool");

    let outcome = match command_for(name, args)? {
        Ok(Some(cmd)) => engine.execute(cmd),
        Ok(None) => {
            return Ok(json!({
                "status": "cancelled",
                "message": "Reboot cancelled. Set confirm=true to proceed.",
            }));
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => render_success(&result),
        Err(e) => Ok(render_error(&e)),
    }
}

fn render_success(result: &CommandResult) -> Result<Value, AdapterError> {
    let mut body = match result {
        // Status already carries its own `status: "online"`.
        CommandResult::Status(status) => return Ok(serde_json::to_value(status)?),
        CommandResult::Networks(found) => json!({
            "networks_found": found.len(),
            "networks": found,
            "timestamp": Utc::now(),
        }),
        CommandResult::DeviceDisconnected(device) => json!({ "device": device }),
        other => serde_json::to_value(other)?,
    };
    if let Value::Object(map) = &mut body {
        map.insert("status".into(), json!("success"));
        map.insert("message".into(), json!(result.message()));
        if let CommandResult::GuestNetwork(change) = result {
            if change.enabled {
                map.insert(
                    "note".into(),
                    json!("The guest password is set but never displayed."),
                );
            }
        }
    }
    Ok(body)
}

/// Structured failure payload for an engine rejection.
pub fn render_error(err: &CoreError) -> Value {
    let mut body = json!({
        "status": "error",
        "kind": err.kind(),
        "message": err.to_string(),
    });
    if let (CoreError::Validation { field, .. }, Value::Object(map)) = (err, &mut body) {
        map.insert("field".into(), json!(field));
    }
    body
}

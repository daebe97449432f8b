// ── Prompt templates ──
//
// Guides rendered from the engine's read views. Rendering never mutates
// router state.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString};
use tracing::debug;

use routersim_core::{RouterEngine, SecurityMode, SecurityPosture, StatusSnapshot};

use crate::error::AdapterError;

// ── Catalog ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDef {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

pub fn catalog() -> Vec<PromptDef> {
    vec![
        PromptDef {
            name: "troubleshoot_connection",
            description: "Get help troubleshooting WiFi connection issues",
            arguments: vec![PromptArgument {
                name: "issue_type",
                description: "slow_speed, no_connection, intermittent, or device_cant_connect (default no_connection)",
                required: false,
            }],
        },
        PromptDef {
            name: "setup_guest_network",
            description: "Guide for setting up a guest WiFi network",
            arguments: Vec::new(),
        },
        PromptDef {
            name: "optimize_performance",
            description: "Recommendations for optimizing router performance",
            arguments: Vec::new(),
        },
        PromptDef {
            name: "security_audit",
            description: "Score the router's security settings and list recommendations",
            arguments: Vec::new(),
        },
        PromptDef {
            name: "parental_controls",
            description: "Guide for restricting devices and managing access for children",
            arguments: Vec::new(),
        },
    ]
}

// ── Rendered prompt ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptResult {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

impl PromptResult {
    fn user(description: impl Into<String>, text: String) -> Self {
        Self {
            description: description.into(),
            messages: vec![PromptMessage {
                role: "user",
                content: TextContent { kind: "text", text },
            }],
        }
    }

    /// Text of the first message.
    pub fn text(&self) -> &str {
        self.messages
            .first()
            .map_or("", |m| m.content.text.as_str())
    }
}

pub fn get_prompt(
    engine: &RouterEngine,
    name: &str,
    arguments: &HashMap<String, String>,
) -> Result<PromptResult, AdapterError> {
    debug!(prompt = name, "rendering prompt");
    let status = engine.get_status();
    match name {
        "troubleshoot_connection" => {
            let issue = match arguments.get("issue_type") {
                None => IssueType::default(),
                Some(raw) => IssueType::from_str(raw.trim()).unwrap_or_else(|_| {
                    debug!(issue_type = %raw, "unrecognized issue_type, using no_connection");
                    IssueType::default()
                }),
            };
            Ok(PromptResult::user(
                format!("Troubleshooting guide for {}", issue.to_string().replace('_', " ")),
                troubleshoot(issue, &status),
            ))
        }
        "setup_guest_network" => {
            let guest_ssid = engine.config_view().guest_ssid;
            Ok(PromptResult::user(
                "Guide for setting up guest network",
                guest_guide(&status, guest_ssid.as_deref()),
            ))
        }
        "optimize_performance" => Ok(PromptResult::user(
            "Router performance optimization guide",
            optimize(&status),
        )),
        "security_audit" => {
            let posture = engine.security_posture();
            let audit = SecurityAudit::assess(&posture);
            Ok(PromptResult::user(
                "Security audit report with recommendations",
                audit.report(&posture),
            ))
        }
        "parental_controls" => Ok(PromptResult::user(
            "Guide for setting up parental controls",
            parental(&status),
        )),
        other => Err(AdapterError::UnknownPrompt(other.to_string())),
    }
}

// ── Troubleshooting ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IssueType {
    SlowSpeed,
    #[default]
    NoConnection,
    Intermittent,
    DeviceCantConnect,
}

fn troubleshoot(issue: IssueType, s: &StatusSnapshot) -> String {
    match issue {
        IssueType::SlowSpeed => format!(
            "## Troubleshooting Slow WiFi Speed

Current router status:
- SSID: {ssid}
- Band: {band}
- Channel: {channel}
- Connected devices: {devices}

### Recommended Actions:
1. Check how many devices share the network (currently {devices})
2. Move to the 5GHz band if clients support it
3. Look for a quieter channel with `scan_networks`
4. Measure real throughput with `run_speed_test`
5. Disconnect devices that should not be online

### Tools:
- `run_speed_test` to measure current speed
- `scan_networks` to find less crowded channels
- `set_frequency_band` to switch to 5GHz or dual
- `change_channel` to move off a congested channel
",
            ssid = s.ssid,
            band = s.frequency_band,
            channel = s.channel,
            devices = s.connected_devices,
        ),
        IssueType::NoConnection => format!(
            "## Troubleshooting No Connection

Current router status:
- Router is: {power}
- SSID: {ssid}
- Security: {security}

### Recommended Actions:
1. Confirm the router is on and reporting status
2. Check the network is visible with `scan_networks`
3. Make sure the client uses the current password
4. Reboot the router if nothing else helps

### Tools:
- `get_router_status` to check router health
- `scan_networks` to confirm '{ssid}' is broadcasting
- `reboot_router` with confirm=true as a last resort
",
            power = if s.is_on { "ON" } else { "OFF" },
            ssid = s.ssid,
            security = s.security_mode,
        ),
        IssueType::Intermittent => format!(
            "## Troubleshooting Intermittent Connection

Current router status:
- Band: {band}
- Channel: {channel}
- Uptime: {uptime}
- Firmware: {firmware}

### Recommended Actions:
1. Check for interference from neighboring networks
2. Make sure the firmware is current
3. Look through the router logs for repeated errors
4. Try another channel or band
5. Reboot if the router has been up a long time ({uptime})

### Tools:
- `scan_networks` to look for interference
- `check_firmware_update` to check for newer firmware
- Read `router://logs` for recent events
- `change_channel` if the channel is crowded
- `reboot_router` if uptime is very high
",
            band = s.frequency_band,
            channel = s.channel,
            uptime = s.uptime,
            firmware = s.firmware_version,
        ),
        IssueType::DeviceCantConnect => format!(
            "## Troubleshooting Device Connection Issues

Current router status:
- Connected devices: {devices}/{max}
- Security mode: {security}
- Guest network: {guest}

### Recommended Actions:
1. Check whether the device limit is reached ({devices}/{max})
2. Older devices may not support {security}
3. Forget the network on the device and join again
4. Try the guest network to isolate the problem

### Tools:
- `get_router_status` to check the device count
- Read `router://devices` to see who is connected
- `enable_guest_network` to create a test network
",
            devices = s.connected_devices,
            max = s.max_devices,
            security = s.security_mode,
            guest = s.guest_network,
        ),
    }
}

// ── Guides ──────────────────────────────────────────────────────────

fn guest_guide(s: &StatusSnapshot, guest_ssid: Option<&str>) -> String {
    let suggested = format!("{}_Guest", s.ssid);
    format!(
        "## Setting Up a Guest WiFi Network

A guest network gives visitors internet access without reaching your own devices.

### Current Status:
- Main SSID: {ssid}
- Guest network: {guest}
- Guest SSID: {guest_ssid}

### Steps:
1. Pick a guest network name, for example \"{suggested}\"
2. Choose a password of at least 8 characters that you are happy to share
3. Call `enable_guest_network` with enabled=true, guest_ssid and guest_password

### Example:
```
enable_guest_network(enabled=true, guest_ssid=\"{suggested}\", guest_password=\"your_guest_password\")
```

### Good Practice:
- Never reuse the main network password
- Rotate the guest password from time to time
- Turn the guest network off when it is not needed

### To Disable:
`enable_guest_network(enabled=false)`
",
        ssid = s.ssid,
        guest = s.guest_network,
        guest_ssid = guest_ssid.unwrap_or("Not set"),
    )
}

fn optimize(s: &StatusSnapshot) -> String {
    format!(
        "## Router Performance Optimization Guide

### Current Configuration:
- Frequency band: {band}
- Channel: {channel}
- Connected devices: {devices}
- Security mode: {security}
- Uptime: {uptime}

### 1. Pick the Right Band
- 2.4GHz: longer range, more interference, lower speed
- 5GHz: shorter range, less interference, higher speed
- dual: both radios at once

Use `set_frequency_band(band=\"5GHz\")` or `set_frequency_band(band=\"dual\")`.

### 2. Pick a Clean Channel
- Run `scan_networks()` and look for the least crowded channel
- On 2.4GHz stick to 1, 6 or 11
- Move with `change_channel(channel=X)`

### 3. Manage Devices
- {devices} devices are connected; each one shares airtime
- Remove unused ones with `disconnect_device(mac_address=\"XX:XX:XX:XX:XX:XX\")`

### 4. Maintenance
- `check_firmware_update()` for newer firmware
- Reboot if uptime is high
- Read `router://logs` for warnings

### 5. Measure
- `run_speed_test()` before and after each change
- Read `router://stats` for the latest numbers
",
        band = s.frequency_band,
        channel = s.channel,
        devices = s.connected_devices,
        security = s.security_mode,
        uptime = s.uptime,
    )
}

fn parental(s: &StatusSnapshot) -> String {
    format!(
        "## Parental Controls Guide

Restrict when and how specific devices reach the internet.

### Current Status:
- Connected devices: {devices}
- Guest network: {guest}

### Steps:
1. Find the device to restrict in `router://devices`
2. Disconnect it when needed with `disconnect_device`
3. Give children their own guest network with a separate password
4. Schedules are manual in this simulation

### Examples:
- Read `router://devices`
- `disconnect_device(mac_address=\"XX:XX:XX:XX:XX:XX\")`
- `enable_guest_network(enabled=true, guest_ssid=\"Kids_WiFi\", guest_password=\"kids_password\")`

### Good Practice:
- Agree on the rules up front
- Review `router://logs` regularly
- Change passwords periodically
",
        devices = s.connected_devices,
        guest = s.guest_network,
    )
}

// ── Security audit ──────────────────────────────────────────────────

/// Score out of 100 plus ordered recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityAudit {
    pub score: u32,
    pub recommendations: Vec<String>,
}

impl SecurityAudit {
    pub fn assess(p: &SecurityPosture) -> Self {
        let mut score = 0;
        let mut recs = Vec::new();

        match p.security_mode {
            SecurityMode::Wpa3 => score += 30,
            SecurityMode::Wpa2 | SecurityMode::Wpa2Wpa3 => {
                score += 20;
                recs.push("Consider upgrading to WPA3 for better security".to_string());
            }
            SecurityMode::Open => {
                score += 5;
                recs.push("CRITICAL: The network is open. Enable WPA3 immediately".to_string());
            }
        }

        match p.password_length {
            n if n >= 16 => score += 25,
            n if n >= 12 => score += 20,
            n if n >= 8 => {
                score += 10;
                recs.push("Use a longer password (16+ characters recommended)".to_string());
            }
            _ => recs.push("CRITICAL: Password is too short".to_string()),
        }

        let ssid = p.ssid.to_lowercase();
        if ssid.contains("default") || ssid.contains("admin") {
            recs.push("Change the default-looking SSID to something unique".to_string());
        } else {
            score += 15;
        }

        match p.guest_password_distinct {
            Some(true) => score += 30,
            Some(false) => {
                score += 15;
                recs.push("Use a different password for the guest network".to_string());
            }
            None => {
                recs.push("Consider enabling a guest network for visitors".to_string());
            }
        }

        if p.update_available {
            recs.push("A firmware update is available. Install it soon".to_string());
        }
        recs.push("Keep firmware updated; check regularly with `check_firmware_update()`".to_string());

        Self {
            score,
            recommendations: recs,
        }
    }

    fn report(&self, p: &SecurityPosture) -> String {
        let mut text = format!(
            "## Security Audit Report

### Overall Security Score: {score}/100

### Current Settings:
- Security mode: {mode}
- Password length: {len} characters
- SSID: {ssid}
- Guest network: {guest}
- Firmware version: {firmware}

### Recommendations:
",
            score = self.score,
            mode = p.security_mode,
            len = p.password_length,
            ssid = p.ssid,
            guest = if p.guest_network_enabled {
                "enabled"
            } else {
                "disabled"
            },
            firmware = p.firmware_version,
        );
        for (i, rec) in self.recommendations.iter().enumerate() {
            let _ = writeln!(text, "{}. {rec}", i + 1);
        }
        text.push_str(
            "
### Tools:
- `change_wifi_password(new_password=\"...\")`
- `enable_guest_network(enabled=true, guest_ssid=\"Guest\", guest_password=\"...\")`
- `check_firmware_update()`
- Read `router://devices` to spot unknown devices
- Read `router://logs` for suspicious activity
",
        );
        text
    }
}

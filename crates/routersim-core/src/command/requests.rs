// ── Typed request structs for Command payloads ──
//
// Field names match the tool argument names, so adapters can decode a
// JSON argument object straight into these.

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

// Hand-written so the passphrase never reaches a log line through `{:?}`.
impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSsidRequest {
    pub new_ssid: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EnableGuestNetworkRequest {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_password: Option<String>,
}

impl std::fmt::Debug for EnableGuestNetworkRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnableGuestNetworkRequest")
            .field("enabled", &self.enabled)
            .field("guest_ssid", &self.guest_ssid)
            .field(
                "guest_password",
                &self.guest_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisconnectDeviceRequest {
    pub mac_address: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeChannelRequest {
    pub channel: u16,
}

/// Band stays a string here: an unrecognized value is a validation
/// failure reported by the engine, not a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFrequencyBandRequest {
    pub band: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guest_request_optional_fields_default_to_none() {
        let req: EnableGuestNetworkRequest =
            serde_json::from_value(serde_json::json!({ "enabled": false })).unwrap();
        assert!(!req.enabled);
        assert!(req.guest_ssid.is_none() && req.guest_password.is_none());
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let req = ChangePasswordRequest {
            new_password: "hunter2hunter2".into(),
        };
        assert!(!format!("{req:?}").contains("hunter2"));

        let guest = EnableGuestNetworkRequest {
            enabled: true,
            guest_ssid: Some("Guests".into()),
            guest_password: Some("visitor-pass".into()),
        };
        let rendered = format!("{guest:?}");
        assert!(rendered.contains("Guests"));
        assert!(!rendered.contains("visitor-pass"));
    }
}

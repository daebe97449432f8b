//! Status command handler.

use tabled::Tabled;

use routersim_core::{DeviceView, StatusSnapshot};

use super::Session;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{self, paint_status};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Connected")]
    connected_for: String,
}

impl From<&DeviceView> for DeviceRow {
    fn from(d: &DeviceView) -> Self {
        Self {
            hostname: d.hostname.clone(),
            mac: d.mac.to_string(),
            ip: d.ip.to_string(),
            device_type: d.device_type.to_string(),
            signal: format!("{} dBm ({}/4)", d.signal_dbm, d.signal_bars),
            connected_for: d.connected_for.clone(),
        }
    }
}

fn detail(s: &StatusSnapshot, color: bool) -> String {
    let update = if s.update_available {
        " (update available)"
    } else {
        ""
    };
    [
        format!("Status:    {}", paint_status(&s.status, color)),
        format!("SSID:      {}", s.ssid),
        format!("Band:      {} (channel {})", s.frequency_band, s.channel),
        format!("Security:  {}", s.security_mode),
        format!("Guest:     {}", s.guest_network),
        format!("Devices:   {}/{}", s.connected_devices, s.max_devices),
        format!("Firmware:  {}{update}", s.firmware_version),
        format!("Uptime:    {}", s.uptime),
        format!("Reboots:   {}", s.reboot_count),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session) -> Result<(), CliError> {
    let engine = session.service.engine();
    let status = engine.get_status();
    let mut out = output::render_single(
        session.format,
        &status,
        |s| detail(s, session.color),
        |s| s.status.clone(),
    )?;

    if session.format == OutputFormat::Table {
        let devices = engine.devices_view().connected_devices;
        if !devices.is_empty() {
            let table = output::render_list(
                session.format,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.mac.to_string(),
            )?;
            out.push_str("\n\n");
            out.push_str(&table);
        }
    }

    session.print(&out);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use routersim_core::{EngineConfig, RouterEngine};

    #[test]
    fn detail_shows_factory_router() {
        let engine = RouterEngine::new(EngineConfig::seeded(1)).unwrap();
        let text = detail(&engine.get_status(), false);
        assert!(text.contains("SSID:      HomeNetwork"));
        assert!(text.contains("channel 6"));
        assert!(text.contains("Devices:   3/32"));
        assert!(text.contains("Guest:     disabled"));
    }
}

#![allow(clippy::unwrap_used)]

// Integration tests for RouterEngine operations, exercised through the
// public API only.

use pretty_assertions::assert_eq;
use routersim_core::command::{ChangeSsidRequest, DisconnectDeviceRequest};
use routersim_core::{
    Command, CommandResult, CoreError, EngineConfig, ErrorKind, FrequencyBand, RouterEngine,
    SimulationSettings,
};

fn engine() -> RouterEngine {
    RouterEngine::new(EngineConfig::seeded(42)).unwrap()
}

fn kind<T>(result: Result<T, CoreError>) -> ErrorKind {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(e) => e.kind(),
    }
}

fn log_messages(engine: &RouterEngine) -> Vec<String> {
    engine.logs().into_iter().map(|e| e.message).collect()
}

// ── Initial state ───────────────────────────────────────────────────

#[test]
fn default_engine_matches_factory_state() {
    let engine = engine();
    let status = engine.get_status();
    assert_eq!(status.ssid, "HomeNetwork");
    assert_eq!(status.frequency_band, FrequencyBand::TwoPointFourGhz);
    assert_eq!(status.channel, 6);
    assert_eq!(status.connected_devices, 3);
    assert_eq!(status.firmware_version, "v2.1.4");
    assert_eq!(status.uptime, "5 days, 0 hours");
    assert_eq!(status.guest_network, "disabled");
    assert_eq!(engine.logs().len(), 5);
    assert!(engine.password_matches("secure_password_123"));
}

#[test]
fn engines_do_not_share_state() {
    let a = engine();
    let b = engine();
    a.change_ssid("Isolated").unwrap();
    assert_eq!(b.get_status().ssid, "HomeNetwork");
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = EngineConfig::seeded(1);
    config.router.ssid = String::new();
    assert_eq!(kind(RouterEngine::new(config)), ErrorKind::Validation);

    let config = EngineConfig {
        simulation: SimulationSettings {
            firmware_update_probability: 2.0,
            ..SimulationSettings::default()
        },
        ..EngineConfig::default()
    };
    assert_eq!(kind(RouterEngine::new(config)), ErrorKind::Validation);
}

// ── Password ────────────────────────────────────────────────────────

#[test]
fn valid_password_is_applied() {
    let engine = engine();
    for password in ["12345678", "a much longer passphrase", "ünïcödé!"] {
        let change = engine.change_wifi_password(password).unwrap();
        assert_eq!(change.new_password_length, password.chars().count());
        assert!(engine.password_matches(password));
        assert_eq!(
            engine.config_view().password_length,
            password.chars().count()
        );
    }
}

#[test]
fn short_password_fails_and_leaves_state_unchanged() {
    let engine = engine();
    let logs_before = engine.logs();
    assert_eq!(
        kind(engine.change_wifi_password("short")),
        ErrorKind::Validation
    );
    assert!(engine.password_matches("secure_password_123"));
    assert_eq!(engine.logs(), logs_before);
}

#[test]
fn same_password_twice_succeeds() {
    let engine = engine();
    engine.change_wifi_password("repeatable-pass").unwrap();
    engine.change_wifi_password("repeatable-pass").unwrap();
    assert!(engine.password_matches("repeatable-pass"));
}

#[test]
fn password_never_reaches_logs_or_views() {
    let engine = engine();
    let secret = "super-secret-passphrase";
    engine.change_wifi_password(secret).unwrap();
    engine
        .enable_guest_network(true, Some("Guests"), Some("guest-secret-pass"))
        .unwrap();

    assert_eq!(
        engine.logs().last().unwrap().message,
        "Guest network enabled: Guests"
    );
    assert!(log_messages(&engine).contains(&"WiFi password changed".to_string()));
    let rendered = format!(
        "{:?}{}{}",
        engine.logs(),
        serde_json::to_string(&engine.config_view()).unwrap(),
        serde_json::to_string(&engine.security_posture()).unwrap()
    );
    assert!(!rendered.contains(secret));
    assert!(!rendered.contains("guest-secret-pass"));
    assert_eq!(engine.config_view().password, "********");
    assert_eq!(engine.config_view().guest_password.as_deref(), Some("********"));
}

// ── SSID ────────────────────────────────────────────────────────────

#[test]
fn change_ssid_logs_old_and_new_values() {
    let engine = engine();
    let change = engine.change_ssid("MyHome").unwrap();
    assert_eq!(change.old_ssid, "HomeNetwork");
    assert_eq!(change.new_ssid, "MyHome");

    let last = engine.logs().pop().unwrap();
    assert!(last.message.contains("HomeNetwork"));
    assert!(last.message.contains("MyHome"));
    assert_eq!(engine.get_status().ssid, "MyHome");
}

#[test]
fn ssid_length_limits() {
    let engine = engine();
    assert_eq!(kind(engine.change_ssid("")), ErrorKind::Validation);
    assert_eq!(kind(engine.change_ssid(&"n".repeat(33))), ErrorKind::Validation);
    engine.change_ssid(&"n".repeat(32)).unwrap();
}

// ── Guest network ───────────────────────────────────────────────────

#[test]
fn guest_network_enable_and_disable() {
    let engine = engine();
    let change = engine
        .enable_guest_network(true, Some("Visitors"), Some("visitor-pass"))
        .unwrap();
    assert!(change.enabled && change.guest_password_set);
    let config = engine.config_view();
    assert!(config.guest_network_enabled);
    assert_eq!(config.guest_ssid.as_deref(), Some("Visitors"));
    assert_eq!(engine.get_status().guest_network, "enabled");

    engine.enable_guest_network(false, None, None).unwrap();
    let config = engine.config_view();
    assert!(!config.guest_network_enabled);
    assert_eq!(config.guest_ssid, None);
    assert_eq!(config.guest_password, None);
    assert_eq!(engine.logs().last().unwrap().message, "Guest network disabled");
}

#[test]
fn guest_network_requires_credentials() {
    let engine = engine();
    assert_eq!(
        kind(engine.enable_guest_network(true, None, Some("visitor-pass"))),
        ErrorKind::Validation
    );
    assert_eq!(
        kind(engine.enable_guest_network(true, Some("Visitors"), None)),
        ErrorKind::Validation
    );
    assert_eq!(
        kind(engine.enable_guest_network(true, Some("Visitors"), Some("1234"))),
        ErrorKind::Validation
    );
    assert!(!engine.config_view().guest_network_enabled);
}

#[test]
fn security_posture_tracks_guest_password_reuse() {
    let engine = engine();
    assert_eq!(engine.security_posture().guest_password_distinct, None);
    engine
        .enable_guest_network(true, Some("Visitors"), Some("secure_password_123"))
        .unwrap();
    assert_eq!(engine.security_posture().guest_password_distinct, Some(false));
    engine
        .enable_guest_network(true, Some("Visitors"), Some("different-pass"))
        .unwrap();
    assert_eq!(engine.security_posture().guest_password_distinct, Some(true));
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn unknown_mac_is_not_found() {
    let engine = engine();
    assert_eq!(
        kind(engine.disconnect_device("00:11:22:33:44:55")),
        ErrorKind::NotFound
    );
    assert_eq!(kind(engine.disconnect_device("garbage")), ErrorKind::NotFound);
    assert_eq!(engine.devices_view().total_devices, 3);
}

#[test]
fn second_disconnect_is_not_found() {
    let engine = engine();
    let device = engine.disconnect_device("AA:BB:CC:DD:EE:03").unwrap();
    assert_eq!(device.hostname, "Smart TV");
    assert_eq!(
        engine.logs().last().unwrap().message,
        "Device disconnected: Smart TV (aa:bb:cc:dd:ee:03)"
    );
    assert_eq!(
        kind(engine.disconnect_device("aa-bb-cc-dd-ee-03")),
        ErrorKind::NotFound
    );

    let view = engine.devices_view();
    assert_eq!(view.total_devices, 2);
    assert_eq!(view.max_devices, 32);
    assert!(engine.device("aa:bb:cc:dd:ee:03").is_none());
    assert_eq!(engine.get_status().connected_devices, 2);
}

// ── Reboot ──────────────────────────────────────────────────────────

#[test]
fn reboot_increments_count_and_zeroes_uptime() {
    let engine = engine();
    for expected in 1..=3 {
        let report = engine.reboot();
        assert_eq!(report.reboot_count, expected);
        assert_eq!(report.estimated_downtime_secs, 120);
        let info = engine.system_info();
        assert_eq!(info.reboot_count, expected);
        assert_eq!(info.uptime_secs, 0);
    }
    assert_eq!(engine.logs().last().unwrap().message, "Router rebooted");
}

// ── Channel and band ────────────────────────────────────────────────

#[test]
fn change_channel_validates_against_band() {
    let engine = engine();
    assert_eq!(kind(engine.change_channel(36)), ErrorKind::Validation);
    assert_eq!(kind(engine.change_channel(0)), ErrorKind::Validation);
    assert_eq!(engine.get_status().channel, 6);

    let change = engine.change_channel(11).unwrap();
    assert_eq!((change.old_channel, change.new_channel), (6, 11));
    assert_eq!(
        engine.logs().last().unwrap().message,
        "Channel changed from 6 to 11"
    );
}

#[test]
fn switching_to_2_4ghz_resets_5ghz_channel() {
    let engine = engine();
    engine.set_frequency_band("5GHz").unwrap();
    engine.change_channel(149).unwrap();

    let change = engine.set_frequency_band("2.4GHz").unwrap();
    let reset = change.channel_reset.unwrap();
    assert_eq!((reset.old_channel, reset.new_channel), (149, 6));
    let status = engine.get_status();
    assert_eq!(status.frequency_band, FrequencyBand::TwoPointFourGhz);
    assert_eq!(status.channel, 6);
    assert!(status.frequency_band.supports_channel(status.channel));
}

#[test]
fn band_switch_keeps_a_still_legal_channel() {
    let engine = engine();
    let change = engine.set_frequency_band("dual").unwrap();
    assert!(change.channel_reset.is_none());
    assert_eq!(engine.get_status().channel, 6);

    let change = engine.set_frequency_band("5ghz").unwrap();
    assert_eq!(change.channel_reset.unwrap().new_channel, 36);
}

#[test]
fn unknown_band_is_rejected() {
    let engine = engine();
    assert_eq!(kind(engine.set_frequency_band("6GHz")), ErrorKind::Validation);
    assert_eq!(
        engine.get_status().frequency_band,
        FrequencyBand::TwoPointFourGhz
    );
}

// ── Simulations ─────────────────────────────────────────────────────

#[test]
fn scan_is_bounded_sorted_and_does_not_log() {
    let engine = engine();
    let logs_before = engine.logs().len();
    let found = engine.scan_networks();
    assert!(!found.is_empty() && found.len() <= 8);
    assert!(found.windows(2).all(|w| w[0].signal_dbm >= w[1].signal_dbm));
    assert!(found.iter().any(|n| n.ssid == "HomeNetwork"));
    assert_eq!(engine.logs().len(), logs_before);
    assert_eq!(engine.networks_view().available_networks, found);
}

#[test]
fn seeded_engines_produce_identical_scans() {
    let a = RouterEngine::new(EngineConfig::seeded(7)).unwrap();
    let b = RouterEngine::new(EngineConfig::seeded(7)).unwrap();
    assert_eq!(a.scan_networks(), b.scan_networks());
    let (x, y) = (a.run_speed_test(), b.run_speed_test());
    assert_eq!(x.download_mbps.to_bits(), y.download_mbps.to_bits());
    assert_eq!(x.latency_ms, y.latency_ms);
}

#[test]
fn five_ghz_outperforms_2_4ghz() {
    let mean_download = |band: &str, channel: u16| {
        let engine = engine();
        engine.set_frequency_band(band).unwrap();
        engine.change_channel(channel).unwrap();
        let total: f64 = (0..50).map(|_| engine.run_speed_test().download_mbps).sum();
        total / 50.0
    };
    let slow = mean_download("2.4GHz", 6);
    let fast = mean_download("5GHz", 36);
    assert!(fast >= slow, "5GHz {fast} < 2.4GHz {slow}");
}

#[test]
fn speed_test_updates_stats_and_logs_summary() {
    let engine = engine();
    assert!(engine.traffic_stats().traffic.last_measured.is_none());
    let result = engine.run_speed_test();
    let stats = engine.traffic_stats();
    assert!((stats.traffic.download_mbps - result.download_mbps).abs() < f64::EPSILON);
    assert!(stats.traffic.last_measured.is_some());
    assert_eq!(stats.connected_devices, 3);
    assert!(
        engine
            .logs()
            .last()
            .unwrap()
            .message
            .starts_with("Speed test completed:")
    );
}

#[test]
fn firmware_check_records_result_without_installing() {
    let mut config = EngineConfig::seeded(3);
    config.simulation.firmware_update_probability = 1.0;
    let engine = RouterEngine::new(config).unwrap();

    let check = engine.check_firmware_update();
    assert!(check.update_available);
    assert_eq!(check.current_version, "v2.1.4");
    assert_eq!(check.latest_version, "v2.1.5");

    let info = engine.system_info();
    assert!(info.update_available);
    assert_eq!(info.firmware_version, "v2.1.4");
    assert_eq!(info.latest_version.as_deref(), Some("v2.1.5"));
}

#[test]
fn firmware_check_up_to_date() {
    let mut config = EngineConfig::seeded(3);
    config.simulation.firmware_update_probability = 0.0;
    let engine = RouterEngine::new(config).unwrap();
    assert!(!engine.check_firmware_update().update_available);
    assert_eq!(
        engine.logs().last().unwrap().message,
        "Firmware update check: Up to date"
    );
}

// ── Logs ────────────────────────────────────────────────────────────

#[test]
fn log_retention_is_bounded() {
    let mut config = EngineConfig::seeded(5);
    config.simulation.log_retention = 10;
    let engine = RouterEngine::new(config).unwrap();
    for _ in 0..25 {
        engine.reboot();
    }
    let logs = engine.logs();
    assert_eq!(logs.len(), 10);
    assert!(logs.windows(2).all(|w| w[0].seq < w[1].seq));
    assert_eq!(logs.last().unwrap().seq, 30);
}

// ── Command routing ─────────────────────────────────────────────────

#[test]
fn execute_routes_commands() {
    let engine = engine();
    let result = engine
        .execute(Command::ChangeSsid(ChangeSsidRequest {
            new_ssid: "Routed".into(),
        }))
        .unwrap();
    assert!(matches!(result, CommandResult::SsidChanged(_)));
    assert_eq!(
        result.message(),
        "SSID changed from 'HomeNetwork' to 'Routed'. All devices will need to reconnect."
    );

    let err = engine
        .execute(Command::DisconnectDevice(DisconnectDeviceRequest {
            mac_address: "de:ad:be:ef:00:00".into(),
        }))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let CommandResult::Status(status) = engine.execute(Command::GetStatus).unwrap() else {
        panic!("expected status");
    };
    assert_eq!(status.ssid, "Routed");
}

#[test]
fn shared_engine_serializes_concurrent_writers() {
    let engine = std::sync::Arc::new(engine());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                for _ in 0..10 {
                    engine.reboot();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(engine.system_info().reboot_count, 80);
}

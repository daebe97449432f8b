// ── Site survey ──

use rand::Rng;
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::model::{DetectedNetwork, FrequencyBand, MacAddress, SecurityMode};

struct Neighbor {
    ssid: &'static str,
    security: SecurityMode,
    band: FrequencyBand,
}

const NEIGHBORS: &[Neighbor] = &[
    Neighbor {
        ssid: "Neighbor_WiFi",
        security: SecurityMode::Wpa2,
        band: FrequencyBand::TwoPointFourGhz,
    },
    Neighbor {
        ssid: "CoffeeShop_Free",
        security: SecurityMode::Open,
        band: FrequencyBand::TwoPointFourGhz,
    },
    Neighbor {
        ssid: "Office_Network",
        security: SecurityMode::Wpa2,
        band: FrequencyBand::FiveGhz,
    },
    Neighbor {
        ssid: "NETGEAR42-5G",
        security: SecurityMode::Wpa2Wpa3,
        band: FrequencyBand::FiveGhz,
    },
    Neighbor {
        ssid: "Linksys00417",
        security: SecurityMode::Wpa2,
        band: FrequencyBand::TwoPointFourGhz,
    },
    Neighbor {
        ssid: "TP-Link_7C3A",
        security: SecurityMode::Wpa3,
        band: FrequencyBand::TwoPointFourGhz,
    },
    Neighbor {
        ssid: "ATT-Fiber-2291",
        security: SecurityMode::Wpa2,
        band: FrequencyBand::FiveGhz,
    },
    Neighbor {
        ssid: "Library_Public",
        security: SecurityMode::Open,
        band: FrequencyBand::FiveGhz,
    },
    Neighbor {
        ssid: "DIRECT-HP-Printer",
        security: SecurityMode::Wpa2,
        band: FrequencyBand::TwoPointFourGhz,
    },
    Neighbor {
        ssid: "Apartment_4B",
        security: SecurityMode::Wpa3,
        band: FrequencyBand::FiveGhz,
    },
];

/// A network the router itself broadcasts.
#[derive(Debug, Clone)]
pub struct OwnBeacon {
    pub ssid: String,
    pub bssid: MacAddress,
    pub channel: u16,
    pub band: FrequencyBand,
    pub security: SecurityMode,
}

/// Produce a fresh survey: the router's own beacons plus a random subset
/// of neighbors, strongest first, never more than `max_networks` entries
/// (own beacons always fit).
pub fn survey(
    rng: &mut dyn RngCore,
    own: &[OwnBeacon],
    max_networks: usize,
) -> Vec<DetectedNetwork> {
    let room = max_networks.saturating_sub(own.len()).min(NEIGHBORS.len());
    let neighbor_count = if room == 0 {
        0
    } else {
        rng.gen_range(room.min(2)..=room)
    };

    let mut found: Vec<DetectedNetwork> = own
        .iter()
        .map(|beacon| DetectedNetwork {
            ssid: beacon.ssid.clone(),
            bssid: beacon.bssid.clone(),
            channel: beacon.channel,
            band: beacon.band,
            signal_dbm: rng.gen_range(-40..=-30),
            security: beacon.security,
        })
        .collect();

    let picked: Vec<&Neighbor> = NEIGHBORS.choose_multiple(&mut *rng, neighbor_count).collect();
    for neighbor in picked {
        let channels = neighbor.band.channels();
        let channel = channels
            .choose(&mut *rng)
            .copied()
            .unwrap_or_else(|| neighbor.band.default_channel());
        found.push(DetectedNetwork {
            ssid: neighbor.ssid.into(),
            bssid: MacAddress::random_local(&mut *rng),
            channel,
            band: neighbor.band,
            signal_dbm: rng.gen_range(-90..=-45),
            security: neighbor.security,
        });
    }

    found.sort_by(|a, b| b.signal_dbm.cmp(&a.signal_dbm));
    found
}

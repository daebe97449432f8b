// ── Speed test model ──
//
// Throughput depends on the radio band, how clean the channel is, and
// how many stations share the air. 5GHz always beats 2.4GHz under the
// same conditions: the worst 5GHz draw is above the best 2.4GHz draw.

use rand::Rng;
use rand::RngCore;

use crate::model::FrequencyBand;

/// Router facts the model reads.
#[derive(Debug, Clone, Copy)]
pub struct LinkConditions {
    pub band: FrequencyBand,
    pub channel: u16,
    pub device_count: usize,
}

/// One speed-test draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSample {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    pub packet_loss_percent: f64,
    pub packets_sent: u64,
    pub packets_lost: u64,
}

struct BandProfile {
    download_mbps: f64,
    upload_mbps: f64,
    latency_ms: i64,
    max_loss_percent: f64,
}

fn profile(band: FrequencyBand) -> BandProfile {
    match band {
        FrequencyBand::TwoPointFourGhz => BandProfile {
            download_mbps: 95.0,
            upload_mbps: 48.0,
            latency_ms: 14,
            max_loss_percent: 0.5,
        },
        FrequencyBand::FiveGhz => BandProfile {
            download_mbps: 320.0,
            upload_mbps: 160.0,
            latency_ms: 8,
            max_loss_percent: 0.2,
        },
        FrequencyBand::Dual => BandProfile {
            download_mbps: 280.0,
            upload_mbps: 140.0,
            latency_ms: 9,
            max_loss_percent: 0.3,
        },
    }
}

/// Penalty for overlapping 2.4GHz channels and DFS 5GHz channels.
pub fn channel_factor(channel: u16) -> f64 {
    match FrequencyBand::of_channel(channel) {
        Some(FrequencyBand::TwoPointFourGhz) => {
            if matches!(channel, 1 | 6 | 11) {
                1.0
            } else {
                0.85
            }
        }
        Some(FrequencyBand::FiveGhz) => match channel {
            36..=48 => 1.0,
            52..=144 => 0.92,
            _ => 0.97,
        },
        _ => 0.8,
    }
}

/// Airtime share lost to other stations, 1.5% each, floored at 70%.
pub fn congestion_factor(device_count: usize) -> f64 {
    let stations = f64::from(u32::try_from(device_count).unwrap_or(u32::MAX));
    (1.0 - 0.015 * stations).max(0.7)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn measure(rng: &mut dyn RngCore, link: LinkConditions) -> SpeedSample {
    let profile = profile(link.band);
    let scale = channel_factor(link.channel) * congestion_factor(link.device_count);

    let download = profile.download_mbps * scale * rng.gen_range(0.95..=1.05);
    let upload = profile.upload_mbps * scale * rng.gen_range(0.95..=1.05);
    let latency = (profile.latency_ms + rng.gen_range(-2..=2)).max(1) as u32;
    let jitter = rng.gen_range(1..=5);
    let loss = round2(rng.gen_range(0.0..=profile.max_loss_percent));

    let packets_sent: u64 = rng.gen_range(9_000..=11_000);
    let packets_lost = ((packets_sent as f64) * loss / 100.0).round() as u64;

    SpeedSample {
        download_mbps: round2(download),
        upload_mbps: round2(upload),
        latency_ms: latency,
        jitter_ms: jitter,
        packet_loss_percent: loss,
        packets_sent,
        packets_lost,
    }
}

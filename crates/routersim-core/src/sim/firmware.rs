// ── Firmware update check ──

use rand::Rng;
use rand::RngCore;

/// Outcome of contacting the (imaginary) update server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareDraw {
    pub update_available: bool,
    pub latest_version: String,
}

/// Next patch release: `v2.1.4` becomes `v2.1.5`. Versions without a
/// numeric last component get `.1` appended.
pub fn next_patch(version: &str) -> String {
    if let Some((head, last)) = version.rsplit_once('.') {
        if let Ok(patch) = last.parse::<u32>() {
            return format!("{head}.{}", patch.saturating_add(1));
        }
    }
    format!("{version}.1")
}

/// `probability` must already be validated to lie in `0.0..=1.0`.
pub fn check(rng: &mut dyn RngCore, current: &str, probability: f64) -> FirmwareDraw {
    if rng.gen_bool(probability.clamp(0.0, 1.0)) {
        FirmwareDraw {
            update_available: true,
            latest_version: next_patch(current),
        }
    } else {
        FirmwareDraw {
            update_available: false,
            latest_version: current.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn next_patch_bumps_last_component() {
        assert_eq!(next_patch("v2.1.4"), "v2.1.5");
        assert_eq!(next_patch("3.0.9"), "3.0.10");
        assert_eq!(next_patch("beta"), "beta.1");
        assert_eq!(next_patch("v2.rc"), "v2.rc.1");
    }

    #[test]
    fn probability_extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!check(&mut rng, "v1.0.0", 0.0).update_available);
        let draw = check(&mut rng, "v1.0.0", 1.0);
        assert!(draw.update_available);
        assert_eq!(draw.latest_version, "v1.0.1");
    }
}

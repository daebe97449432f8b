// ── Hardware address type ──
//
// MacAddress is the primary key for connected devices and the BSSID of
// detected networks. Lookups are case- and separator-insensitive.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated, dash-separated, or surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_lowercase().replace('-', ":");
        Self(normalized)
    }

    /// Generate a random locally-administered unicast address.
    pub fn random_local(rng: &mut dyn RngCore) -> Self {
        let mut octets = [0u8; 6];
        rng.fill_bytes(&mut octets);
        // Set the locally-administered bit, clear the multicast bit.
        octets[0] = (octets[0] | 0b0000_0010) & 0b1111_1110;
        Self(
            octets
                .iter()
                .map(|o| format!("{o:02x}"))
                .collect::<Vec<_>>()
                .join(":"),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Six colon-separated hex octets.
    pub fn is_well_formed(&self) -> bool {
        let parts: Vec<&str> = self.0.split(':').collect();
        parts.len() == 6
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for MacAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MacAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mac_address_normalizes_dashes() {
        let mac = MacAddress::new("AA-BB-CC-DD-EE-FF");
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn mac_address_normalizes_case_and_whitespace() {
        let mac = MacAddress::new("  AA:BB:CC:DD:EE:01 ");
        assert_eq!(mac, MacAddress::new("aa:bb:cc:dd:ee:01"));
    }

    #[test]
    fn mac_address_from_str() {
        let mac: MacAddress = "AA-BB-CC-DD-EE-FF".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn well_formed_rejects_garbage() {
        assert!(MacAddress::new("aa:bb:cc:dd:ee:ff").is_well_formed());
        assert!(!MacAddress::new("not-a-mac").is_well_formed());
        assert!(!MacAddress::new("aa:bb:cc:dd:ee").is_well_formed());
    }

    #[test]
    fn random_local_is_unicast_and_locally_administered() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let mac = MacAddress::random_local(&mut rng);
            assert!(mac.is_well_formed());
            let first = u8::from_str_radix(&mac.as_str()[..2], 16).unwrap();
            assert_eq!(first & 0b01, 0, "multicast bit set in {mac}");
            assert_eq!(first & 0b10, 0b10, "local bit clear in {mac}");
        }
    }

    #[test]
    fn serde_round_trip_normalizes() {
        let mac: MacAddress = serde_json::from_str("\"AA-BB-CC-DD-EE-02\"").unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"aa:bb:cc:dd:ee:02\"");
    }
}

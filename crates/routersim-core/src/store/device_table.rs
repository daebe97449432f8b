// ── Connected device table ──
//
// Insertion-ordered storage keyed by normalized MAC address. Removal is
// permanent; a removed key is simply absent afterwards.

use indexmap::IndexMap;

use crate::model::{ConnectedDevice, MacAddress};

#[derive(Debug, Clone, Default)]
pub(crate) struct DeviceTable {
    by_mac: IndexMap<MacAddress, ConnectedDevice>,
}

impl DeviceTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a device. Returns `true` if the MAC was new.
    pub(crate) fn upsert(&mut self, device: ConnectedDevice) -> bool {
        self.by_mac.insert(device.mac.clone(), device).is_none()
    }

    /// Remove a device, keeping the relative order of the rest.
    pub(crate) fn remove(&mut self, mac: &MacAddress) -> Option<ConnectedDevice> {
        self.by_mac.shift_remove(mac)
    }

    pub(crate) fn get(&self, mac: &MacAddress) -> Option<&ConnectedDevice> {
        self.by_mac.get(mac)
    }

    pub(crate) fn contains(&self, mac: &MacAddress) -> bool {
        self.by_mac.contains_key(mac)
    }

    /// Devices in connection order.
    pub(crate) fn snapshot(&self) -> Vec<ConnectedDevice> {
        self.by_mac.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_mac.len()
    }
}

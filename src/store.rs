use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{Device, Interface, InterfaceKey, Module, ModuleKey, Neighbor, NeighborKey};

/// Records extracted from every capture of a run, in first-seen order.
///
/// Records are created on first reference and reused afterwards, so repeated
/// mentions of the same entity accumulate into one record.
#[derive(Debug, Default)]
pub(crate) struct RecordStore {
    devices: IndexMap<String, Device>,
    interfaces: IndexMap<InterfaceKey, Interface>,
    neighbors: IndexMap<NeighborKey, IndexMap<String, Neighbor>>,
    modules: IndexMap<ModuleKey, Module>,
}

impl RecordStore {
    pub(crate) fn device_mut(&mut self, name: &str) -> &mut Device {
        self.devices
            .entry(name.to_string())
            .or_insert_with(|| Device::new(name))
    }

    pub(crate) fn interface_mut(&mut self, device: &str, name: &str) -> &mut Interface {
        let key = InterfaceKey {
            device: device.to_string(),
            interface: name.to_string(),
        };
        self.interfaces
            .entry(key)
            .or_insert_with_key(|key| Interface::new(&key.device, &key.interface))
    }

    /// Returns the adjacency seen on `local_interface` towards `remote_interface`.
    ///
    /// `neighbor` is the CDP device ID; anything after its first '.' is
    /// stored as the remote domain.
    pub(crate) fn neighbor_mut(
        &mut self,
        device: &str,
        local_interface: &str,
        remote_interface: &str,
        neighbor: &str,
    ) -> &mut Neighbor {
        let (remote_name, remote_domain) = match neighbor.split_once('.') {
            Some((name, domain)) => (name, Some(domain)),
            None => (neighbor, None),
        };
        let key = NeighborKey {
            device: device.to_string(),
            local_interface: local_interface.to_string(),
            remote_interface: remote_interface.to_string(),
        };

        let by_name = self.neighbors.entry(key.clone()).or_default();
        let entry = by_name
            .entry(remote_name.to_string())
            .or_insert_with(|| Neighbor {
                device: key.device,
                local_interface: key.local_interface,
                remote_name: remote_name.to_string(),
                remote_interface: key.remote_interface,
                ..Default::default()
            });
        if let Some(domain) = remote_domain {
            entry.remote_domain = Some(domain.to_string());
        }
        entry
    }

    pub(crate) fn module_mut(&mut self, key: &ModuleKey) -> &mut Module {
        self.modules
            .entry(key.clone())
            .or_insert_with(|| Module {
                device: key.device.clone(),
                slot: key.slot.clone(),
                subslot: key.subslot.clone(),
                ..Default::default()
            })
    }

    #[cfg(test)]
    pub(crate) fn device(&self, name: &str) -> Option<&Device> {
        self.devices.get(name)
    }

    #[cfg(test)]
    pub(crate) fn interface(&self, device: &str, name: &str) -> Option<&Interface> {
        self.interfaces.get(&InterfaceKey {
            device: device.to_string(),
            interface: name.to_string(),
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Flattens the store into the four report sheets.
    ///
    /// Interfaces are grouped by device in device order, everything else
    /// keeps plain first-seen order.
    pub(crate) fn report(&self) -> Report<'_> {
        let mut interfaces: Vec<&Interface> = self.interfaces.values().collect();
        interfaces.sort_by_key(|interface| {
            self.devices
                .get_index_of(&interface.device)
                .unwrap_or(usize::MAX)
        });

        Report {
            devices: self.devices.values().collect(),
            interfaces,
            neighbors: self
                .neighbors
                .values()
                .flat_map(|by_name| by_name.values())
                .collect(),
            modules: self.modules.values().collect(),
        }
    }
}

/// Ordered tabular view of a [`RecordStore`], one field per sheet.
#[derive(Serialize, Debug)]
pub(crate) struct Report<'a> {
    #[serde(rename = "System")]
    pub(crate) devices: Vec<&'a Device>,
    #[serde(rename = "Interfaces")]
    pub(crate) interfaces: Vec<&'a Interface>,
    #[serde(rename = "CDP neighbors")]
    pub(crate) neighbors: Vec<&'a Neighbor>,
    #[serde(rename = "Modules")]
    pub(crate) modules: Vec<&'a Module>,
}

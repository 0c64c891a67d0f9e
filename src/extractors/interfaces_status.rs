use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::{expand, INTERFACE_TYPES};
use crate::extractors::{columns, Extractor};
use crate::store::RecordStore;

static ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(.+) (connected|notconnect|disabled)\s+(\S+)\s+(\S+)\s+(\S+)\s+(.*)")
        .expect("valid status row pattern")
});

/// `show interfaces status`: one fixed width row per port.
///
/// The table is less precise than the other sources, so it only fills
/// fields that are still empty.
#[derive(Debug, Default)]
pub(crate) struct InterfacesStatus;

impl Extractor for InterfacesStatus {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if line.starts_with("Port") {
            return Ok(());
        }
        let Some(kind) = expand(columns(line, 0, 2), INTERFACE_TYPES) else {
            return Ok(());
        };

        let name = format!("{kind}{}", columns(line, 2, 8).trim_end());
        let interface = store.interface_mut(device, &name);

        let Some(caps) = ROW.captures(columns(line, 8, usize::MAX)) else {
            return Ok(());
        };

        let description = caps[1].trim();
        if !description.is_empty() {
            interface
                .description
                .get_or_insert_with(|| description.to_string());
        }
        interface.status.get_or_insert_with(|| caps[2].to_string());
        if interface.access_vlan.is_none() {
            match &caps[3] {
                mode @ ("trunk" | "routed") => {
                    interface
                        .switchport_mode
                        .get_or_insert_with(|| mode.to_string());
                }
                vlan => interface.access_vlan = Some(vlan.to_string()),
            }
        }
        interface.duplex.get_or_insert_with(|| caps[4].to_string());
        interface.speed.get_or_insert_with(|| caps[5].to_string());
        interface
            .media_type
            .get_or_insert_with(|| caps[6].trim_end().to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::interfaces_status::InterfacesStatus;
    use crate::extractors::Extractor;
    use crate::store::RecordStore;

    const TABLE: &str = "\
Port      Name               Status       Vlan       Duplex  Speed Type
Gi1/0/1   uplink to core     connected    trunk      a-full a-1000 10/100/1000BaseTX
Gi1/0/2                      notconnect   20           auto   auto 10/100/1000BaseTX
Fa0/3     printer            disabled     routed       full    100 10/100BaseTX
Xx0/4     unknown type       connected    1            full    100 10/100BaseTX
";

    fn feed(store: &mut RecordStore, text: &str) {
        for line in text.lines() {
            InterfacesStatus.extract("sw1", line, store).unwrap();
        }
    }

    #[test]
    fn table_rows_create_interfaces() {
        let mut store = RecordStore::default();
        feed(&mut store, TABLE);

        let uplink = store.interface("sw1", "GigabitEthernet1/0/1").unwrap();
        assert_eq!(uplink.kind, "GigabitEthernet");
        assert_eq!(uplink.number, "1/0/1");
        assert_eq!(uplink.description.as_deref(), Some("uplink to core"));
        assert_eq!(uplink.status.as_deref(), Some("connected"));
        assert_eq!(uplink.switchport_mode.as_deref(), Some("trunk"));
        assert_eq!(uplink.access_vlan, None);
        assert_eq!(uplink.duplex.as_deref(), Some("a-full"));
        assert_eq!(uplink.speed.as_deref(), Some("a-1000"));
        assert_eq!(uplink.media_type.as_deref(), Some("10/100/1000BaseTX"));

        let access = store.interface("sw1", "GigabitEthernet1/0/2").unwrap();
        assert_eq!(access.description, None);
        assert_eq!(access.status.as_deref(), Some("notconnect"));
        assert_eq!(access.access_vlan.as_deref(), Some("20"));

        let routed = store.interface("sw1", "FastEthernet0/3").unwrap();
        assert_eq!(routed.switchport_mode.as_deref(), Some("routed"));

        assert_eq!(store.report().interfaces.len(), 3);
    }

    #[test]
    fn existing_values_are_not_overwritten() {
        let mut store = RecordStore::default();
        let interface = store.interface_mut("sw1", "GigabitEthernet1/0/1");
        interface.status = Some("up".to_string());
        interface.description = Some("core link".to_string());
        interface.duplex = Some("Full".to_string());

        feed(&mut store, TABLE);

        let interface = store.interface("sw1", "GigabitEthernet1/0/1").unwrap();
        assert_eq!(interface.status.as_deref(), Some("up"));
        assert_eq!(interface.description.as_deref(), Some("core link"));
        assert_eq!(interface.duplex.as_deref(), Some("Full"));
        assert_eq!(interface.speed.as_deref(), Some("a-1000"));
    }

    #[test]
    fn configured_access_vlan_blocks_vlan_column() {
        let mut store = RecordStore::default();
        store
            .interface_mut("sw1", "GigabitEthernet1/0/1")
            .access_vlan = Some("10".to_string());

        feed(&mut store, TABLE);

        let interface = store.interface("sw1", "GigabitEthernet1/0/1").unwrap();
        assert_eq!(interface.access_vlan.as_deref(), Some("10"));
        assert_eq!(interface.switchport_mode, None);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut store = RecordStore::default();
        feed(&mut store, "\n  \n");
        assert!(store.report().interfaces.is_empty());
    }
}

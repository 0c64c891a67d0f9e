use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::{expand, INTERFACE_TYPES};
use crate::extractors::{columns, Extractor};
use crate::store::RecordStore;

/// Column where the Port ID starts in `show cdp neighbors`.
const PORT_ID_COLUMN: usize = 68;

static DEVICE_ALONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9_\-.]*)$").expect("valid device id pattern")
});
static CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {17}(...) (\S+)").expect("valid continuation pattern"));
static SINGLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9_\-.]*)\s+(...) ([\d/]+)\s+\d+\s+")
        .expect("valid neighbor pattern")
});

static DEVICE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Device ID: ([a-zA-Z0-9][a-zA-Z0-9_\-.]*)").expect("valid device id pattern")
});
static IP_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*IP address: (\S+)").expect("valid ip address pattern"));
static INTERFACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Interface: ([^,]+),\s+Port ID \(outgoing port\): (.*)")
        .expect("valid interface pattern")
});

/// Expands a tabular interface abbreviation such as `Gig 1/0/1`.
///
/// Unknown abbreviations are kept as printed.
fn local_interface(abbreviation: &str, number: &str) -> String {
    let kind = expand(abbreviation, INTERFACE_TYPES).unwrap_or(abbreviation);
    format!("{kind}{number}")
}

fn remote_interface(line: &str) -> String {
    let port = columns(line, PORT_ID_COLUMN, usize::MAX).trim_end();
    match expand(columns(port, 0, 2), INTERFACE_TYPES) {
        Some(kind) => format!("{kind}{}", columns(port, 3, usize::MAX).trim()),
        None => port.trim().to_string(),
    }
}

/// `show cdp neighbors`: the device ID is either alone on its line, with
/// the interfaces on the next one, or shares a line with them.
#[derive(Debug, Default)]
pub(crate) struct CdpBrief {
    neighbor: Option<String>,
}

impl Extractor for CdpBrief {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if let Some(caps) = DEVICE_ALONE.captures(line) {
            if !matches!(&caps[1], "Capability" | "Device") {
                self.neighbor = Some(caps[1].to_string());
            }
            return Ok(());
        }

        if let Some(caps) = CONTINUATION.captures(line) {
            if let Some(neighbor) = self.neighbor.take() {
                let local = local_interface(&caps[1], &caps[2]);
                store.neighbor_mut(device, &local, &remote_interface(line), &neighbor);
                return Ok(());
            }
        }

        if let Some(caps) = SINGLE_LINE.captures(line) {
            let local = local_interface(&caps[2], &caps[3]);
            store.neighbor_mut(device, &local, &remote_interface(line), &caps[1]);
            self.neighbor = None;
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.neighbor = None;
    }
}

/// `show cdp neighbors detail`: one `Device ID` block per adjacency, closed
/// by its `Interface:` line.
#[derive(Debug, Default)]
pub(crate) struct CdpDetail {
    neighbor: Option<String>,
    address: Option<String>,
}

impl Extractor for CdpDetail {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if let Some(caps) = DEVICE_ID.captures(line) {
            self.neighbor = Some(caps[1].to_string());
            self.address = None;
        } else if let Some(caps) = IP_ADDRESS.captures(line) {
            if self.address.is_none() {
                self.address = Some(caps[1].to_string());
            }
        } else if let Some(caps) = INTERFACE.captures(line) {
            if let Some(neighbor) = self.neighbor.take() {
                let (local, remote) = (caps[1].trim(), caps[2].trim());
                let record = store.neighbor_mut(device, local, remote, &neighbor);
                if let Some(address) = self.address.take() {
                    record.remote_ip = Some(address);
                }
            }
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.neighbor = None;
        self.address = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::cdp::{CdpBrief, CdpDetail};
    use crate::extractors::Extractor;
    use crate::store::RecordStore;

    const BRIEF: &str = "\
Capability Codes: R - Router, T - Trans Bridge, B - Source Route Bridge
                  S - Switch, H - Host, I - IGMP, r - Repeater, P - Phone

Device ID        Local Intrfce     Holdtme    Capability  Platform  Port ID
core-sw1.example.com
                 Gig 1/0/1         150             S I    WS-C3750X Gig 1/0/24
router2          Gig 1/0/2         120              R     CISCO2901 Gig 0/1
";

    const DETAIL: &str = "\
-------------------------
Device ID: core-sw1.example.com
Entry address(es):
  IP address: 10.0.0.1
Platform: cisco WS-C3750X-48P,  Capabilities: Switch IGMP
Interface: GigabitEthernet1/0/1,  Port ID (outgoing port): GigabitEthernet1/0/24
Holdtime : 150 sec

Management address(es):
  IP address: 10.0.0.100
-------------------------
Device ID: phone1
Entry address(es):
  IP address: 10.0.0.50
Interface: GigabitEthernet1/0/5,  Port ID (outgoing port): Port 1
";

    fn feed(store: &mut RecordStore, extractor: &mut dyn Extractor, text: &str) {
        for line in text.lines() {
            extractor.extract("sw1", line, store).unwrap();
        }
    }

    #[test]
    fn brief_output_both_shapes() {
        let mut store = RecordStore::default();
        feed(&mut store, &mut CdpBrief::default(), BRIEF);

        let report = store.report();
        assert_eq!(report.neighbors.len(), 2);

        let core = report.neighbors[0];
        assert_eq!(core.device, "sw1");
        assert_eq!(core.remote_name, "core-sw1");
        assert_eq!(core.remote_domain.as_deref(), Some("example.com"));
        assert_eq!(core.local_interface, "GigabitEthernet1/0/1");
        assert_eq!(core.remote_interface, "GigabitEthernet1/0/24");
        assert_eq!(core.remote_ip, None);

        let router = report.neighbors[1];
        assert_eq!(router.remote_name, "router2");
        assert_eq!(router.remote_domain, None);
        assert_eq!(router.local_interface, "GigabitEthernet1/0/2");
        assert_eq!(router.remote_interface, "GigabitEthernet0/1");
    }

    #[test]
    fn detail_output_blocks() {
        let mut store = RecordStore::default();
        feed(&mut store, &mut CdpDetail::default(), DETAIL);

        let report = store.report();
        assert_eq!(report.neighbors.len(), 2);
        assert_eq!(report.neighbors[0].remote_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(report.neighbors[1].remote_name, "phone1");
        assert_eq!(report.neighbors[1].remote_interface, "Port 1");
        assert_eq!(report.neighbors[1].remote_ip.as_deref(), Some("10.0.0.50"));
    }

    #[test]
    fn brief_and_detail_sightings_merge() {
        let mut store = RecordStore::default();
        feed(&mut store, &mut CdpBrief::default(), BRIEF);
        feed(&mut store, &mut CdpDetail::default(), DETAIL);

        let report = store.report();
        assert_eq!(report.neighbors.len(), 3);

        let core = report.neighbors[0];
        assert_eq!(core.remote_name, "core-sw1");
        assert_eq!(core.remote_interface, "GigabitEthernet1/0/24");
        assert_eq!(core.remote_ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn interface_line_without_device_id_is_ignored() {
        let mut store = RecordStore::default();
        feed(
            &mut store,
            &mut CdpDetail::default(),
            "Interface: GigabitEthernet1/0/1,  Port ID (outgoing port): GigabitEthernet0/1\n",
        );
        assert!(store.report().neighbors.is_empty());
    }
}

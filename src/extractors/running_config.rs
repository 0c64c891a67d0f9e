use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::Extractor;
use crate::store::RecordStore;
use crate::subnet::{mask_to_bits, network_of};

static INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^interface (\S+)").expect("valid interface pattern"));
static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ description (.*)").expect("valid description pattern"));
static SWITCHPORT_MODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ switchport mode (\w*)").expect("valid switchport pattern"));
static ACCESS_VLAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" switchport access vlan (\d+)").expect("valid access vlan pattern"));
static VOICE_VLAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" switchport voice vlan (\d+)").expect("valid voice vlan pattern"));
static DLCI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" frame-relay interface-dlci (\d+)").expect("valid dlci pattern")
});
static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ ip address (\d+\.\d+\.\d+\.\d+) (\d+\.\d+\.\d+\.\d+)")
        .expect("valid ip address pattern")
});

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InInterface(String),
}

/// Interface blocks of `show running-config`.
#[derive(Debug, Default)]
pub(crate) struct RunningConfig {
    state: State,
}

impl Extractor for RunningConfig {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if let Some(caps) = INTERFACE.captures(line) {
            store.interface_mut(device, &caps[1]);
            self.state = State::InInterface(caps[1].to_string());
            return Ok(());
        }

        let State::InInterface(name) = &self.state else {
            return Ok(());
        };

        if line == "!" {
            self.state = State::Idle;
            return Ok(());
        }

        let interface = store.interface_mut(device, name);

        if let Some(caps) = DESCRIPTION.captures(line) {
            interface.description = Some(caps[1].to_string());
        } else if let Some(caps) = SWITCHPORT_MODE.captures(line) {
            interface.switchport_mode = Some(caps[1].to_string());
        } else if let Some(caps) = ACCESS_VLAN.captures(line) {
            interface.access_vlan = Some(caps[1].to_string());
        } else if let Some(caps) = VOICE_VLAN.captures(line) {
            interface.voice_vlan = Some(caps[1].to_string());
        } else if let Some(caps) = DLCI.captures(line) {
            interface.dlci = Some(caps[1].parse()?);
        } else if let Some(caps) = IP_ADDRESS.captures(line) {
            let (address, mask) = (&caps[1], &caps[2]);
            interface.ip_address = Some(address.to_string());
            interface.mask = Some(mask.to_string());
            interface.mask_bits = Some(mask_to_bits(mask)?);
            interface.network = Some(network_of(address, mask)?);
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}

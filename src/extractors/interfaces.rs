use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::extractors::Extractor;
use crate::store::RecordStore;
use crate::subnet::{bits_to_mask, network_of};

static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+) is ([\w\s|]+), line protocol is (\w+)").expect("valid status pattern")
});
static HARDWARE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Hardware is (.+), address is ([\w.]+)").expect("valid hardware pattern")
});
static HARDWARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Hardware is ([\w\s-]+)$").expect("valid hardware pattern"));
static ENCAPSULATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^  Encapsulation ([\w\s-]+),").expect("valid encapsulation pattern")
});
static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^  Description: (.*)").expect("valid description pattern"));
static INTERNET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^  Internet address is (\d+\.\d+\.\d+\.\d+)/(\d+)")
        .expect("valid internet address pattern")
});
static INPUT_ERRORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) input errors").expect("valid input errors pattern"));
static CRC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) CRC").expect("valid crc pattern"));
static FRAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) frame").expect("valid frame pattern"));
static OVERRUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) overrun").expect("valid overrun pattern"));
static IGNORED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) ignored").expect("valid ignored pattern"));
static OUTPUT_ERRORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) output errors").expect("valid output errors pattern"));
static COLLISIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) collisions").expect("valid collisions pattern"));
static RESETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) interface resets").expect("valid resets pattern"));
static LINK_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+) Duplex, (\d+)Mbps, link type is (\w+), media type is (.*)")
        .expect("valid link type pattern")
});
static MEDIA_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)-duplex, (\d+)Mb/s, media type is (.*)").expect("valid media type pattern")
});

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InInterface(String),
}

/// `show interfaces`: operational state and counters.
#[derive(Debug, Default)]
pub(crate) struct Interfaces {
    state: State,
}

fn counter(re: &Regex, line: &str) -> Result<Option<u64>, anyhow::Error> {
    re.captures(line)
        .map(|caps| caps[1].parse::<u64>())
        .transpose()
        .map_err(Into::into)
}

fn text(caps: &Captures, group: usize) -> Option<String> {
    Some(caps[group].to_string())
}

impl Extractor for Interfaces {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if let Some(caps) = STATUS.captures(line) {
            let interface = store.interface_mut(device, &caps[1]);
            interface.status = text(&caps, 2);
            interface.line_protocol = text(&caps, 3);
            self.state = State::InInterface(caps[1].to_string());
            return Ok(());
        }

        let State::InInterface(name) = &self.state else {
            return Ok(());
        };
        let interface = store.interface_mut(device, name);

        if let Some(caps) = HARDWARE_ADDRESS.captures(line) {
            interface.hardware = text(&caps, 1);
            interface.mac_address = text(&caps, 2);
        } else if let Some(caps) = HARDWARE.captures(line) {
            interface.hardware = text(&caps, 1);
        } else if let Some(caps) = ENCAPSULATION.captures(line) {
            interface.encapsulation = text(&caps, 1);
        } else if let Some(caps) = DESCRIPTION.captures(line) {
            interface.description = text(&caps, 1);
        } else if let Some(caps) = INTERNET_ADDRESS.captures(line) {
            let address = &caps[1];
            interface.ip_address = Some(address.to_string());
            let bits: u8 = caps[2].parse()?;
            let mask = bits_to_mask(bits)?;
            interface.mask_bits = Some(bits);
            interface.mask = Some(mask.to_string());
            interface.network = Some(network_of(address, mask)?);
        } else if INPUT_ERRORS.is_match(line) {
            interface.input_errors = counter(&INPUT_ERRORS, line)?;
            interface.crc = counter(&CRC, line)?.or(interface.crc);
            interface.frame_errors = counter(&FRAME, line)?.or(interface.frame_errors);
            interface.overrun = counter(&OVERRUN, line)?.or(interface.overrun);
            interface.ignored = counter(&IGNORED, line)?.or(interface.ignored);
        } else if OUTPUT_ERRORS.is_match(line) {
            interface.output_errors = counter(&OUTPUT_ERRORS, line)?;
            interface.collisions = counter(&COLLISIONS, line)?.or(interface.collisions);
            interface.interface_resets = counter(&RESETS, line)?.or(interface.interface_resets);
        } else if let Some(caps) = LINK_TYPE.captures(line) {
            let link_type = &caps[3];
            interface.duplex = Some(format!("{link_type}-{}", &caps[1]));
            interface.speed = Some(format!("{link_type}-{}", &caps[2]));
            interface.media_type = text(&caps, 4);
        } else if let Some(caps) = MEDIA_TYPE.captures(line) {
            interface.duplex = text(&caps, 1);
            interface.speed = text(&caps, 2);
            interface.media_type = text(&caps, 3);
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}

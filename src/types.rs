use serde::Serialize;

/// Identity of an interface: device name and interface name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct InterfaceKey {
    pub(crate) device: String,
    pub(crate) interface: String,
}

/// Identity of a CDP adjacency. Neighbors sharing it are kept apart by remote device name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NeighborKey {
    pub(crate) device: String,
    pub(crate) local_interface: String,
    pub(crate) remote_interface: String,
}

/// Identity of a module; `subslot` is empty for top level slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ModuleKey {
    pub(crate) device: String,
    pub(crate) slot: String,
    pub(crate) subslot: String,
}

#[derive(Serialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Device {
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Model")]
    pub(crate) model: Option<String>,
    #[serde(rename = "System ID")]
    pub(crate) system_id: Option<String>,
    #[serde(rename = "Mother ID")]
    pub(crate) mother_id: Option<String>,
    #[serde(rename = "Image")]
    pub(crate) image: Option<String>,
}

impl Device {
    pub(crate) const COLUMNS: [&'static str; 5] =
        ["Name", "Model", "System ID", "Mother ID", "Image"];

    pub(crate) fn new(name: &str) -> Self {
        Device {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Interface {
    #[serde(rename = "Name")]
    pub(crate) device: String,
    #[serde(rename = "Interface")]
    pub(crate) name: String,
    #[serde(rename = "Type")]
    pub(crate) kind: String,
    #[serde(rename = "Number")]
    pub(crate) number: String,
    #[serde(rename = "Description")]
    pub(crate) description: Option<String>,
    #[serde(rename = "Status")]
    pub(crate) status: Option<String>,
    #[serde(rename = "Line protocol")]
    pub(crate) line_protocol: Option<String>,
    #[serde(rename = "Hardware")]
    pub(crate) hardware: Option<String>,
    #[serde(rename = "Mac address")]
    pub(crate) mac_address: Option<String>,
    #[serde(rename = "Encapsulation")]
    pub(crate) encapsulation: Option<String>,
    #[serde(rename = "Switchport mode")]
    pub(crate) switchport_mode: Option<String>,
    #[serde(rename = "Access vlan")]
    pub(crate) access_vlan: Option<String>,
    #[serde(rename = "Voice vlan")]
    pub(crate) voice_vlan: Option<String>,
    #[serde(rename = "IP address")]
    pub(crate) ip_address: Option<String>,
    #[serde(rename = "Mask bits")]
    pub(crate) mask_bits: Option<u8>,
    #[serde(rename = "Mask")]
    pub(crate) mask: Option<String>,
    #[serde(rename = "Network")]
    pub(crate) network: Option<String>,
    #[serde(rename = "Input errors")]
    pub(crate) input_errors: Option<u64>,
    #[serde(rename = "CRC")]
    pub(crate) crc: Option<u64>,
    #[serde(rename = "Frame errors")]
    pub(crate) frame_errors: Option<u64>,
    #[serde(rename = "Overrun")]
    pub(crate) overrun: Option<u64>,
    #[serde(rename = "Ignored")]
    pub(crate) ignored: Option<u64>,
    #[serde(rename = "Output errors")]
    pub(crate) output_errors: Option<u64>,
    #[serde(rename = "Collisions")]
    pub(crate) collisions: Option<u64>,
    #[serde(rename = "Interface resets")]
    pub(crate) interface_resets: Option<u64>,
    #[serde(rename = "DLCI")]
    pub(crate) dlci: Option<u32>,
    #[serde(rename = "Duplex")]
    pub(crate) duplex: Option<String>,
    #[serde(rename = "Speed")]
    pub(crate) speed: Option<String>,
    #[serde(rename = "Media type")]
    pub(crate) media_type: Option<String>,
}

impl Interface {
    pub(crate) const COLUMNS: [&'static str; 29] = [
        "Name",
        "Interface",
        "Type",
        "Number",
        "Description",
        "Status",
        "Line protocol",
        "Hardware",
        "Mac address",
        "Encapsulation",
        "Switchport mode",
        "Access vlan",
        "Voice vlan",
        "IP address",
        "Mask bits",
        "Mask",
        "Network",
        "Input errors",
        "CRC",
        "Frame errors",
        "Overrun",
        "Ignored",
        "Output errors",
        "Collisions",
        "Interface resets",
        "DLCI",
        "Duplex",
        "Speed",
        "Media type",
    ];

    /// Creates an interface, splitting its name into type and number.
    ///
    /// The type is everything before the first digit, the number everything
    /// after the first run of non-digits (`GigabitEthernet0/1` -> `0/1`).
    pub(crate) fn new(device: &str, name: &str) -> Self {
        let kind = name
            .find(|c: char| c.is_ascii_digit())
            .map_or(name, |pos| &name[..pos]);
        let number = name
            .find(|c: char| !c.is_ascii_digit())
            .map(|start| &name[start..])
            .and_then(|rest| rest.find(|c: char| c.is_ascii_digit()).map(|pos| &rest[pos..]))
            .unwrap_or_default();

        Interface {
            device: device.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            number: number.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Neighbor {
    #[serde(rename = "Name")]
    pub(crate) device: String,
    #[serde(rename = "Local interface")]
    pub(crate) local_interface: String,
    #[serde(rename = "Remote device name")]
    pub(crate) remote_name: String,
    #[serde(rename = "Remote device domain")]
    pub(crate) remote_domain: Option<String>,
    #[serde(rename = "Remote interface")]
    pub(crate) remote_interface: String,
    #[serde(rename = "Remote device IP")]
    pub(crate) remote_ip: Option<String>,
}

impl Neighbor {
    pub(crate) const COLUMNS: [&'static str; 6] = [
        "Name",
        "Local interface",
        "Remote device name",
        "Remote device domain",
        "Remote interface",
        "Remote device IP",
    ];
}

#[derive(Serialize, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Module {
    #[serde(rename = "Name")]
    pub(crate) device: String,
    #[serde(rename = "Slot")]
    pub(crate) slot: String,
    #[serde(rename = "Subslot")]
    pub(crate) subslot: String,
    #[serde(rename = "Description")]
    pub(crate) description: Option<String>,
    #[serde(rename = "Serial number")]
    pub(crate) serial_number: Option<String>,
    #[serde(rename = "Part number")]
    pub(crate) part_number: Option<String>,
}

impl Module {
    pub(crate) const COLUMNS: [&'static str; 6] = [
        "Name",
        "Slot",
        "Subslot",
        "Description",
        "Serial number",
        "Part number",
    ];
}

use std::net::Ipv4Addr;

use anyhow::{anyhow, Context};

/// Valid dotted-quad subnet masks, indexed by prefix length minus one.
const MASKS: [&str; 32] = [
    "128.0.0.0",
    "192.0.0.0",
    "224.0.0.0",
    "240.0.0.0",
    "248.0.0.0",
    "252.0.0.0",
    "254.0.0.0",
    "255.0.0.0",
    "255.128.0.0",
    "255.192.0.0",
    "255.224.0.0",
    "255.240.0.0",
    "255.248.0.0",
    "255.252.0.0",
    "255.254.0.0",
    "255.255.0.0",
    "255.255.128.0",
    "255.255.192.0",
    "255.255.224.0",
    "255.255.240.0",
    "255.255.248.0",
    "255.255.252.0",
    "255.255.254.0",
    "255.255.255.0",
    "255.255.255.128",
    "255.255.255.192",
    "255.255.255.224",
    "255.255.255.240",
    "255.255.255.248",
    "255.255.255.252",
    "255.255.255.254",
    "255.255.255.255",
];

pub(crate) fn mask_to_bits(mask: &str) -> Result<u8, anyhow::Error> {
    MASKS
        .iter()
        .position(|m| *m == mask)
        .and_then(|index| u8::try_from(index + 1).ok())
        .ok_or_else(|| anyhow!("Unsupported subnet mask '{mask}'"))
}

pub(crate) fn bits_to_mask(bits: u8) -> Result<&'static str, anyhow::Error> {
    usize::from(bits)
        .checked_sub(1)
        .and_then(|index| MASKS.get(index))
        .copied()
        .ok_or_else(|| anyhow!("Unsupported prefix length /{bits}"))
}

/// Computes the network address of `address` by AND-ing it with `mask`.
pub(crate) fn network_of(address: &str, mask: &str) -> Result<String, anyhow::Error> {
    let address: Ipv4Addr = address
        .parse()
        .with_context(|| format!("Invalid IPv4 address '{address}'"))?;
    let mask: Ipv4Addr = mask
        .parse()
        .with_context(|| format!("Invalid subnet mask '{mask}'"))?;

    Ok(Ipv4Addr::from(u32::from(address) & u32::from(mask)).to_string())
}

use std::collections::HashMap;

use crate::command::Command;
use crate::store::RecordStore;

mod cdp;
mod interfaces;
mod interfaces_status;
mod inventory;
mod running_config;
mod version;

/// Field extraction for the output of one command.
///
/// Lines are offered one at a time while the command's section is active and
/// a device is known. A line matching none of the extractor's patterns is
/// ignored. An `Err` concerns that single line only.
pub(crate) trait Extractor {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error>;

    /// Drops sub-item state at a section boundary.
    fn reset(&mut self) {}
}

/// One extractor instance per supported command.
pub(crate) fn registry() -> HashMap<Command, Box<dyn Extractor>> {
    Command::ALL
        .into_iter()
        .map(|command| {
            let extractor: Box<dyn Extractor> = match command {
                Command::RunningConfig => Box::<running_config::RunningConfig>::default(),
                Command::Version => Box::new(version::Version),
                Command::Interfaces => Box::<interfaces::Interfaces>::default(),
                Command::InterfacesStatus => Box::new(interfaces_status::InterfacesStatus),
                Command::CdpNeighbors => Box::<cdp::CdpBrief>::default(),
                Command::CdpNeighborsDetail => Box::<cdp::CdpDetail>::default(),
                Command::Inventory => Box::<inventory::Inventory>::default(),
                Command::Diag => Box::<inventory::Diag>::default(),
            };
            (command, extractor)
        })
        .collect()
}

/// Character columns `start..end` of `line`, clamped to its length.
pub(crate) fn columns(line: &str, start: usize, end: usize) -> &str {
    let byte_at = |col: usize| line.char_indices().nth(col).map_or(line.len(), |(i, _)| i);
    let from = byte_at(start);
    let to = byte_at(end.max(start));
    &line[from..to]
}

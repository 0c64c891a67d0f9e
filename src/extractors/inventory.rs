use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::Extractor;
use crate::store::RecordStore;
use crate::types::ModuleKey;

static NAME_SLOT_SUBSLOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"NAME:\s*"[^"]* on Slot (\d+) SubSlot (\d+)",\s*DESCR:\s*"([^"]*)""#)
        .expect("valid subslot name pattern")
});
static NAME_DESCR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"NAME:\s*"([^"]*)",\s*DESCR:\s*"([^"]*)""#).expect("valid name pattern")
});
static PID_SN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PID:\s*(\S+)\s*,\s*VID:\s*\S+\s*,\s*SN:\s*(\S+)").expect("valid pid pattern")
});

static EEPROM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) EEPROM:$").expect("valid eeprom pattern"));
static SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Slot (\d+):$").expect("valid slot pattern"));
static SUBSLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s.*Slot (\d+):$").expect("valid subslot pattern"));
static PART_NUMBERS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        r"\s+Product \(FRU\) Number\s+: (.+)",
        r"\s+FRU Part Number\s+(.+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid part number pattern"))
});
static SERIAL_NUMBERS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        r"\s+PCB Serial Number\s+: (.+)",
        r"\s+Serial number\s+(\S+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid serial number pattern"))
});

fn module_key(device: &str, slot: &str, subslot: &str) -> ModuleKey {
    ModuleKey {
        device: device.to_string(),
        slot: slot.to_string(),
        subslot: subslot.to_string(),
    }
}

/// `show inventory`: NAME/DESCR pairs followed by their PID line.
#[derive(Debug, Default)]
pub(crate) struct Inventory {
    current: Option<ModuleKey>,
}

impl Extractor for Inventory {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        let header = NAME_SLOT_SUBSLOT
            .captures(line)
            .map(|caps| (module_key(device, &caps[1], &caps[2]), caps[3].to_string()))
            .or_else(|| {
                NAME_DESCR
                    .captures(line)
                    .map(|caps| (module_key(device, &caps[1], ""), caps[2].to_string()))
            });

        if let Some((key, description)) = header {
            store.module_mut(&key).description = Some(description);
            self.current = Some(key);
        } else if let (Some(caps), Some(key)) = (PID_SN.captures(line), &self.current) {
            let module = store.module_mut(key);
            module.part_number = Some(caps[1].to_string());
            module.serial_number = Some(caps[2].to_string());
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Default)]
enum DiagState {
    #[default]
    Idle,
    /// The line after a slot header is the module description.
    AwaitingDescription,
}

/// `show diag`: slot headers followed by EEPROM fields.
#[derive(Debug, Default)]
pub(crate) struct Diag {
    slot: Option<String>,
    current: Option<ModuleKey>,
    state: DiagState,
}

impl Diag {
    fn enter(&mut self, store: &mut RecordStore, key: ModuleKey) {
        store.module_mut(&key);
        self.current = Some(key);
    }
}

impl Extractor for Diag {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        if let Some(caps) = EEPROM.captures(line) {
            self.slot = Some(caps[1].to_string());
            self.enter(store, module_key(device, &caps[1], ""));
            return Ok(());
        }

        if let Some(caps) = SLOT.captures(line) {
            self.slot = Some(caps[1].to_string());
            self.enter(store, module_key(device, &caps[1], ""));
            self.state = DiagState::AwaitingDescription;
            return Ok(());
        }

        if let Some(caps) = SUBSLOT.captures(line) {
            if let Some(slot) = self.slot.clone() {
                self.enter(store, module_key(device, &slot, &caps[1]));
                self.state = DiagState::AwaitingDescription;
            }
            return Ok(());
        }

        let Some(key) = &self.current else {
            return Ok(());
        };
        let module = store.module_mut(key);

        if let DiagState::AwaitingDescription = self.state {
            module.description = Some(line.trim().to_string());
            self.state = DiagState::Idle;
        } else if let Some(caps) = PART_NUMBERS.iter().find_map(|re| re.captures(line)) {
            module.part_number = Some(caps[1].to_string());
        } else if let Some(caps) = SERIAL_NUMBERS.iter().find_map(|re| re.captures(line)) {
            module.serial_number = Some(caps[1].to_string());
        }

        Ok(())
    }

    fn reset(&mut self) {
        *self = Diag::default();
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::inventory::{Diag, Inventory};
    use crate::extractors::Extractor;
    use crate::store::RecordStore;

    const INVENTORY: &str = r#"
NAME: "1", DESCR: "WS-C3750X-48P"
PID: WS-C3750X-48P-S   , VID: V02  , SN: FDO1234X0AB

NAME: "module 0 on Slot 0 SubSlot 1", DESCR: "Four port GE WAN"
PID: EHWIC-4ESG        , VID: V01  , SN: FOC98765ZZZ

NAME: "Switch 1 - Power Supply 0", DESCR: "FRU Power Supply"
PID: C3KX-PWR-715WAC   , VID: V01L , SN: DCB1234G0LM
"#;

    const DIAG: &str = "\
Slot 0:
\tC2821 Motherboard with 2GE and integrated VPN Port adapter, 2 ports
\tPort adapter is analyzed
\tProduct (FRU) Number     : CISCO2821
\tPCB Serial Number        : FOC11111AAA
\tWIC Slot 1:
\tHWIC-4ESW
\t\tFRU Part Number          HWIC-4ESW
\t\tSerial number            FOC22222BBB
Power Supply EEPROM:
\tSerial number            QCS33333CCC
";

    fn feed(store: &mut RecordStore, extractor: &mut dyn Extractor, text: &str) {
        for line in text.lines() {
            extractor.extract("r1", line, store).unwrap();
        }
    }

    #[test]
    fn inventory_items() {
        let mut store = RecordStore::default();
        feed(&mut store, &mut Inventory::default(), INVENTORY);

        let modules = store.report().modules;
        assert_eq!(modules.len(), 3);

        assert_eq!(modules[0].slot, "1");
        assert_eq!(modules[0].subslot, "");
        assert_eq!(modules[0].description.as_deref(), Some("WS-C3750X-48P"));
        assert_eq!(modules[0].part_number.as_deref(), Some("WS-C3750X-48P-S"));
        assert_eq!(modules[0].serial_number.as_deref(), Some("FDO1234X0AB"));

        assert_eq!(modules[1].slot, "0");
        assert_eq!(modules[1].subslot, "1");
        assert_eq!(modules[1].description.as_deref(), Some("Four port GE WAN"));
        assert_eq!(modules[1].part_number.as_deref(), Some("EHWIC-4ESG"));

        assert_eq!(modules[2].slot, "Switch 1 - Power Supply 0");
        assert_eq!(modules[2].serial_number.as_deref(), Some("DCB1234G0LM"));
    }

    #[test]
    fn pid_line_without_item_is_ignored() {
        let mut store = RecordStore::default();
        feed(
            &mut store,
            &mut Inventory::default(),
            "PID: WS-C3750X-48P-S   , VID: V02  , SN: FDO1234X0AB\n",
        );
        assert!(store.report().modules.is_empty());
    }

    #[test]
    fn diag_slots_and_subslots() {
        let mut store = RecordStore::default();
        feed(&mut store, &mut Diag::default(), DIAG);

        let modules = store.report().modules;
        assert_eq!(modules.len(), 3);

        let board = modules[0];
        assert_eq!((board.slot.as_str(), board.subslot.as_str()), ("0", ""));
        assert_eq!(
            board.description.as_deref(),
            Some("C2821 Motherboard with 2GE and integrated VPN Port adapter, 2 ports")
        );
        assert_eq!(board.part_number.as_deref(), Some("CISCO2821"));
        assert_eq!(board.serial_number.as_deref(), Some("FOC11111AAA"));

        let wic = modules[1];
        assert_eq!((wic.slot.as_str(), wic.subslot.as_str()), ("0", "1"));
        assert_eq!(wic.description.as_deref(), Some("HWIC-4ESW"));
        assert_eq!(wic.part_number.as_deref(), Some("HWIC-4ESW"));
        assert_eq!(wic.serial_number.as_deref(), Some("FOC22222BBB"));

        let power = modules[2];
        assert_eq!(power.slot, "Power Supply");
        assert_eq!(power.description, None);
        assert_eq!(power.serial_number.as_deref(), Some("QCS33333CCC"));
    }
}

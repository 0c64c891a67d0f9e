use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::Extractor;
use crate::store::RecordStore;

static SYSTEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Processor board ID (.*)").expect("valid system id pattern"));
static MODELS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        r"Model number\s*: (.*)",
        r"^cisco (.*) processor",
        r"^Cisco (.*) \(revision",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid model pattern"))
});
static MOTHER_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Motherboard serial number\s*: (.*)").expect("valid motherboard pattern")
});
// Tried in order, the first match names the image.
static IMAGES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        r#"System image file is "flash:([^/"]*)\.bin""#,
        r#"System image file is "flash:.*/([^/"]*)\.bin""#,
        r#"System image file is "bootflash:(.*)\.bin""#,
        r#"System image file is "sup-bootflash:(.*)\.bin""#,
    ]
    .map(|pattern| Regex::new(pattern).expect("valid image pattern"))
});

/// `show version`: chassis identity and boot image.
#[derive(Debug, Default)]
pub(crate) struct Version;

impl Extractor for Version {
    fn extract(
        &mut self,
        device: &str,
        line: &str,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        let record = store.device_mut(device);

        if let Some(caps) = SYSTEM_ID.captures(line) {
            record.system_id = Some(caps[1].to_string());
        } else if let Some(caps) = MODELS.iter().find_map(|re| re.captures(line)) {
            record.model = Some(caps[1].to_string());
        } else if let Some(caps) = MOTHER_ID.captures(line) {
            record.mother_id = Some(caps[1].to_string());
        } else if let Some(caps) = IMAGES.iter().find_map(|re| re.captures(line)) {
            record.image = Some(caps[1].to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::version::Version;
    use crate::extractors::Extractor;
    use crate::store::RecordStore;

    fn feed(lines: &[&str]) -> RecordStore {
        let mut store = RecordStore::default();
        for line in lines {
            Version.extract("r1", line, &mut store).unwrap();
        }
        store
    }

    #[test]
    fn identity_fields() {
        let store = feed(&[
            "Cisco IOS Software, C2960 Software (C2960-LANBASEK9-M), Version 12.2(55)SE5",
            "cisco WS-C2960-24TT-L (PowerPC405) processor (revision B0) with 65536K bytes of memory.",
            "Processor board ID FOC1234X5YZ",
            "Motherboard serial number       : FOC12345ABC",
        ]);

        let device = store.device("r1").unwrap();
        assert_eq!(device.system_id.as_deref(), Some("FOC1234X5YZ"));
        assert_eq!(device.model.as_deref(), Some("WS-C2960-24TT-L (PowerPC405)"));
        assert_eq!(device.mother_id.as_deref(), Some("FOC12345ABC"));
    }

    #[test]
    fn model_number_and_revision_phrasings() {
        let store = feed(&["Model number                    : WS-C3750X-48P-S"]);
        assert_eq!(
            store.device("r1").unwrap().model.as_deref(),
            Some("WS-C3750X-48P-S")
        );

        let store = feed(&["Cisco CISCO2901/K9 (revision 1.0) with 483328K/40960K bytes of memory."]);
        assert_eq!(
            store.device("r1").unwrap().model.as_deref(),
            Some("CISCO2901/K9")
        );
    }

    #[test]
    fn image_prefixes_are_stripped() {
        let cases = [
            (
                r#"System image file is "flash:c2960-lanbasek9-mz.122-55.SE5.bin""#,
                "c2960-lanbasek9-mz.122-55.SE5",
            ),
            (
                r#"System image file is "flash:/c3750e-universalk9-mz.150-2.SE/c3750e-universalk9-mz.150-2.SE.bin""#,
                "c3750e-universalk9-mz.150-2.SE",
            ),
            (
                r#"System image file is "bootflash:c7600s72033-advipservicesk9-mz.122-33.SXI.bin""#,
                "c7600s72033-advipservicesk9-mz.122-33.SXI",
            ),
            (
                r#"System image file is "sup-bootflash:s72033-ipservicesk9_wan-mz.122-33.SXH.bin""#,
                "s72033-ipservicesk9_wan-mz.122-33.SXH",
            ),
        ];

        for (line, image) in cases {
            let store = feed(&[line]);
            assert_eq!(store.device("r1").unwrap().image.as_deref(), Some(image));
        }
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::{
    resolve, strip_terminal_edits, Command, COMMAND_WORDS, PROMPT_FALSE_POSITIVES,
};
use crate::extractors::{registry, Extractor};
use crate::store::RecordStore;

static PROMPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9_\-]*)[#>]\s*([\w\-\s\x08\x07]*)")
        .expect("valid prompt pattern")
});
static BANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^------------------ (.*) ------------------$").expect("valid banner pattern")
});
static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^hostname ([a-zA-Z0-9][a-zA-Z0-9_\-]*)").expect("valid hostname pattern")
});

/// Where in the capture the current line sits.
#[derive(Debug, Default)]
struct Context {
    device: String,
    /// Canonical command or banner label of the current section.
    command: String,
    /// Extractor command of the current section, if it has one.
    section: Option<Command>,
}

/// Splits captures into device and command sections and hands each line to
/// the extractor of its section.
pub(crate) struct Tracker {
    extractors: HashMap<Command, Box<dyn Extractor>>,
    context: Context,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Tracker {
            extractors: registry(),
            context: Context::default(),
        }
    }

    pub(crate) fn process_file(
        &mut self,
        path: &Path,
        store: &mut RecordStore,
    ) -> Result<(), anyhow::Error> {
        let data = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
        self.process(&path.display().to_string(), &String::from_utf8_lossy(&data), store);

        Ok(())
    }

    /// Processes one capture.
    ///
    /// The capture is scanned once to find the first device, then replayed
    /// from its first line with that device already current. Returns false
    /// when no device could be identified.
    pub(crate) fn process(&mut self, source: &str, text: &str, store: &mut RecordStore) -> bool {
        self.context = Context::default();
        self.reset_extractors();

        let Some(device) = first_device(text.lines()) else {
            info!("{source}: no device found");
            return false;
        };
        self.enter_device(&device, store);

        for (index, line) in text.lines().enumerate() {
            if let Err(err) = self.process_line(line, store) {
                warn!("{source}:{}: {err:#}", index + 1);
            }
        }

        true
    }

    fn process_line(&mut self, line: &str, store: &mut RecordStore) -> Result<(), anyhow::Error> {
        if let Some(caps) = PROMPT.captures(line) {
            if !PROMPT_FALSE_POSITIVES.contains(&self.context.command.as_str()) {
                self.enter_device(&caps[1], store);

                let echoed = strip_terminal_edits(&caps[2]);
                let command = resolve(&echoed, COMMAND_WORDS).unwrap_or_else(|| {
                    debug!("{}: unrecognized command '{}'", &caps[1], echoed.trim());
                    String::new()
                });
                self.enter_section(command);
                return Ok(());
            }
        }

        if let Some(caps) = BANNER.captures(line) {
            self.enter_section(caps[1].to_string());
            return Ok(());
        }

        let Some(command) = self.context.section else {
            return Ok(());
        };
        // Only the first hostname of a capture matters, and it was found
        // before replaying.
        if command == Command::RunningConfig && HOSTNAME.is_match(line) {
            return Ok(());
        }
        if self.context.device.is_empty() {
            return Ok(());
        }

        match self.extractors.get_mut(&command) {
            Some(extractor) => extractor.extract(&self.context.device, line, store),
            None => Ok(()),
        }
    }

    fn enter_device(&mut self, name: &str, store: &mut RecordStore) {
        if self.context.device != name {
            debug!("Device {name}");
        }
        store.device_mut(name);
        self.context = Context {
            device: name.to_string(),
            ..Default::default()
        };
        self.reset_extractors();
    }

    fn enter_section(&mut self, command: String) {
        debug!("{}: section '{command}'", self.context.device);
        self.context.section = Command::from_name(&command);
        self.context.command = command;
        self.reset_extractors();
    }

    fn reset_extractors(&mut self) {
        self.extractors
            .values_mut()
            .for_each(|extractor| extractor.reset());
    }
}

/// Finds the device a capture starts with: the first CLI prompt, or the
/// hostname of a running-config section seen before any prompt.
fn first_device<'a>(lines: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut command = "";

    for line in lines {
        if let Some(caps) = PROMPT.captures(line) {
            if !PROMPT_FALSE_POSITIVES.contains(&command) {
                return Some(caps[1].to_string());
            }
        }

        if let Some(label) = BANNER.captures(line).and_then(|caps| caps.get(1)) {
            command = label.as_str();
            continue;
        }

        if command == Command::RunningConfig.name() {
            if let Some(caps) = HOSTNAME.captures(line) {
                return Some(caps[1].to_string());
            }
        }
    }

    None
}

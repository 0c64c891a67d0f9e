/// Full command words accepted at each token position of an echoed command.
pub(crate) const COMMAND_WORDS: &[&[&str]] = &[
    &["show", "sh"],
    &[
        "version",
        "ver",
        "cdp",
        "technical-support",
        "running-config",
        "interfaces",
        "diag",
        "inventory",
        "inv",
    ],
    &["neighbors", "neig", "status"],
    &["detail"],
];

/// Interface type names used to expand the abbreviations printed in tabular output.
pub(crate) const INTERFACE_TYPES: &[&str] = &[
    "Ethernet",
    "FastEthernet",
    "FDDI",
    "GigabitEthernet",
    "Gigabit",
    "TenGigabit",
    "Serial",
    "ATM",
    "Port-channel",
    "Tunnel",
    "Loopback",
    "TwentyFiveGigE",
    "HundredGigE",
    "AppGigabitEthernet",
    "FortyGigabitEthernet",
];

/// Sections whose output contains lines shaped like a CLI prompt.
pub(crate) const PROMPT_FALSE_POSITIVES: &[&str] = &["show switch detail", "show flash: all"];

/// Commands with a dedicated extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Command {
    RunningConfig,
    Version,
    Interfaces,
    InterfacesStatus,
    CdpNeighbors,
    CdpNeighborsDetail,
    Inventory,
    Diag,
}

impl Command {
    pub(crate) const ALL: [Command; 8] = [
        Command::RunningConfig,
        Command::Version,
        Command::Interfaces,
        Command::InterfacesStatus,
        Command::CdpNeighbors,
        Command::CdpNeighborsDetail,
        Command::Inventory,
        Command::Diag,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Command::RunningConfig => "show running-config",
            Command::Version => "show version",
            Command::Interfaces => "show interfaces",
            Command::InterfacesStatus => "show interfaces status",
            Command::CdpNeighbors => "show cdp neighbors",
            Command::CdpNeighborsDetail => "show cdp neighbors detail",
            Command::Inventory => "show inventory",
            Command::Diag => "show diag",
        }
    }

    /// Looks up the extractor command for a canonical command name or banner label.
    pub(crate) fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|cmd| cmd.name() == name)
    }
}

/// Returns the first candidate that `word` is a case-insensitive prefix of.
pub(crate) fn expand<'a>(word: &str, candidates: &[&'a str]) -> Option<&'a str> {
    if word.is_empty() {
        return None;
    }

    let word = word.to_lowercase();
    candidates
        .iter()
        .find(|candidate| candidate.to_lowercase().starts_with(&word))
        .copied()
}

/// Expands every space separated token of `text` against the word list for its position.
///
/// Returns `None` as soon as one token cannot be expanded, including tokens
/// beyond the last position of `table`.
pub(crate) fn resolve(text: &str, table: &[&[&str]]) -> Option<String> {
    text.split_whitespace()
        .enumerate()
        .map(|(pos, word)| table.get(pos).and_then(|words| expand(word, words)))
        .collect::<Option<Vec<_>>>()
        .map(|words| words.join(" "))
}

/// Applies the backspace and bell characters a terminal leaves in an echoed command.
pub(crate) fn strip_terminal_edits(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{8}' => {
                cleaned.pop();
            }
            '\u{7}' => {}
            _ => cleaned.push(c),
        }
    }
    cleaned
}

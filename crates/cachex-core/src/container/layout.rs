//! Fixed format parameters of a cache container.

use serde::{Deserialize, Serialize};

/// Size of the binary record header that precedes the metadata block.
pub const DEFAULT_HEADER_SIZE: u64 = 0x90;

/// Prefix of the metadata line that carries the cache key.
pub const DEFAULT_KEY_MARKER: &str = "KEY: ";

/// Longest metadata line the scanner will buffer, terminator excluded.
pub const MAX_METADATA_LINE: usize = 64 * 1024;

/// How the metadata scanner accounts for line terminators when computing the
/// body offset.
///
/// Lines are always split on `\n` and a trailing `\r` is dropped from the
/// line content. The variants only differ in how many bytes each consumed
/// line adds to the running offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Count the terminator bytes actually present on each line.
    #[default]
    Measured,
    /// Every line is assumed to end in a single `\n`.
    Lf,
    /// Every line is assumed to end in `\r\n`.
    Crlf,
}

impl LineEnding {
    /// Terminator length to add for a line whose raw terminator was `raw_len`
    /// bytes long (0 at EOF, 1 for `\n`, 2 for `\r\n`).
    pub fn terminator_len(self, raw_len: usize) -> u64 {
        match self {
            LineEnding::Measured => raw_len as u64,
            LineEnding::Lf => 1,
            LineEnding::Crlf => 2,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "measured" => Some(LineEnding::Measured),
            "lf" => Some(LineEnding::Lf),
            "crlf" => Some(LineEnding::Crlf),
            _ => None,
        }
    }
}

/// Immutable description of the container format being decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    pub header_size: u64,
    pub key_marker: String,
    pub line_ending: LineEnding,
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self {
            header_size: DEFAULT_HEADER_SIZE,
            key_marker: DEFAULT_KEY_MARKER.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

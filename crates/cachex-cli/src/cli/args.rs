//! Value parsers for flags clap cannot parse on its own.

use cachex_core::container::LineEnding;

/// Accepts `144` or `0x90`.
pub fn parse_header_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid header size {s:?}: {e}"))
}

pub fn parse_line_ending(s: &str) -> Result<LineEnding, String> {
    LineEnding::parse(s).ok_or_else(|| format!("unknown line ending {s:?} (expected measured, lf or crlf)"))
}

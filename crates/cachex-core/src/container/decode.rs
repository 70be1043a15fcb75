//! Metadata scan and body offset arithmetic.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::layout::{ContainerLayout, MAX_METADATA_LINE};
use crate::error::ExtractError;

/// Result of scanning the metadata block that follows the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataScan {
    /// Value of the last key line, or empty if none was seen.
    pub key: String,
    /// Bytes attributed to the metadata block, including the blank boundary line.
    pub metadata_len: u64,
    /// False when EOF was reached before a blank line.
    pub boundary_found: bool,
}

/// A decoded container: the key and where the body starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub key: String,
    /// Absolute offset of the first body byte (`header_size + metadata_len`).
    pub body_offset: u64,
    pub boundary_found: bool,
}

/// Scan metadata lines from `reader` until the blank boundary line.
///
/// A blank line only ends the block once at least one byte has been counted,
/// so a leading empty line right after the header is treated as metadata.
/// A line longer than [`MAX_METADATA_LINE`] is an `InvalidData` error, so a
/// stray non-container file is never buffered whole.
pub fn scan_metadata<R: BufRead>(mut reader: R, layout: &ContainerLayout) -> io::Result<MetadataScan> {
    let marker = layout.key_marker.as_bytes();
    let mut key = String::new();
    let mut pos: u64 = 0;
    let mut line = Vec::with_capacity(256);

    loop {
        line.clear();
        // One extra byte leaves room for the `\n` of a maximal line.
        let cap = MAX_METADATA_LINE as u64 + 1;
        let n = reader.by_ref().take(cap).read_until(b'\n', &mut line)?;
        if n > MAX_METADATA_LINE && line.last() != Some(&b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("metadata line exceeds {MAX_METADATA_LINE} bytes"),
            ));
        }
        if n == 0 {
            return Ok(MetadataScan {
                key,
                metadata_len: pos,
                boundary_found: false,
            });
        }

        let raw_term = raw_terminator_len(&line);
        let content = &line[..n - raw_term];
        let term = layout.line_ending.terminator_len(raw_term);

        if let Some(value) = content.strip_prefix(marker) {
            key = String::from_utf8_lossy(value).into_owned();
            tracing::debug!(key = %key, "found key line");
        }

        if pos > 0 && content.is_empty() {
            pos += term;
            return Ok(MetadataScan {
                key,
                metadata_len: pos,
                boundary_found: true,
            });
        }
        pos += content.len() as u64 + term;
    }
}

/// `\r\n` counts as 2, `\n` as 1, a final unterminated line as 0.
fn raw_terminator_len(line: &[u8]) -> usize {
    match line {
        [.., b'\r', b'\n'] => 2,
        [.., b'\n'] => 1,
        _ => 0,
    }
}

/// Decode one container and leave `reader` positioned at the first body byte.
///
/// `path` is only used for error context.
pub fn decode_container<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
    layout: &ContainerLayout,
) -> Result<DecodedEntry, ExtractError> {
    let header_size = layout.header_size;
    let header_err = |len: u64, source: Option<io::Error>| ExtractError::HeaderSkip {
        path: path.to_path_buf(),
        header_size,
        len,
        source,
    };

    let len = reader
        .seek(SeekFrom::End(0))
        .map_err(|e| header_err(0, Some(e)))?;
    if len < header_size {
        return Err(header_err(len, None));
    }
    match reader.seek(SeekFrom::Start(header_size)) {
        Ok(n) if n == header_size => {}
        Ok(_) => return Err(header_err(len, None)),
        Err(e) => return Err(header_err(len, Some(e))),
    }

    let scan = scan_metadata(BufReader::new(&mut *reader), layout).map_err(|source| {
        ExtractError::MetadataRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let body_offset = header_size + scan.metadata_len;
    let body_err = |source: Option<io::Error>| ExtractError::BodySeek {
        path: path.to_path_buf(),
        offset: body_offset,
        source,
    };
    match reader.seek(SeekFrom::Start(body_offset)) {
        Ok(n) if n == body_offset => {}
        Ok(_) => return Err(body_err(None)),
        Err(e) => return Err(body_err(Some(e))),
    }

    if !scan.boundary_found {
        tracing::warn!(path = %path.display(), "no blank line after metadata; body is empty");
    }

    Ok(DecodedEntry {
        key: scan.key,
        body_offset,
        boundary_found: scan.boundary_found,
    })
}

//! Cache container decoding.
//!
//! A container is a fixed-size binary header, a block of text metadata lines
//! ended by a blank line, and the cached response body up to EOF. Only the
//! header length is known here; its fields are never interpreted.

mod decode;
mod layout;

pub use decode::{decode_container, scan_metadata, DecodedEntry, MetadataScan};
pub use layout::{
    ContainerLayout, LineEnding, DEFAULT_HEADER_SIZE, DEFAULT_KEY_MARKER,
    MAX_METADATA_LINE,
};

//! Cache key to destination path mapping.
//!
//! Keys are used as relative paths under the destination root. Keys that name
//! a directory-style resource (trailing `/`) get a synthetic index file.

mod resolve;

pub use resolve::{resolve_destination, UnusableKey};

/// Leaf file name used for directory-style keys.
pub const INDEX_FILE_NAME: &str = "__index.html";

/// Map a key to the relative path it should be written to.
///
/// Total and pure: `"a/b/"` → `"a/b/__index.html"`, anything else is returned
/// unchanged (including the empty key).
pub fn map_key(key: &str) -> String {
    if key.ends_with('/') {
        format!("{key}{INDEX_FILE_NAME}")
    } else {
        key.to_string()
    }
}

//! Joining mapped keys onto the destination root.

use std::path::{Component, Path, PathBuf};

use super::map_key;

/// Why a key cannot be turned into a file path under the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusableKey {
    /// The key contains `..` and parent components are not allowed.
    ClimbsOut,
    /// The key names no file below the root (`.`, `/.`, `a/..`).
    NoFileName,
}

/// Resolve `key` to a path under `dest_root`.
///
/// Root, prefix and `.` components are dropped, so URL-style keys such as
/// `/img/a.png` stay inside the root instead of replacing it. A key that
/// leaves nothing but the root itself, or ends on `..`, is rejected so the
/// destination root is never written as a file.
pub fn resolve_destination(
    dest_root: &Path,
    key: &str,
    allow_parent: bool,
) -> Result<PathBuf, UnusableKey> {
    let relative = map_key(key);
    let mut out = dest_root.to_path_buf();
    let mut ends_on_name = false;
    for component in Path::new(&relative).components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                ends_on_name = true;
            }
            Component::ParentDir if allow_parent => {
                out.push("..");
                ends_on_name = false;
            }
            Component::ParentDir => return Err(UnusableKey::ClimbsOut),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    if ends_on_name {
        Ok(out)
    } else {
        Err(UnusableKey::NoFileName)
    }
}

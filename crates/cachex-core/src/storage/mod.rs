//! Output file lifecycle.
//!
//! Creates missing parent directories, streams a body into a `.part` temp
//! file next to the destination, and atomically renames it into place so a
//! failed copy never leaves a truncated file at the final path.

mod writer;

pub use writer::BodyWriter;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a/b.js` → `a/b.js.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create `dest` (and its parents) and copy everything left in `body` into it.
/// An existing file at `dest` is replaced. Returns the number of bytes written.
pub fn write_body<R: Read>(dest: &Path, body: &mut R) -> Result<u64, ExtractError> {
    let mut writer = BodyWriter::create(dest)?;
    let written = writer.copy_from(body)?;
    writer.finalize()?;
    Ok(written)
}

//! Streaming writer for one extracted body.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::temp_path;
use crate::error::ExtractError;

/// Writer for one destination file. Bytes go to `<dest>.part` until
/// [`BodyWriter::finalize`] renames it onto `dest`. Dropping the writer
/// without finalizing removes the temp file.
pub struct BodyWriter {
    out: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl BodyWriter {
    /// Create missing parent directories of `dest` and open a fresh temp file.
    pub fn create(dest: &Path) -> Result<Self, ExtractError> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|source| ExtractError::DirCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = temp_path(dest);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|source| ExtractError::FileCreate {
                path: dest.to_path_buf(),
                source,
            })?;

        Ok(BodyWriter {
            out: Some(BufWriter::new(file)),
            temp_path,
            final_path: dest.to_path_buf(),
        })
    }

    /// Copy everything remaining in `body` into the temp file.
    pub fn copy_from<R: Read>(&mut self, body: &mut R) -> Result<u64, ExtractError> {
        let final_path = &self.final_path;
        let copy_err = |source: io::Error| ExtractError::Copy {
            path: final_path.clone(),
            source,
        };
        let out = self
            .out
            .as_mut()
            .ok_or_else(|| copy_err(io::Error::new(io::ErrorKind::Other, "writer already finalized")))?;
        let n = io::copy(body, out).map_err(copy_err)?;
        out.flush().map_err(copy_err)?;
        Ok(n)
    }

    /// Path of the temp file currently being written.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Close the temp file and rename it onto the destination, replacing any
    /// previous output for the same key.
    pub fn finalize(mut self) -> Result<(), ExtractError> {
        if let Some(out) = self.out.take() {
            out.into_inner().map_err(|e| ExtractError::Copy {
                path: self.final_path.clone(),
                source: e.into_error(),
            })?;
        }
        fs::rename(&self.temp_path, &self.final_path).map_err(|source| ExtractError::FileCreate {
            path: self.final_path.clone(),
            source,
        })?;
        // Nothing left to clean up in Drop.
        self.temp_path = PathBuf::new();
        Ok(())
    }
}

impl Drop for BodyWriter {
    fn drop(&mut self) {
        drop(self.out.take());
        if !self.temp_path.as_os_str().is_empty() && fs::remove_file(&self.temp_path).is_ok() {
            tracing::debug!(path = %self.temp_path.display(), "removed partial output");
        }
    }
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o777).create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

//! Per-file extraction error type.
//!
//! Every variant carries the path it refers to so batch reports can name the
//! container (or destination) and the step that failed. None of these are
//! retried: the container does not change between attempts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The container could not be opened for reading.
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The container is shorter than the fixed header, or seeking past it failed.
    #[error("failed to skip {header_size}-byte header of {} (file is {len} bytes)", .path.display())]
    HeaderSkip {
        path: PathBuf,
        header_size: u64,
        len: u64,
        #[source]
        source: Option<io::Error>,
    },

    /// Reading the metadata block failed part way through.
    #[error("failed to read metadata of {}: {source}", .path.display())]
    MetadataRead { path: PathBuf, source: io::Error },

    /// Seeking to the computed body offset did not land there.
    #[error("failed to seek to body offset {offset} in {}", .path.display())]
    BodySeek {
        path: PathBuf,
        offset: u64,
        #[source]
        source: Option<io::Error>,
    },

    /// The key would escape the destination root through `..` components.
    #[error("refusing key {key:?} from {}: it climbs out of the destination root", .path.display())]
    UnsafeKey { path: PathBuf, key: String },

    #[error("failed to create dest dir {}: {source}", .path.display())]
    DirCreate { path: PathBuf, source: io::Error },

    #[error("failed to create output file {}: {source}", .path.display())]
    FileCreate { path: PathBuf, source: io::Error },

    #[error("failed to copy body to output file {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },

    /// The directory traversal itself failed (unreadable directory, loop, ...).
    #[error("failed to walk {}: {source}", .path.display())]
    Walk { path: PathBuf, source: walkdir::Error },
}

impl ExtractError {
    /// Short name of the failing step, used in summaries and log fields.
    pub fn step(&self) -> &'static str {
        match self {
            ExtractError::Open { .. } => "open",
            ExtractError::HeaderSkip { .. } => "header-skip",
            ExtractError::MetadataRead { .. } => "metadata-read",
            ExtractError::BodySeek { .. } => "body-seek",
            ExtractError::UnsafeKey { .. } => "map-key",
            ExtractError::DirCreate { .. } => "dir-create",
            ExtractError::FileCreate { .. } => "file-create",
            ExtractError::Copy { .. } => "copy",
            ExtractError::Walk { .. } => "walk",
        }
    }
}

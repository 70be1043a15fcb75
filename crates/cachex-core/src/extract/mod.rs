//! Single-container extraction: open, decode, map the key, write the body.

mod batch;

pub use batch::{extract_all, extract_paths, ExtractEvent, ExtractionSummary};

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::CachexConfig;
use crate::container::{decode_container, ContainerLayout};
use crate::error::ExtractError;
use crate::key_path::{resolve_destination, UnusableKey};
use crate::storage::write_body;

/// Per-entry settings shared by every container of a batch.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub dest_root: PathBuf,
    pub layout: ContainerLayout,
    pub allow_parent_components: bool,
    /// Decode and map, but write nothing.
    pub dry_run: bool,
}

impl ExtractOptions {
    pub fn from_config(cfg: &CachexConfig) -> Self {
        Self {
            dest_root: cfg.dest_dir.clone(),
            layout: cfg.layout(),
            allow_parent_components: cfg.allow_parent_components,
            dry_run: false,
        }
    }
}

/// Why a container produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No key line in the metadata block; writing would target the destination root itself.
    MissingKey,
    /// The key is present but names no file below the root (`.`, `/.`).
    NoFileName { key: String },
    /// Dry run: this is where the body would have gone.
    DryRun { key: String, destination: PathBuf },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingKey => write!(f, "no key in metadata"),
            SkipReason::NoFileName { key } => write!(f, "key {:?} names no file", key),
            SkipReason::DryRun { key, destination } => {
                write!(f, "dry run: {} -> {}", key, destination.display())
            }
        }
    }
}

/// Successful result of [`extract_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Written {
        source: PathBuf,
        key: String,
        destination: PathBuf,
        bytes: u64,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
}

/// Extract the body of one container file into the destination tree.
///
/// The container is opened once and closed on every return path.
pub fn extract_entry(source: &Path, opts: &ExtractOptions) -> Result<EntryOutcome, ExtractError> {
    let mut file = File::open(source).map_err(|e| ExtractError::Open {
        path: source.to_path_buf(),
        source: e,
    })?;

    let entry = decode_container(&mut file, source, &opts.layout)?;
    tracing::debug!(
        path = %source.display(),
        key = %entry.key,
        body_offset = entry.body_offset,
        "decoded container"
    );

    if entry.key.is_empty() {
        tracing::warn!(path = %source.display(), "no key line, skipping");
        return Ok(EntryOutcome::Skipped {
            source: source.to_path_buf(),
            reason: SkipReason::MissingKey,
        });
    }

    let destination = match resolve_destination(&opts.dest_root, &entry.key, opts.allow_parent_components) {
        Ok(destination) => destination,
        Err(UnusableKey::ClimbsOut) => {
            return Err(ExtractError::UnsafeKey {
                path: source.to_path_buf(),
                key: entry.key,
            })
        }
        Err(UnusableKey::NoFileName) => {
            tracing::warn!(path = %source.display(), key = %entry.key, "key names no file, skipping");
            return Ok(EntryOutcome::Skipped {
                source: source.to_path_buf(),
                reason: SkipReason::NoFileName { key: entry.key },
            });
        }
    };

    if opts.dry_run {
        return Ok(EntryOutcome::Skipped {
            source: source.to_path_buf(),
            reason: SkipReason::DryRun {
                key: entry.key,
                destination,
            },
        });
    }

    let bytes = write_body(&destination, &mut file)?;
    tracing::info!(
        path = %source.display(),
        dest = %destination.display(),
        bytes,
        "extracted body"
    );

    Ok(EntryOutcome::Written {
        source: source.to_path_buf(),
        key: entry.key,
        destination,
        bytes,
    })
}

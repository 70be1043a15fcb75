//! CLI for cachex.

mod args;
mod report;

use anyhow::Result;
use clap::Parser;
use cachex_core::config::{self, CachexConfig, ErrorPolicy};
use cachex_core::container::LineEnding;
use cachex_core::extract::{extract_all, ExtractOptions};
use std::path::PathBuf;

use args::{parse_header_size, parse_line_ending};

/// Extract cached response bodies from a proxy cache directory into a file tree.
#[derive(Debug, Parser)]
#[command(name = "cachex")]
#[command(about = "cachex: rebuild a file tree from proxy cache containers", long_about = None)]
pub struct Cli {
    /// Cache directory to walk (default ./input, or `source_dir` from config.toml).
    #[arg(long, visible_alias = "basedir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Root of the extracted tree (default ./output, or `dest_dir` from config.toml).
    #[arg(long, visible_alias = "destdir", value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Size of the binary header before the metadata block, decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_header_size, value_name = "BYTES")]
    pub header_size: Option<u64>,

    /// Prefix of the metadata line holding the cache key.
    #[arg(long, value_name = "PREFIX")]
    pub key_marker: Option<String>,

    /// Line terminator accounting for the body offset: measured, lf or crlf.
    #[arg(long, value_parser = parse_line_ending, value_name = "MODE")]
    pub line_ending: Option<LineEnding>,

    /// Stop at the first container that fails instead of reporting it and continuing.
    #[arg(long)]
    pub fail_fast: bool,

    /// Decode every container and print where it would go, without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Follow `..` components in keys. Only use on caches you trust.
    #[arg(long)]
    pub allow_parent_components: bool,

    /// Ignore ~/.config/cachex/config.toml and use built-in defaults.
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `cfg`.
    pub fn merge_into(&self, mut cfg: CachexConfig) -> CachexConfig {
        if let Some(dir) = &self.source_dir {
            cfg.source_dir = dir.clone();
        }
        if let Some(dir) = &self.dest_dir {
            cfg.dest_dir = dir.clone();
        }
        if let Some(size) = self.header_size {
            cfg.header_size = size;
        }
        if let Some(marker) = &self.key_marker {
            cfg.key_marker = marker.clone();
        }
        if let Some(ending) = self.line_ending {
            cfg.line_ending = ending;
        }
        if self.fail_fast {
            cfg.on_error = ErrorPolicy::Abort;
        }
        if self.allow_parent_components {
            cfg.allow_parent_components = true;
        }
        cfg
    }

    /// Parse arguments, run the extraction, and report.
    /// Returns `Ok(false)` when some containers failed under the continue policy.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let base = if cli.no_config {
            CachexConfig::default()
        } else {
            config::load()?
        };
        let cfg = cli.merge_into(base);
        tracing::debug!("effective config: {:?}", cfg);

        let mut opts = ExtractOptions::from_config(&cfg);
        opts.dry_run = cli.dry_run;

        let summary = extract_all(&cfg.source_dir, &opts, cfg.on_error, report::print_event)?;
        report::print_summary(&summary);
        Ok(summary.is_success())
    }
}

#[cfg(test)]
mod tests;

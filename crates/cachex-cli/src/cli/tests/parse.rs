//! Tests for flag parsing.

use super::parse;
use crate::cli::Cli;
use cachex_core::container::LineEnding;
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_no_args() {
    let cli = parse(&["cachex"]);
    assert!(cli.source_dir.is_none());
    assert!(cli.dest_dir.is_none());
    assert!(cli.header_size.is_none());
    assert!(!cli.fail_fast);
    assert!(!cli.dry_run);
}

#[test]
fn cli_parse_dirs() {
    let cli = parse(&["cachex", "--source-dir", "/var/cache/nginx", "--dest-dir", "/tmp/site"]);
    assert_eq!(cli.source_dir.as_deref(), Some(Path::new("/var/cache/nginx")));
    assert_eq!(cli.dest_dir.as_deref(), Some(Path::new("/tmp/site")));
}

#[test]
fn cli_parse_legacy_dir_aliases() {
    let cli = parse(&["cachex", "--basedir", "in", "--destdir", "out"]);
    assert_eq!(cli.source_dir.as_deref(), Some(Path::new("in")));
    assert_eq!(cli.dest_dir.as_deref(), Some(Path::new("out")));
}

#[test]
fn cli_parse_header_size_hex_and_decimal() {
    assert_eq!(parse(&["cachex", "--header-size", "0x90"]).header_size, Some(0x90));
    assert_eq!(parse(&["cachex", "--header-size", "336"]).header_size, Some(336));
}

#[test]
fn cli_parse_header_size_rejects_garbage() {
    assert!(Cli::try_parse_from(["cachex", "--header-size", "0xZZ"]).is_err());
    assert!(Cli::try_parse_from(["cachex", "--header-size", "-1"]).is_err());
}

#[test]
fn cli_parse_line_ending() {
    assert_eq!(
        parse(&["cachex", "--line-ending", "crlf"]).line_ending,
        Some(LineEnding::Crlf)
    );
    assert!(Cli::try_parse_from(["cachex", "--line-ending", "cr"]).is_err());
}

#[test]
fn cli_parse_switches() {
    let cli = parse(&[
        "cachex",
        "--fail-fast",
        "--dry-run",
        "--allow-parent-components",
        "--no-config",
        "--key-marker",
        "K=",
    ]);
    assert!(cli.fail_fast);
    assert!(cli.dry_run);
    assert!(cli.allow_parent_components);
    assert!(cli.no_config);
    assert_eq!(cli.key_marker.as_deref(), Some("K="));
}

//! Sequential batch driver over a whole cache directory.

use std::path::{Path, PathBuf};

use super::{extract_entry, EntryOutcome, ExtractOptions};
use crate::config::ErrorPolicy;
use crate::error::ExtractError;
use crate::walker::container_files;

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum ExtractEvent<'a> {
    /// About to decode this container.
    Visiting(&'a Path),
    Finished(&'a EntryOutcome),
    Failed(&'a ExtractError),
}

/// Totals for one batch run.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub visited: usize,
    pub written: usize,
    pub skipped: usize,
    pub bytes_written: u64,
    /// Failures recorded under [`ErrorPolicy::Continue`].
    pub failures: Vec<ExtractError>,
}

impl ExtractionSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Written { bytes, .. } => {
                self.written += 1;
                self.bytes_written += bytes;
            }
            EntryOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Extract every container under `source_root`, one at a time.
///
/// Under [`ErrorPolicy::Abort`] the first failure (walk or per-file) is
/// returned as `Err`; under [`ErrorPolicy::Continue`] failures are collected
/// in the summary and the walk carries on.
pub fn extract_all<F>(
    source_root: &Path,
    opts: &ExtractOptions,
    policy: ErrorPolicy,
    mut on_event: F,
) -> Result<ExtractionSummary, ExtractError>
where
    F: FnMut(ExtractEvent<'_>),
{
    tracing::info!(
        source = %source_root.display(),
        dest = %opts.dest_root.display(),
        dry_run = opts.dry_run,
        "starting extraction"
    );
    extract_paths(container_files(source_root), opts, policy, on_event)
}

/// Extract every container yielded by `paths`, applying `policy` to both
/// walk failures and per-file failures.
pub fn extract_paths<I, F>(
    paths: I,
    opts: &ExtractOptions,
    policy: ErrorPolicy,
    mut on_event: F,
) -> Result<ExtractionSummary, ExtractError>
where
    I: IntoIterator<Item = Result<PathBuf, ExtractError>>,
    F: FnMut(ExtractEvent<'_>),
{
    let mut summary = ExtractionSummary::default();

    for item in paths {
        let result = item.and_then(|path| {
            summary.visited += 1;
            tracing::debug!(path = %path.display(), "visiting");
            on_event(ExtractEvent::Visiting(&path));
            extract_entry(&path, opts)
        });

        match result {
            Ok(outcome) => {
                summary.record(&outcome);
                on_event(ExtractEvent::Finished(&outcome));
            }
            Err(err) => {
                tracing::error!(step = err.step(), "{}", err);
                on_event(ExtractEvent::Failed(&err));
                match policy {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Continue => summary.failures.push(err),
                }
            }
        }
    }

    tracing::info!(
        visited = summary.visited,
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failures.len(),
        bytes = summary.bytes_written,
        "extraction finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerLayout, LineEnding};
    use std::fs;

    fn opts(dest: &Path) -> ExtractOptions {
        ExtractOptions {
            dest_root: dest.to_path_buf(),
            layout: ContainerLayout {
                header_size: 4,
                key_marker: "KEY: ".to_string(),
                line_ending: LineEnding::Lf,
            },
            allow_parent_components: false,
            dry_run: false,
        }
    }

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/1"), b"HDR!KEY: one.txt\n\nONE").unwrap();
        fs::write(root.join("b"), b"HD").unwrap();
        fs::write(root.join("c"), b"HDR!KEY: dir/\n\nINDEX").unwrap();
    }

    #[test]
    fn continue_policy_collects_failures() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        seed(src.path());

        let mut visited: Vec<PathBuf> = Vec::new();
        let summary = extract_all(src.path(), &opts(dst.path()), ErrorPolicy::Continue, |ev| {
            if let ExtractEvent::Visiting(p) = ev {
                visited.push(p.to_path_buf());
            }
        })
        .unwrap();

        assert_eq!(visited.len(), 3);
        assert_eq!(summary.visited, 3);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.bytes_written, 8);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].step(), "header-skip");
        assert!(!summary.is_success());
        assert_eq!(fs::read(dst.path().join("one.txt")).unwrap(), b"ONE");
        assert_eq!(fs::read(dst.path().join("dir/__index.html")).unwrap(), b"INDEX");
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        seed(src.path());

        let err = extract_all(src.path(), &opts(dst.path()), ErrorPolicy::Abort, |_| {}).unwrap_err();
        assert_eq!(err.step(), "header-skip");
        // "a/1" sorts before "b" and was written; "c" was never reached.
        assert!(dst.path().join("one.txt").exists());
        assert!(!dst.path().join("dir").exists());
    }

    #[test]
    fn empty_source_is_success() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let summary = extract_all(src.path(), &opts(dst.path()), ErrorPolicy::Abort, |_| {}).unwrap();
        assert_eq!(summary.visited, 0);
        assert!(summary.is_success());
    }

    fn walk_error(dir: &Path) -> ExtractError {
        container_files(&dir.join("vanished"))
            .next()
            .unwrap()
            .unwrap_err()
    }

    #[test]
    fn walk_error_mid_batch_is_recorded_and_siblings_extracted() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("1"), b"HDR!KEY: before\n\nB").unwrap();
        fs::write(src.path().join("2"), b"HDR!KEY: after\n\nA").unwrap();
        let paths = vec![
            Ok(src.path().join("1")),
            Err(walk_error(src.path())),
            Ok(src.path().join("2")),
        ];

        let mut failed_steps = Vec::new();
        let summary = extract_paths(paths, &opts(dst.path()), ErrorPolicy::Continue, |ev| {
            if let ExtractEvent::Failed(err) = ev {
                failed_steps.push(err.step());
            }
        })
        .unwrap();

        assert_eq!(failed_steps, vec!["walk"]);
        assert_eq!(summary.visited, 2);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].step(), "walk");
        assert_eq!(fs::read(dst.path().join("before")).unwrap(), b"B");
        assert_eq!(fs::read(dst.path().join("after")).unwrap(), b"A");
    }

    #[test]
    fn walk_error_aborts_under_abort_policy() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("2"), b"HDR!KEY: after\n\nA").unwrap();
        let paths = vec![Err(walk_error(src.path())), Ok(src.path().join("2"))];

        let err = extract_paths(paths, &opts(dst.path()), ErrorPolicy::Abort, |_| {}).unwrap_err();
        assert_eq!(err.step(), "walk");
        assert!(!dst.path().join("after").exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_does_not_stop_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let locked = src.path().join("b-locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("hidden"), b"HDR!KEY: hidden\n\nH").unwrap();
        fs::write(src.path().join("a"), b"HDR!KEY: first\n\n1").unwrap();
        fs::write(src.path().join("c"), b"HDR!KEY: last\n\n3").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory; nothing to observe then.
        let still_readable = fs::read_dir(&locked).is_ok();
        let summary = extract_all(src.path(), &opts(dst.path()), ErrorPolicy::Continue, |_| {});
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let summary = summary.unwrap();

        assert_eq!(fs::read(dst.path().join("first")).unwrap(), b"1");
        assert_eq!(fs::read(dst.path().join("last")).unwrap(), b"3");
        if !still_readable {
            assert_eq!(summary.failures.len(), 1);
            assert_eq!(summary.failures[0].step(), "walk");
            assert_eq!(summary.written, 2);
        }
    }
}

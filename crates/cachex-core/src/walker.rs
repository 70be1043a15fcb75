//! Recursive discovery of container files under the cache root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ExtractError;

/// Lazily yield every regular file under `root`, depth first, in file name order.
///
/// Symlinks are not followed and are skipped along with other non-regular
/// entries. Traversal failures are yielded as [`ExtractError::Walk`] so the
/// caller decides whether to keep going.
pub fn container_files(root: &Path) -> impl Iterator<Item = Result<PathBuf, ExtractError>> {
    let root_buf = root.to_path_buf();
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(source) => Some(Err(ExtractError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_buf.clone()),
                source,
            })),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_nested_regular_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("1/af")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("top"), b"x").unwrap();
        fs::write(root.join("1/af/deadbeef"), b"x").unwrap();

        let files: Vec<PathBuf> = container_files(root).collect::<Result<_, _>>().unwrap();
        assert_eq!(files, vec![root.join("1/af/deadbeef"), root.join("top")]);
    }

    #[cfg(unix)]
    #[test]
    fn skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("real"), b"x").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let files: Vec<PathBuf> = container_files(root).collect::<Result<_, _>>().unwrap();
        assert_eq!(files, vec![root.join("real")]);
    }

    #[test]
    fn missing_root_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let results: Vec<_> = container_files(&missing).collect();
        assert_eq!(results.len(), 1);
        let err = results.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.step(), "walk");
    }
}

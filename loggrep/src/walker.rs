use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// Resolves the set of files to scan for a search rooted at `path`.
///
/// - A regular file yields a single-element list.
/// - A directory yields its regular-file children; with `recursive` the
///   whole tree is descended. Hidden files and ignore files (.gitignore
///   and friends) are NOT honored: this tool scans log trees, so every
///   regular file is a candidate.
/// - Anything else fails with [`SearchError::FileNotFound`], which callers
///   treat as "no files to search" rather than a fatal condition.
///
/// Symlinks are not followed during descent; non-regular entries
/// (subdirectories in non-recursive mode, devices, pipes) are skipped
/// silently. The returned list is sorted lexicographically by path string
/// and deduplicated, so scan order and therefore output order is
/// deterministic.
pub fn discover_files(path: &Path, recursive: bool) -> SearchResult<Vec<PathBuf>> {
    if path.is_file() {
        debug!("Path is a regular file: {}", path.display());
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(SearchError::file_not_found(path));
    }

    debug!(
        "Path is a directory: {} (recursive: {})",
        path.display(),
        recursive
    );

    let mut walker = WalkBuilder::new(path);
    walker.standard_filters(false).follow_links(false);
    if !recursive {
        walker.max_depth(Some(1));
    }

    let mut files: Vec<PathBuf> = walker
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort_unstable_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();

    debug!("Found {} files to search", files.len());
    Ok(files)
}

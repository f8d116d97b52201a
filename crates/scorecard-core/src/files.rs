//! Filesystem helpers used by the evaluator
//!
//! All enumeration goes through [`enumerate_files`], which returns paths in a
//! stable order so that concatenated contents and counts never depend on the
//! order in which the OS lists directory entries.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScorecardError};
use crate::rubric::FileSet;

/// Enumerate every regular file at or below `root` accepted by `predicate`.
///
/// `root` may itself be a file. Symlinks are not followed and unreadable
/// entries are skipped. The result is sorted.
pub fn enumerate_files<P>(root: &Path, predicate: P) -> Vec<PathBuf>
where
    P: Fn(&Path) -> bool,
{
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| predicate(path.as_path()))
        .collect();
    files.sort();
    files
}

/// True when the file name ends with one of `extensions` (or the list is empty)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext.as_str())))
}

/// Resolve a file set relative to the evaluation root
pub fn resolve_file_set(root: &Path, files: &FileSet) -> Vec<PathBuf> {
    let base = root.join(files.base());
    if !base.exists() {
        return Vec::new();
    }
    let extensions = files.extensions();
    enumerate_files(&base, |path| has_extension(path, extensions))
}

/// Read a file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ScorecardError::file_read(path, e))
}

/// Concatenate the text of `paths`, joined with newlines.
///
/// Files that cannot be read are skipped and contribute nothing.
pub fn read_concatenated(paths: &[PathBuf]) -> String {
    let mut contents = Vec::with_capacity(paths.len());
    for path in paths {
        match read_text(path) {
            Ok(text) => contents.push(text),
            Err(e) => tracing::debug!(error = %e, "skipping file in content scan"),
        }
    }
    contents.join("\n")
}

/// Path of `path` relative to `root`, with forward slashes
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

//! File statistics for evaluation reports

use std::path::Path;

use crate::files::{enumerate_files, has_extension, relative_display};
use crate::report::{FileStats, GroupCount};
use crate::rubric::{FileGroup, FileStatsConfig};

/// Count files below `config.dir` and in each configured group.
///
/// A missing directory yields zero counts; groups are always listed.
pub fn collect_file_stats(root: &Path, config: &FileStatsConfig) -> FileStats {
    let base = root.join(&config.dir);
    let files = if base.is_dir() {
        enumerate_files(&base, |_| true)
    } else {
        Vec::new()
    };

    let relative: Vec<String> = files.iter().map(|p| relative_display(root, p)).collect();
    let files_by_extension_group = config
        .groups
        .iter()
        .map(|group| GroupCount {
            name: group.name.clone(),
            count: files
                .iter()
                .zip(&relative)
                .filter(|(path, rel)| in_group(group, path, rel))
                .count(),
        })
        .collect();

    FileStats {
        total_files: files.len(),
        files_by_extension_group,
    }
}

fn in_group(group: &FileGroup, path: &Path, relative: &str) -> bool {
    has_extension(path, &group.extensions)
        && (group.path_contains.is_empty()
            || group
                .path_contains
                .iter()
                .any(|needle| relative.contains(needle.as_str())))
}

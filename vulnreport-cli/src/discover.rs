//! Scan file discovery
//!
//! Walks a directory tree looking for files whose names match the
//! configured scan filenames. Unreadable directories are skipped with
//! a debug log rather than aborting the walk.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Recursively collect scan result files under `root`.
///
/// Matching is by exact file name against `filenames`. The result is
/// sorted by full path so repeated runs visit files in the same order.
pub fn discover_scan_files(root: &Path, filenames: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, filenames, &mut found);
    found.sort();
    found
}

fn walk(dir: &Path, filenames: &[String], found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(path = %dir.display(), %error, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        if path.is_dir() {
            walk(&path, filenames, found);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if filenames.iter().any(|f| f == name) {
                found.push(path);
            }
        }
    }
}

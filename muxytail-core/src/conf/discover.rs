use crate::conf::error::ConfigError;
use glob::glob;
use std::path::{Path, PathBuf};

/// Discovers files matching a glob pattern.
///
/// Searches the filesystem for all regular files that match the given glob
/// pattern and returns their paths in sorted order. Unreadable entries are
/// silently filtered out.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if the pattern is malformed.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let pattern = &resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| ConfigError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Expands every configured pattern, keeping configuration order.
///
/// Each pattern must match at least one file. A file matched by several
/// patterns is followed once, at its first position.
pub fn discover_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let matched = discover(root, pattern)?;
        if matched.is_empty() {
            return Err(ConfigError::NoMatch {
                pattern: resolve_glob(root, pattern),
            });
        }

        for path in matched {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Joins `pattern` to `root`. Absolute patterns are returned unchanged.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    root.join(pattern).to_string_lossy().into_owned()
}

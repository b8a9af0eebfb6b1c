//! Discovery of the `statrun.yaml` configuration file.
//!
//! An explicit `--config` path (or `STATRUN_CONFIG`) always wins; otherwise
//! the directory tree is walked upwards from the working directory.

use std::path::{Path, PathBuf};

/// The name of the configuration file looked for during discovery.
pub const CONFIG_FILE_NAME: &str = "statrun.yaml";

/// Walk up the directory tree from `start` looking for `statrun.yaml`.
///
/// Returns `None` if the filesystem root is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use statrun_config::config_file::find_config_file;
/// use std::path::Path;
///
/// if let Some(path) = find_config_file(Path::new(".")) {
///     println!("Using config at {}", path.display());
/// }
/// ```
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return None,
        }
    }
}

/// Pick the configuration file to load: `explicit` when given, else the
/// result of [`find_config_file`] from `start`.
pub fn resolve_config_file(explicit: Option<&Path>, start: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config, "").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        // Canonicalize both for comparison (handles /tmp vs /private/tmp).
        assert_eq!(found.canonicalize().unwrap(), config.canonicalize().unwrap());
    }

    #[test]
    fn test_find_config_from_child() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config, "").unwrap();

        let child = dir.path().join("a").join("b");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_config_file(&child).unwrap();
        assert_eq!(found.canonicalize().unwrap(), config.canonicalize().unwrap());
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("inner");
        std::fs::create_dir_all(inner.join(CONFIG_FILE_NAME)).unwrap();

        // A parent might hold a real statrun.yaml, so only the decoy is checked.
        let found = find_config_file(&inner);
        assert_ne!(found, Some(inner.canonicalize().unwrap().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_missing_start_dir() {
        assert_eq!(find_config_file(Path::new("/nonexistent/start/dir")), None);
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let explicit = Path::new("/elsewhere/custom.yaml");
        assert_eq!(
            resolve_config_file(Some(explicit), dir.path()),
            Some(explicit.to_path_buf())
        );
    }
}

//! Atomic file replacement
//!
//! Bytes are written into a scratch directory created beside the target and
//! then renamed over it, so readers see either the old file or the new one.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Prefix of the scratch directories created beside the target
pub const SCRATCH_PREFIX: &str = ".sceneloc-export-";

/// Replace `final_path` with `bytes` in one step.
///
/// On failure the scratch directory is removed and `final_path` is left
/// as it was.
///
/// # Errors
/// Returns [`Error::Persistence`] if the scratch file cannot be written or
/// the rename fails.
pub fn persist(bytes: &[u8], final_path: &Path) -> Result<()> {
    let persistence = |source| Error::Persistence {
        path: final_path.to_path_buf(),
        source,
    };

    let parent = match final_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(parent)
        .map_err(persistence)?;

    let file_name = final_path.file_name().unwrap_or(final_path.as_os_str());
    let staged = scratch.path().join(file_name);

    tracing::debug!("Staging {} bytes at {}", bytes.len(), staged.display());

    let mut file = File::create(&staged).map_err(persistence)?;
    file.write_all(bytes).map_err(persistence)?;
    file.sync_all().map_err(persistence)?;
    drop(file);

    fs::rename(&staged, final_path).map_err(persistence)?;

    if let Err(e) = scratch.close() {
        tracing::warn!("Failed to remove scratch directory: {}", e);
    }

    tracing::info!("Wrote {} ({} bytes)", final_path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_dirs(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(SCRATCH_PREFIX))
            .collect()
    }

    #[test]
    fn test_persist_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("level0.assets");
        fs::write(&target, b"old contents").unwrap();

        persist(b"new", &target).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(scratch_dirs(dir.path()).is_empty());
    }

    #[test]
    fn test_persist_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("dialogue.assets.json");

        persist(b"{}", &target).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{}");
    }

    #[test]
    fn test_failed_rename_leaves_target_and_no_scratch() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), b"keep").unwrap();

        let err = persist(b"new", &target).unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(fs::read(target.join("keep.txt")).unwrap(), b"keep");
        assert!(scratch_dirs(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_parent_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("file.assets");

        let err = persist(b"new", &target).unwrap_err();
        assert_eq!(err.kind(), "persistence");
        assert!(!target.exists());
    }
}

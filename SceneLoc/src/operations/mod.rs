//! High-level read and write pipelines
//!
//! These tie the container, cipher, entry codec and dialogue model
//! together. The `*_file` functions work on a container path; the others
//! work on any [`AssetContainer`](crate::container::AssetContainer).

mod read;
mod write;

pub use read::{extract_dialogue, read_dialogue_file};
pub use write::{apply_dialogue, write_dialogue_file};

use std::path::Path;

use crate::error::{Error, Result};

/// Result of a write invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The container was replaced
    Written {
        /// Number of scenes whose entries changed
        scenes: usize,
    },
    /// No scene changed and the container was not touched
    NoChanges,
}

impl WriteOutcome {
    /// Value of the `result` field reported to the caller.
    #[must_use]
    pub fn result_label(&self) -> &'static str {
        match self {
            WriteOutcome::Written { .. } => "ok",
            WriteOutcome::NoChanges => "no_changes",
        }
    }
}

/// Fail with [`Error::NotFound`] unless `path` is an existing file.
///
/// # Errors
/// Returns [`Error::NotFound`] for a missing path or a directory.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::NotFound {
            path: path.to_path_buf(),
        })
    }
}

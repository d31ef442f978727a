//! Applying dialogue edits to a scene's persisted entries

use super::types::SceneEntries;
use crate::formats::entries::EntryList;

/// Apply `updates` onto the entries currently stored in a scene.
///
/// Output has exactly the names of `existing`, in the same order. Updates
/// for names the scene does not contain are ignored; entries without an
/// update keep their content.
#[must_use]
pub fn merge_scene(existing: &EntryList, updates: &SceneEntries) -> EntryList {
    let mut merged = existing.clone();

    for (name, record) in updates {
        if !merged.set_content(name, record.effective_content()) {
            tracing::debug!("Ignoring update for unknown entry '{}'", name);
        }
    }

    merged
}

//! Read path: container to Dialogue Data

use std::path::Path;

use super::ensure_exists;
use crate::container::AssetContainer;
use crate::dialog::{ContentRecord, DialogueData, Language, SceneEntries};
use crate::error::Result;
use crate::formats::assets::SerializedFile;
use crate::formats::entries::parse_entries;
use crate::formats::envelope::ScriptCipher;

/// Extract every scene of `language` from a container.
///
/// Each entry is reported with its current content as `originalContent`.
///
/// # Errors
/// Returns an error if the container cannot be read or any scene fails to
/// decrypt. A single bad scene fails the whole extraction.
pub fn extract_dialogue<C: AssetContainer + ?Sized>(
    container: &C,
    language: Language,
    cipher: &ScriptCipher,
) -> Result<DialogueData> {
    let mut data = DialogueData::new();

    for asset in container.text_assets()? {
        if !asset.name.starts_with(language.prefix()) {
            continue;
        }

        let plaintext = cipher.decrypt(&asset.script)?;
        let entries = parse_entries(&plaintext);
        tracing::debug!("Scene {}: {} entries", asset.name, entries.len());

        let scene: SceneEntries = entries
            .iter()
            .map(|(name, content)| (name.clone(), ContentRecord::original(content.as_str())))
            .collect();

        if data.insert_scene(asset.name.clone(), scene).is_some() {
            tracing::warn!("Duplicate scene '{}', keeping the later one", asset.name);
        }
    }

    Ok(data)
}

/// Open a container file and extract the scenes of `language`.
///
/// # Errors
/// Returns [`crate::Error::NotFound`] if `path` does not exist, or any
/// container or decode error.
pub fn read_dialogue_file(path: &Path, language: Language) -> Result<DialogueData> {
    ensure_exists(path)?;

    tracing::info!("Reading {} scenes from {}", language, path.display());
    let file = SerializedFile::open(path)?;
    let data = extract_dialogue(&file, language, &ScriptCipher::default())?;
    tracing::info!("Found {} scene(s), {} entries", data.len(), data.entry_count());

    Ok(data)
}

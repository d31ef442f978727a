//! Write path: Dialogue Data back into a container

use std::collections::HashSet;
use std::path::Path;

use super::{WriteOutcome, ensure_exists};
use crate::container::AssetContainer;
use crate::dialog::{DialogueData, Language, merge_scene, transform_keys};
use crate::error::Result;
use crate::formats::assets::SerializedFile;
use crate::formats::entries::{parse_entries, render_entries};
use crate::formats::envelope::ScriptCipher;
use crate::utils::persist;

/// Merge `data` into the matching scenes of a container.
///
/// Scene names are matched as given; remap them with
/// [`transform_keys`] first if needed. Only scenes whose entries actually
/// change are re-encrypted and replaced.
///
/// Returns the number of scenes replaced.
///
/// # Errors
/// Returns an error if a matched scene fails to decrypt or the container
/// rejects a replacement. Nothing is written in that case.
pub fn apply_dialogue<C: AssetContainer + ?Sized>(
    container: &mut C,
    data: &DialogueData,
    cipher: &ScriptCipher,
) -> Result<usize> {
    let mut changed = 0;
    let mut seen = HashSet::new();

    for asset in container.text_assets()? {
        let Some(updates) = data.scene(&asset.name) else {
            continue;
        };
        seen.insert(asset.name.clone());

        let existing = parse_entries(&cipher.decrypt(&asset.script)?);
        let merged = merge_scene(&existing, updates);

        if merged == existing {
            tracing::debug!("Scene {} unchanged", asset.name);
            continue;
        }

        let envelope = cipher.encrypt(&render_entries(&merged));
        container.replace_script(asset.path_id, envelope.as_bytes())?;
        tracing::debug!("Scene {} updated", asset.name);
        changed += 1;
    }

    for name in data.scene_names().filter(|name| !seen.contains(*name)) {
        tracing::warn!("Scene '{}' not found in container, skipping", name);
    }

    Ok(changed)
}

/// Write `data` into the container at `path` as `language` scenes.
///
/// The container is replaced atomically, and only when at least one scene
/// changed.
///
/// # Errors
/// Returns [`crate::Error::NotFound`] if `path` does not exist,
/// [`crate::Error::UnrecognizedLanguage`] if the scene names carry no known
/// prefix, or any decode, container or persistence error.
pub fn write_dialogue_file(path: &Path, data: DialogueData, language: Language) -> Result<WriteOutcome> {
    ensure_exists(path)?;

    let data = transform_keys(data, language)?;
    tracing::info!("Writing {} scene(s) into {}", data.len(), path.display());

    let mut file = SerializedFile::open(path)?;
    let scenes = apply_dialogue(&mut file, &data, &ScriptCipher::default())?;

    if scenes == 0 {
        tracing::info!("No scenes changed, leaving {} untouched", path.display());
        return Ok(WriteOutcome::NoChanges);
    }

    persist(&file.to_bytes()?, path)?;
    tracing::info!("Updated {} scene(s)", scenes);

    Ok(WriteOutcome::Written { scenes })
}

//! Scene-name language remapping
//!
//! Dialogue edited against one language's scenes (`EN_Town`) can be written
//! into the other language's scenes (`ZH_Town`) by swapping the prefix.

use super::types::{DialogueData, Language};
use crate::error::{Error, Result};

/// Detect the language of a document from its first scene name.
///
/// # Errors
/// Returns [`Error::UnrecognizedLanguage`] if there are no scenes or the
/// first scene has neither recognized prefix.
pub fn detect_language(data: &DialogueData) -> Result<Language> {
    let first = data
        .first_scene_name()
        .ok_or(Error::UnrecognizedLanguage { scene: None })?;
    Language::from_scene_name(first).ok_or_else(|| Error::UnrecognizedLanguage {
        scene: Some(first.to_string()),
    })
}

/// Rename scenes so their prefix names `target`.
///
/// Only the leading prefix of each scene name is replaced; entries and
/// content are never touched. Scene names that do not carry the source
/// prefix are left as they are.
///
/// # Errors
/// Returns [`Error::UnrecognizedLanguage`] when the source language cannot
/// be detected.
pub fn transform_keys(data: DialogueData, target: Language) -> Result<DialogueData> {
    let source = detect_language(&data)?;
    if source == target {
        return Ok(data);
    }

    tracing::debug!("Remapping {} scene(s) from {} to {}", data.len(), source, target);

    Ok(data
        .into_iter()
        .map(|(name, entries)| {
            let renamed = match name.strip_prefix(source.prefix()) {
                Some(rest) => format!("{}{rest}", target.prefix()),
                None => {
                    tracing::warn!("Scene '{}' lacks the {} prefix, keeping its name", name, source);
                    name
                }
            };
            (renamed, entries)
        })
        .collect())
}

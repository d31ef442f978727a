//! Dialogue data types
//!
//! `DialogueData` is the document exchanged with the host application:
//!
//! ```json
//! { "EN_Town": { "Greeting": { "originalContent": "Hi", "editedContent": "Hello" } } }
//! ```
//!
//! Scene and entry order follow the document (and, on read, the container).

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dialogue language, identified by the scene-name prefix `EN_` / `ZH_`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// Every recognized language.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// Two-letter code used on the command line and in prefixes.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Zh => "ZH",
        }
    }

    /// Scene-name prefix, code followed by `_`.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Language::En => "EN_",
            Language::Zh => "ZH_",
        }
    }

    /// Language whose prefix starts `scene_name`, if any.
    #[must_use]
    pub fn from_scene_name(scene_name: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|lang| scene_name.starts_with(lang.prefix()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EN" => Ok(Language::En),
            "ZH" => Ok(Language::Zh),
            _ => Err(format!("Invalid language '{s}'. Valid values: EN, ZH")),
        }
    }
}

/// Original and edited text of one entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentRecord {
    /// Content as extracted from the container
    #[serde(default)]
    pub original_content: String,
    /// Replacement supplied by the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
}

impl ContentRecord {
    /// Record for freshly extracted content.
    #[must_use]
    pub fn original(content: impl Into<String>) -> Self {
        Self {
            original_content: content.into(),
            edited_content: None,
        }
    }

    /// Record carrying an edit.
    #[must_use]
    pub fn edited(original: impl Into<String>, edited: impl Into<String>) -> Self {
        Self {
            original_content: original.into(),
            edited_content: Some(edited.into()),
        }
    }

    /// Text to write back: a non-empty edit, else the original (possibly empty).
    #[must_use]
    pub fn effective_content(&self) -> &str {
        match self.edited_content.as_deref() {
            Some(edited) if !edited.is_empty() => edited,
            _ => &self.original_content,
        }
    }
}

/// Entries of one scene, keyed by entry name
pub type SceneEntries = IndexMap<String, ContentRecord>;

/// Scenes keyed by scene name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueData {
    scenes: IndexMap<String, SceneEntries>,
}

impl DialogueData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a document from the input channel.
    ///
    /// Blank input is an empty document.
    ///
    /// # Errors
    /// Returns [`Error::MalformedInput`] if the text is not JSON of the expected shape.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))
    }

    /// Compact single-line JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for files meant to be edited by hand.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert a scene, replacing any scene with the same name in place.
    pub fn insert_scene(&mut self, name: impl Into<String>, entries: SceneEntries) -> Option<SceneEntries> {
        self.scenes.insert(name.into(), entries)
    }

    #[must_use]
    pub fn scene(&self, name: &str) -> Option<&SceneEntries> {
        self.scenes.get(name)
    }

    /// Name of the first scene in document order.
    #[must_use]
    pub fn first_scene_name(&self) -> Option<&str> {
        self.scenes.keys().next().map(String::as_str)
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, SceneEntries> {
        self.scenes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Total number of entries across all scenes.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.scenes.values().map(IndexMap::len).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, SceneEntries)> for DialogueData {
    fn from_iter<I: IntoIterator<Item = (S, SceneEntries)>>(iter: I) -> Self {
        Self {
            scenes: iter.into_iter().map(|(name, entries)| (name.into(), entries)).collect(),
        }
    }
}

impl IntoIterator for DialogueData {
    type Item = (String, SceneEntries);
    type IntoIter = indexmap::map::IntoIter<String, SceneEntries>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.into_iter()
    }
}

impl<'a> IntoIterator for &'a DialogueData {
    type Item = (&'a String, &'a SceneEntries);
    type IntoIter = Iter<'a, String, SceneEntries>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

//! Dialogue data model
//!
//! This module holds the document exchanged with the editor and the two
//! transforms applied to it on the write path:
//!
//! - [`transform_keys`] renames scenes to the target language
//! - [`merge_scene`] applies a scene's edits onto its stored entries
//!
//! # Usage
//!
//! ```
//! use sceneloc::dialog::{DialogueData, Language, transform_keys};
//!
//! let data = DialogueData::from_json(r#"{"EN_Town":{"A":{"originalContent":"hi"}}}"#)?;
//! let data = transform_keys(data, Language::Zh)?;
//! assert!(data.scene("ZH_Town").is_some());
//! # Ok::<(), sceneloc::Error>(())
//! ```

mod language;
mod merge;
mod types;

pub use language::{detect_language, transform_keys};
pub use merge::merge_scene;
pub use types::{ContentRecord, DialogueData, Language, SceneEntries};

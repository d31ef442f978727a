//! # SceneLoc
//!
//! Read and write the localized scene dialogue stored in Unity `*.assets` files.
//!
//! Each scene is a `TextAsset` named with a language prefix (`EN_Town`,
//! `ZH_Town`) whose script is an encrypted list of named entries. This crate
//! decrypts those scripts into a JSON-friendly [`DialogueData`] document and
//! merges edited documents back, replacing the container atomically.
//!
//! ## Quick Start
//!
//! ### Reading dialogue
//!
//! ```no_run
//! use sceneloc::prelude::*;
//!
//! let data = read_dialogue_file(std::path::Path::new("level0.assets"), Language::En)?;
//! println!("{}", data.to_json()?);
//! # Ok::<(), sceneloc::Error>(())
//! ```
//!
//! ### Writing edits back
//!
//! ```no_run
//! use sceneloc::prelude::*;
//!
//! let edits = DialogueData::from_json(
//!     r#"{"EN_Town":{"Greeting":{"originalContent":"Hi","editedContent":"Hello"}}}"#,
//! )?;
//!
//! // EN edits written into the ZH scenes
//! match write_dialogue_file(std::path::Path::new("level0.assets"), edits, Language::Zh)? {
//!     WriteOutcome::Written { scenes } => println!("updated {scenes} scene(s)"),
//!     WriteOutcome::NoChanges => println!("nothing to do"),
//! }
//! # Ok::<(), sceneloc::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `sceneloc` command-line binary

pub mod container;
pub mod dialog;
pub mod error;
pub mod formats;
pub mod operations;
pub mod utils;

// Re-exports for convenience
pub use dialog::{ContentRecord, DialogueData, Language};
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::container::{AssetContainer, TextAsset};
    pub use crate::dialog::{
        ContentRecord, DialogueData, Language, SceneEntries, detect_language, merge_scene, transform_keys,
    };
    pub use crate::error::{Error, Result};
    pub use crate::formats::{EntryList, ScriptCipher, SerializedFile, parse_entries, render_entries};
    pub use crate::operations::{
        WriteOutcome, apply_dialogue, extract_dialogue, read_dialogue_file, write_dialogue_file,
    };
    pub use crate::utils::persist;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

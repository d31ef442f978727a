//! File format handlers
//!
//! - [`assets`] - Unity SerializedFile containers
//! - [`envelope`] - base64 + AES-256-ECB script envelopes
//! - [`entries`] - `<entry name="...">` lists inside decrypted scripts

pub mod assets;
pub mod entries;
pub mod envelope;

// Re-export main types
pub use assets::{ObjectInfo, SerializedFile, SerializedHeader};
pub use entries::{EntryList, parse_entries, render_entries};
pub use envelope::ScriptCipher;

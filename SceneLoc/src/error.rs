//! Error types for `SceneLoc`

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Stage of the envelope codec that rejected a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherStage {
    /// The envelope is not valid base64.
    Base64,
    /// The decoded ciphertext is not a whole number of 16-byte blocks.
    BlockLength,
    /// The trailing PKCS#7 padding is malformed.
    Padding,
    /// The unpadded plaintext is not valid UTF-8.
    Utf8,
}

impl CipherStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherStage::Base64 => "base64",
            CipherStage::BlockLength => "block length",
            CipherStage::Padding => "padding",
            CipherStage::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for CipherStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type for `SceneLoc` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The target container file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    // ==================== Payload Errors ====================
    /// An envelope could not be decrypted.
    ///
    /// `subject` is a masked view of the offending value; it never contains the key.
    #[error("decode failed at {stage} stage for {subject}: {detail}")]
    Decode {
        /// Which stage of the codec failed.
        stage: CipherStage,
        /// Masked description of the offending envelope.
        subject: String,
        /// Underlying reason reported by the stage.
        detail: String,
    },

    /// The Dialogue Data document on the input channel is not valid.
    #[error("malformed input: {message}")]
    MalformedInput {
        /// Description of what is wrong with the document.
        message: String,
    },

    /// The language of the Dialogue Data could not be determined from its scene names.
    #[error("unrecognized language prefix {}", describe_scene(scene.as_deref()))]
    UnrecognizedLanguage {
        /// The scene name that was inspected, if any.
        scene: Option<String>,
    },

    // ==================== Persistence Errors ====================
    /// Writing the temporary file or replacing the target failed.
    #[error("failed to persist {}: {source}", path.display())]
    Persistence {
        /// The final path that was being replaced.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ==================== Asset Container Errors ====================
    /// The SerializedFile version is outside the supported range.
    #[error("unsupported assets file version: {version} (supported: {min}-{max})")]
    UnsupportedAssetsVersion {
        /// The version number found in the header.
        version: u32,
        /// Lowest supported version.
        min: u32,
        /// Highest supported version.
        max: u32,
    },

    /// The container is truncated or its tables are inconsistent.
    #[error("invalid assets file: {message}")]
    InvalidAssets {
        /// Description of what is invalid.
        message: String,
    },

    /// No object with the given path id exists in the container.
    #[error("object {path_id} not found in assets file")]
    ObjectNotFound {
        /// The path id that was requested.
        path_id: i64,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::Decode { .. } => "decode",
            Error::MalformedInput { .. } => "malformed_input",
            Error::UnrecognizedLanguage { .. } => "unrecognized_language",
            Error::Persistence { .. } => "persistence",
            _ => "unexpected",
        }
    }

    pub(crate) fn invalid_assets(message: impl Into<String>) -> Self {
        Error::InvalidAssets {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput {
            message: message.into(),
        }
    }
}

fn describe_scene(scene: Option<&str>) -> String {
    match scene {
        Some(name) => format!("on scene '{name}'"),
        None => "(no scenes provided)".to_string(),
    }
}

/// A specialized Result type for `SceneLoc` operations.
pub type Result<T> = std::result::Result<T, Error>;

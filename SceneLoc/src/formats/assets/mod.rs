//! Unity SerializedFile containers (`*.assets`)
//!
//! Only what is needed to list `TextAsset` objects and swap their script
//! payloads is understood. Type trees are skipped, and every byte that is
//! not an object table position/size or the header file size is written
//! back exactly as read.
//!
//! Supported: uncompressed SerializedFile versions 14 through 22.
//! Bundles (`UnityFS`) must be unpacked first.

mod reader;
mod text_asset;
mod writer;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

pub(crate) use reader::ByteReader;
pub(crate) use text_asset::{read_text_asset, rebuild_text_asset};

/// Oldest supported SerializedFile version (Unity 5.0)
pub const MIN_VERSION: u32 = 14;

/// Newest supported SerializedFile version
pub const MAX_VERSION: u32 = 22;

/// First version with 64-bit header fields and object offsets
pub const LARGE_FILES_VERSION: u32 = 22;

/// Header size before metadata for versions below 22
pub const HEADER_SIZE: usize = 20;

/// Header size before metadata for version 22 and later
pub const LARGE_HEADER_SIZE: usize = 48;

/// Alignment of each object inside the data section
pub const OBJECT_ALIGNMENT: usize = 8;

/// Unity class id of `TextAsset`
pub const TEXT_ASSET_CLASS_ID: i32 = 49;

/// Unity class id of `MonoBehaviour`
pub const MONO_BEHAVIOUR_CLASS_ID: i32 = 114;

/// Parsed SerializedFile header
#[derive(Debug, Clone)]
pub struct SerializedHeader {
    pub version: u32,
    pub metadata_size: u32,
    pub file_size: u64,
    /// Absolute offset of the data section
    pub data_offset: u64,
    /// Endianness of metadata and object data (the header itself is always big-endian)
    pub big_endian: bool,
    /// Bytes occupied by the header before metadata starts
    pub header_size: usize,
}

/// Entry of the object table
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub path_id: i64,
    /// Offset of the object's data, relative to the data section
    pub byte_start: u64,
    pub byte_size: u32,
    pub class_id: i32,
    /// Absolute file offset of the `byte_start` field in the table
    pub(crate) start_field: usize,
    /// Absolute file offset of the `byte_size` field in the table
    pub(crate) size_field: usize,
}

/// An opened SerializedFile with pending object replacements
#[derive(Debug, Clone)]
pub struct SerializedFile {
    data: Vec<u8>,
    header: SerializedHeader,
    unity_version: String,
    objects: Vec<ObjectInfo>,
    replacements: HashMap<i64, Vec<u8>>,
}

impl SerializedFile {
    /// Read and parse a SerializedFile from disk.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, or a format error
    /// if it is not a supported SerializedFile.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.as_ref().display());
        Self::from_bytes(data)
    }

    /// Parse a SerializedFile held in memory.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedAssetsVersion`] or [`Error::InvalidAssets`].
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let (header, unity_version, objects) = reader::parse(&data)?;
        tracing::debug!(
            "SerializedFile v{} (Unity {}), {} objects",
            header.version,
            unity_version,
            objects.len()
        );
        Ok(Self {
            data,
            header,
            unity_version,
            objects,
            replacements: HashMap::new(),
        })
    }

    #[must_use]
    pub fn header(&self) -> &SerializedHeader {
        &self.header
    }

    #[must_use]
    pub fn unity_version(&self) -> &str {
        &self.unity_version
    }

    #[must_use]
    pub fn objects(&self) -> &[ObjectInfo] {
        &self.objects
    }

    /// Whether any object has a pending replacement.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Current bytes of an object, including any pending replacement.
    pub fn object_data(&self, object: &ObjectInfo) -> Result<&[u8]> {
        if let Some(replaced) = self.replacements.get(&object.path_id) {
            return Ok(replaced);
        }
        let start = self.header.data_offset + object.byte_start;
        let end = start + u64::from(object.byte_size);
        if end > self.data.len() as u64 {
            return Err(Error::invalid_assets(format!(
                "object {} data out of bounds",
                object.path_id
            )));
        }
        Ok(&self.data[start as usize..end as usize])
    }

    /// Look up an object by path id.
    pub fn find_object(&self, path_id: i64) -> Result<&ObjectInfo> {
        self.objects
            .iter()
            .find(|o| o.path_id == path_id)
            .ok_or(Error::ObjectNotFound { path_id })
    }

    /// Stage new bytes for an object.
    pub fn replace_object(&mut self, path_id: i64, bytes: Vec<u8>) -> Result<()> {
        self.find_object(path_id)?;
        self.replacements.insert(path_id, bytes);
        Ok(())
    }

    /// Serialize the container with all pending replacements applied.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.replacements.is_empty() {
            return Ok(self.data.clone());
        }
        writer::serialize(self)
    }
}

/// Round `value` up to a multiple of `alignment`.
pub(crate) fn align_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

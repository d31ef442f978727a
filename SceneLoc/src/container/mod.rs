//! Asset container abstraction
//!
//! The dialogue pipeline only needs to list text resources, read their
//! script payloads, stage replacements, and serialize the result. Any
//! container that can do that implements [`AssetContainer`].

use crate::error::Result;
use crate::formats::assets::{
    SerializedFile, TEXT_ASSET_CLASS_ID, read_text_asset, rebuild_text_asset,
};

/// A text resource inside a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAsset {
    /// Identifier of the object inside its container
    pub path_id: i64,
    /// Resource name (`m_Name`), e.g. `EN_Town`
    pub name: String,
    /// Raw script payload (`m_Script`)
    pub script: Vec<u8>,
}

/// Named text resources that can be read, replaced, and written back
pub trait AssetContainer {
    /// All text resources, in container order.
    fn text_assets(&self) -> Result<Vec<TextAsset>>;

    /// Stage a new script payload for one text resource.
    fn replace_script(&mut self, path_id: i64, script: &[u8]) -> Result<()>;

    /// Serialize the container with every staged replacement applied.
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

impl AssetContainer for SerializedFile {
    fn text_assets(&self) -> Result<Vec<TextAsset>> {
        let big_endian = self.header().big_endian;
        let mut assets = Vec::new();

        for object in self.objects().iter().filter(|o| o.class_id == TEXT_ASSET_CLASS_ID) {
            let data = self.object_data(object)?;
            let layout = read_text_asset(data, big_endian)?;
            assets.push(TextAsset {
                path_id: object.path_id,
                name: layout.name,
                script: data[layout.script].to_vec(),
            });
        }

        Ok(assets)
    }

    fn replace_script(&mut self, path_id: i64, script: &[u8]) -> Result<()> {
        let big_endian = self.header().big_endian;
        let object = self.find_object(path_id)?;
        if object.class_id != TEXT_ASSET_CLASS_ID {
            return Err(crate::Error::ObjectNotFound { path_id });
        }
        let rebuilt = rebuild_text_asset(self.object_data(object)?, big_endian, script)?;
        self.replace_object(path_id, rebuilt)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        SerializedFile::to_bytes(self)
    }
}

//! `TextAsset` object layout
//!
//! ```text
//! m_Name   : i32 length, UTF-8 bytes, pad to 4
//! m_Script : i32 length, raw bytes, pad to 4
//! ...      : any later fields, kept verbatim
//! ```

use std::ops::Range;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::{ByteReader, align_up};
use crate::error::{Error, Result};

/// Field positions inside one `TextAsset` object
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextAssetLayout {
    pub name: String,
    /// Offset of the `m_Script` length prefix
    pub script_field: usize,
    /// Byte range of the script payload
    pub script: Range<usize>,
    /// Offset of the first byte after the padded script
    pub tail: usize,
}

/// Locate the name and script of a `TextAsset` object.
pub(crate) fn read_text_asset(object: &[u8], big_endian: bool) -> Result<TextAssetLayout> {
    let mut r = ByteReader::new(object, big_endian);

    let name_len = r.read_len(1)?;
    let name = String::from_utf8_lossy(r.read_bytes(name_len)?).into_owned();
    r.align(4);

    let script_field = r.position();
    let script_len = r.read_len(1)?;
    let script_start = r.position();
    r.skip(script_len)?;

    let tail = align_up(r.position(), 4).min(object.len());

    Ok(TextAssetLayout {
        name,
        script_field,
        script: script_start..script_start + script_len,
        tail,
    })
}

/// Build a copy of `object` with its `m_Script` replaced.
pub(crate) fn rebuild_text_asset(object: &[u8], big_endian: bool, script: &[u8]) -> Result<Vec<u8>> {
    let layout = read_text_asset(object, big_endian)?;
    let script_len = i32::try_from(script.len())
        .map_err(|_| Error::invalid_assets(format!("script of {} bytes is too large", script.len())))?;

    let mut out = Vec::with_capacity(object.len() - layout.script.len() + script.len() + 3);
    out.extend_from_slice(&object[..layout.script_field]);

    let mut len_bytes = [0u8; 4];
    if big_endian {
        BigEndian::write_i32(&mut len_bytes, script_len);
    } else {
        LittleEndian::write_i32(&mut len_bytes, script_len);
    }
    out.extend_from_slice(&len_bytes);
    out.extend_from_slice(script);
    out.resize(align_up(out.len(), 4), 0);
    out.extend_from_slice(&object[layout.tail..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_asset_le(name: &str, script: &[u8], tail: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(name.len() as i32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.resize(align_up(out.len(), 4), 0);
        out.extend_from_slice(&(script.len() as i32).to_le_bytes());
        out.extend_from_slice(script);
        out.resize(align_up(out.len(), 4), 0);
        out.extend_from_slice(tail);
        out
    }

    #[test]
    fn test_read_layout() {
        let object = text_asset_le("EN_Town", b"abcde", &[]);
        let layout = read_text_asset(&object, false).unwrap();
        assert_eq!(layout.name, "EN_Town");
        assert_eq!(layout.script_field, 12);
        assert_eq!(&object[layout.script.clone()], b"abcde");
        assert_eq!(layout.tail, object.len());
    }

    #[test]
    fn test_rebuild_preserves_name_and_tail() {
        let tail = [9u8, 9, 9, 9];
        let object = text_asset_le("ZH_Inn", b"old", &tail);
        let rebuilt = rebuild_text_asset(&object, false, b"a much longer script").unwrap();
        assert_eq!(rebuilt, text_asset_le("ZH_Inn", b"a much longer script", &tail));
    }

    #[test]
    fn test_rebuild_big_endian() {
        let mut object = Vec::new();
        object.extend_from_slice(&1i32.to_be_bytes());
        object.extend_from_slice(b"A\0\0\0");
        object.extend_from_slice(&2i32.to_be_bytes());
        object.extend_from_slice(b"xy\0\0");

        let rebuilt = rebuild_text_asset(&object, true, b"hello").unwrap();
        let layout = read_text_asset(&rebuilt, true).unwrap();
        assert_eq!(layout.name, "A");
        assert_eq!(&rebuilt[layout.script], b"hello");
        assert_eq!(rebuilt.len(), 20);
    }

    #[test]
    fn test_truncated_script() {
        let mut object = text_asset_le("A", b"abc", &[]);
        object.truncate(10);
        assert!(read_text_asset(&object, false).is_err());
    }
}

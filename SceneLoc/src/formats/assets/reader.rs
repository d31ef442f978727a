//! SerializedFile header and metadata parsing

use std::io::{Cursor, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use super::{
    HEADER_SIZE, LARGE_FILES_VERSION, LARGE_HEADER_SIZE, MAX_VERSION, MIN_VERSION,
    MONO_BEHAVIOUR_CLASS_ID, ObjectInfo, SerializedHeader,
};
use crate::error::{Error, Result};

/// Size of a type tree node record before version 19
const NODE_SIZE: usize = 24;

/// Size of a type tree node record from version 19 (adds a ref type hash)
const NODE_SIZE_V19: usize = 32;

/// Endian-aware reader over a byte slice.
///
/// Alignment is relative to the start of the slice.
pub(crate) struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    big_endian: bool,
}

macro_rules! read_endian {
    ($self:ident, $method:ident) => {{
        let value = if $self.big_endian {
            $self.cursor.$method::<BigEndian>()
        } else {
            $self.cursor.$method::<LittleEndian>()
        };
        value.map_err(|_| truncated($self.position()))
    }};
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8], big_endian: bool) -> Self {
        Self {
            cursor: Cursor::new(data),
            big_endian,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub(crate) fn seek(&mut self, position: usize) {
        self.cursor.set_position(position as u64);
    }

    pub(crate) fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| truncated(self.position()))
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        read_endian!(self, read_u16)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16> {
        read_endian!(self, read_i16)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        read_endian!(self, read_u32)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        read_endian!(self, read_i32)
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64> {
        read_endian!(self, read_u64)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        read_endian!(self, read_i64)
    }

    /// Read a non-negative `i32` count or length that must fit in the remaining data.
    pub(crate) fn read_len(&mut self, element_size: usize) -> Result<usize> {
        let at = self.position();
        let value = self.read_i32()?;
        let len = usize::try_from(value)
            .map_err(|_| Error::invalid_assets(format!("negative length {value} at offset {at}")))?;
        if len.saturating_mul(element_size) > self.remaining() {
            return Err(Error::invalid_assets(format!(
                "length {len} at offset {at} exceeds remaining data"
            )));
        }
        Ok(len)
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(truncated(self.position()));
        }
        self.seek(self.position() + count);
        Ok(())
    }

    pub(crate) fn align(&mut self, alignment: usize) {
        let aligned = super::align_up(self.position(), alignment);
        self.seek(aligned);
    }

    pub(crate) fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(truncated(self.position()));
        }
        let start = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        self.seek(start + count);
        Ok(&data[start..start + count])
    }

    /// Read a null-terminated string.
    pub(crate) fn read_cstring(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            self.cursor
                .read_exact(&mut byte)
                .map_err(|_| truncated(self.position()))?;
            if byte[0] == 0 {
                break;
            }
            bytes.push(byte[0]);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn truncated(position: usize) -> Error {
    Error::invalid_assets(format!("unexpected end of data at offset {position}"))
}

/// Parse the header, type table and object table.
pub(super) fn parse(data: &[u8]) -> Result<(SerializedHeader, String, Vec<ObjectInfo>)> {
    let header = read_header(data)?;
    let version = header.version;

    let mut r = ByteReader::new(data, header.big_endian);
    r.seek(header.header_size);

    let unity_version = r.read_cstring()?;
    let _target_platform = r.read_i32()?;
    let enable_type_tree = r.read_u8()? != 0;

    let type_count = r.read_len(4)?;
    let mut class_ids = Vec::with_capacity(type_count);
    for _ in 0..type_count {
        class_ids.push(skip_serialized_type(&mut r, version, enable_type_tree)?);
    }

    let object_count = r.read_len(4)?;
    let mut objects = Vec::with_capacity(object_count);
    for _ in 0..object_count {
        r.align(4);
        let path_id = r.read_i64()?;

        let start_field = r.position();
        let byte_start = if version >= LARGE_FILES_VERSION {
            let value = r.read_i64()?;
            u64::try_from(value)
                .map_err(|_| Error::invalid_assets(format!("object {path_id} has negative offset")))?
        } else {
            u64::from(r.read_u32()?)
        };

        let size_field = r.position();
        let byte_size = r.read_u32()?;
        let type_id = r.read_i32()?;

        let class_id = if version < 16 {
            i32::from(r.read_u16()?)
        } else {
            usize::try_from(type_id)
                .ok()
                .and_then(|idx| class_ids.get(idx).copied())
                .ok_or_else(|| {
                    Error::invalid_assets(format!("object {path_id} has invalid type index {type_id}"))
                })?
        };

        if version < 17 {
            let _script_type_index = r.read_i16()?;
        }
        if version == 15 || version == 16 {
            let _stripped = r.read_u8()?;
        }

        let end = header
            .data_offset
            .checked_add(byte_start)
            .and_then(|start| start.checked_add(u64::from(byte_size)));
        if end.is_none_or(|end| end > data.len() as u64) {
            return Err(Error::invalid_assets(format!(
                "object {path_id} extends past end of file ({} bytes)",
                data.len()
            )));
        }

        objects.push(ObjectInfo {
            path_id,
            byte_start,
            byte_size,
            class_id,
            start_field,
            size_field,
        });
    }

    if r.position() as u64 > header.data_offset {
        return Err(Error::invalid_assets("object table overlaps data section"));
    }

    Ok((header, unity_version, objects))
}

fn read_header(data: &[u8]) -> Result<SerializedHeader> {
    let mut r = ByteReader::new(data, true);

    let metadata_size = r.read_u32()?;
    let file_size = r.read_u32()?;
    let version = r.read_u32()?;
    let data_offset = r.read_u32()?;

    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::UnsupportedAssetsVersion {
            version,
            min: MIN_VERSION,
            max: MAX_VERSION,
        });
    }

    let big_endian = r.read_u8()? != 0;
    r.skip(3)?;

    let mut header = SerializedHeader {
        version,
        metadata_size,
        file_size: u64::from(file_size),
        data_offset: u64::from(data_offset),
        big_endian,
        header_size: HEADER_SIZE,
    };

    if version >= LARGE_FILES_VERSION {
        header.metadata_size = r.read_u32()?;
        header.file_size = r.read_u64()?;
        header.data_offset = r.read_u64()?;
        let _unknown = r.read_u64()?;
        header.header_size = LARGE_HEADER_SIZE;
    }

    if header.data_offset > data.len() as u64 {
        return Err(Error::invalid_assets(format!(
            "data offset {} past end of file ({})",
            header.data_offset,
            data.len()
        )));
    }
    if header.file_size != data.len() as u64 {
        tracing::warn!(
            "Header file size {} does not match actual size {}",
            header.file_size,
            data.len()
        );
    }

    Ok(header)
}

/// Skip one entry of the type table, returning its class id.
fn skip_serialized_type(r: &mut ByteReader<'_>, version: u32, enable_type_tree: bool) -> Result<i32> {
    let class_id = r.read_i32()?;
    if version >= 16 {
        let _stripped = r.read_u8()?;
    }
    if version >= 17 {
        let _script_type_index = r.read_i16()?;
    }
    if (version < 16 && class_id < 0) || (version >= 16 && class_id == MONO_BEHAVIOUR_CLASS_ID) {
        r.skip(16)?; // script id
    }
    r.skip(16)?; // old type hash

    if enable_type_tree {
        let node_size = if version >= 19 { NODE_SIZE_V19 } else { NODE_SIZE };
        let node_count = r.read_len(node_size)?;
        let string_size = r.read_len(1)?;
        r.skip(node_count * node_size + string_size)?;
        if version >= 21 {
            let dependencies = r.read_len(4)?;
            r.skip(dependencies * 4)?;
        }
    }

    Ok(class_id)
}

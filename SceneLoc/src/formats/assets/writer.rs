//! SerializedFile re-serialization
//!
//! Objects are written back in their original data order, each aligned to
//! [`OBJECT_ALIGNMENT`]. Everything before the data section is copied as-is
//! and only the object table offsets/sizes and the header file size are
//! patched.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::{LARGE_FILES_VERSION, OBJECT_ALIGNMENT, SerializedFile, align_up};
use crate::error::{Error, Result};

/// Offset of the 32-bit file size in the header
const FILE_SIZE_FIELD: usize = 4;

/// Offset of the 64-bit file size in the version 22 header
const LARGE_FILE_SIZE_FIELD: usize = 24;

pub(super) fn serialize(file: &SerializedFile) -> Result<Vec<u8>> {
    let header = &file.header;
    let data_offset = header.data_offset as usize;
    let large = header.version >= LARGE_FILES_VERSION;

    let mut order: Vec<usize> = (0..file.objects.len()).collect();
    order.sort_by_key(|&i| file.objects[i].byte_start);

    let growth: usize = file.replacements.values().map(Vec::len).sum();
    let mut out = Vec::with_capacity(file.data.len() + growth);
    out.extend_from_slice(&file.data[..data_offset]);

    let mut placements = vec![(0u64, 0u32); file.objects.len()];
    let mut original_end = data_offset;

    for &index in &order {
        let object = &file.objects[index];
        let bytes = file.object_data(object)?;

        let start = align_up(out.len() - data_offset, OBJECT_ALIGNMENT);
        out.resize(data_offset + start, 0);
        out.extend_from_slice(bytes);

        let size = u32::try_from(bytes.len()).map_err(|_| {
            Error::invalid_assets(format!("object {} is too large ({} bytes)", object.path_id, bytes.len()))
        })?;
        placements[index] = (start as u64, size);

        let end = data_offset + object.byte_start as usize + object.byte_size as usize;
        original_end = original_end.max(end);
    }

    // Trailing bytes after the last object
    out.extend_from_slice(&file.data[original_end..]);

    for (object, &(start, size)) in file.objects.iter().zip(&placements) {
        if large {
            write_u64(&mut out[object.start_field..], start, header.big_endian);
        } else {
            let start = u32::try_from(start).map_err(|_| {
                Error::invalid_assets("data section exceeds 4 GiB; version 22 or later is required")
            })?;
            write_u32(&mut out[object.start_field..], start, header.big_endian);
        }
        write_u32(&mut out[object.size_field..], size, header.big_endian);
    }

    let file_size = out.len() as u64;
    if large {
        BigEndian::write_u64(&mut out[LARGE_FILE_SIZE_FIELD..], file_size);
    } else {
        let file_size = u32::try_from(file_size)
            .map_err(|_| Error::invalid_assets("file exceeds 4 GiB; version 22 or later is required"))?;
        BigEndian::write_u32(&mut out[FILE_SIZE_FIELD..], file_size);
    }

    tracing::debug!(
        "Serialized {} objects ({} replaced), {} -> {} bytes",
        file.objects.len(),
        file.replacements.len(),
        file.data.len(),
        out.len()
    );

    Ok(out)
}

fn write_u32(buf: &mut [u8], value: u32, big_endian: bool) {
    if big_endian {
        BigEndian::write_u32(buf, value);
    } else {
        LittleEndian::write_u32(buf, value);
    }
}

fn write_u64(buf: &mut [u8], value: u64, big_endian: bool) {
    if big_endian {
        BigEndian::write_u64(buf, value);
    } else {
        LittleEndian::write_u64(buf, value);
    }
}

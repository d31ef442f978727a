//! PKCS#7 padding

use super::BLOCK_SIZE;

/// Pad `data` up to the next block boundary.
///
/// A full block of padding is appended when `data` is already aligned.
pub(super) fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip and validate the trailing padding, returning the payload length.
pub(super) fn unpadded_len(data: &[u8]) -> Result<usize, &'static str> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err("data is not block aligned");
    }
    let pad_len = data[data.len() - 1] as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE {
        return Err("invalid padding length");
    }
    let payload_len = data.len() - pad_len;
    if !data[payload_len..].iter().all(|&b| b as usize == pad_len) {
        return Err("invalid padding bytes");
    }
    Ok(payload_len)
}

//! Encrypted script envelopes
//!
//! Dialogue scripts are stored inside `TextAsset.m_Script` as base64 text
//! wrapping AES-256 ciphertext. Each 16-byte block is encrypted on its own
//! (ECB, no IV) and the plaintext is PKCS#7 padded to the block size.
//!
//! ECB leaks repeated plaintext blocks; existing assets are stored this way.

mod cipher;
mod padding;

pub use cipher::ScriptCipher;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Length of the AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Key shared by every script envelope in the game's assets.
pub const SCRIPT_KEY: [u8; KEY_SIZE] = *b"UKu52ePUBwetZ9wNX88o54dnfKRu0T1l";

/// Number of leading envelope characters kept when reporting a bad envelope
const MASK_PREFIX: usize = 12;

/// Describe an envelope for diagnostics without echoing all of it.
pub(crate) fn mask_envelope(envelope: &[u8]) -> String {
    let shown = envelope.len().min(MASK_PREFIX);
    let prefix = String::from_utf8_lossy(&envelope[..shown]);
    if envelope.len() > shown {
        format!("envelope '{prefix}...' ({} bytes)", envelope.len())
    } else {
        format!("envelope '{prefix}' ({} bytes)", envelope.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_short_envelope() {
        assert_eq!(mask_envelope(b"abc"), "envelope 'abc' (3 bytes)");
    }

    #[test]
    fn test_mask_long_envelope() {
        let masked = mask_envelope(b"QUJDREVGR0hJSktMTU5PUA==");
        assert_eq!(masked, "envelope 'QUJDREVGR0hJ...' (24 bytes)");
    }
}

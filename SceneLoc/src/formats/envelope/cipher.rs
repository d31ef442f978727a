//! AES-256-ECB envelope codec

use std::fmt;

use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::padding::{pad, unpadded_len};
use super::{BLOCK_SIZE, KEY_SIZE, SCRIPT_KEY, mask_envelope};
use crate::error::{CipherStage, Error, Result};

/// Encrypts and decrypts script envelopes with a fixed key.
///
/// The key is injected once at construction and never exposed afterwards.
#[derive(Clone)]
pub struct ScriptCipher {
    cipher: Aes256,
}

impl ScriptCipher {
    /// Create a cipher for the given 32-byte key.
    #[must_use]
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            cipher: Aes256::new(GenericArray::from_slice(key)),
        }
    }

    /// Decrypt a base64 envelope into its UTF-8 plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] naming the failing stage: base64 decoding,
    /// block alignment, padding validation, or UTF-8 decoding.
    pub fn decrypt(&self, envelope: impl AsRef<[u8]>) -> Result<String> {
        let envelope = envelope.as_ref();
        let fail = |stage: CipherStage, detail: String| Error::Decode {
            stage,
            subject: mask_envelope(envelope),
            detail,
        };

        let mut data = STANDARD
            .decode(envelope.trim_ascii())
            .map_err(|e| fail(CipherStage::Base64, e.to_string()))?;

        if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
            return Err(fail(
                CipherStage::BlockLength,
                format!("{} bytes is not a multiple of {BLOCK_SIZE}", data.len()),
            ));
        }

        self.decrypt_blocks(&mut data);

        let len = unpadded_len(&data).map_err(|reason| fail(CipherStage::Padding, reason.to_string()))?;
        data.truncate(len);

        String::from_utf8(data).map_err(|e| fail(CipherStage::Utf8, e.to_string()))
    }

    /// Encrypt UTF-8 plaintext into a base64 envelope.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut data = pad(plaintext.as_bytes());
        self.encrypt_blocks(&mut data);
        STANDARD.encode(data)
    }

    /// Encrypt whole blocks in place. `data` must be block aligned.
    pub(crate) fn encrypt_blocks(&self, data: &mut [u8]) {
        for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        }
    }

    /// Decrypt whole blocks in place. `data` must be block aligned.
    pub(crate) fn decrypt_blocks(&self, data: &mut [u8]) {
        for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
            self.cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        }
    }
}

impl Default for ScriptCipher {
    fn default() -> Self {
        Self::new(&SCRIPT_KEY)
    }
}

impl fmt::Debug for ScriptCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptCipher").finish_non_exhaustive()
    }
}

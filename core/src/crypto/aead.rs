//! crypto/aead.rs
//! XChaCha20-Poly1305 provider.
//!
//! Design notes:
//! - 32-byte key, 24-byte nonce, 16-byte tag appended to the ciphertext.
//! - Open decrypts into a zeroizing scratch buffer; on tag mismatch the buffer
//!   is wiped and nothing is returned.

use chacha20poly1305::aead::{Aead, AeadInPlace, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use zeroize::Zeroizing;

use crate::crypto::traits::AeadCipher;
use crate::crypto::types::CryptoError;
use crate::crypto::types::{KEY_LEN, NONCE_LEN, TAG_LEN};

#[derive(Debug, Clone, Copy, Default)]
pub struct XChaCha20Poly1305Cipher;

impl AeadCipher for XChaCha20Poly1305Cipher {
    fn seal(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
        cipher
            .encrypt(XNonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::Encryption("XChaCha20-Poly1305 seal failed".into()))
    }

    fn open(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        ciphertext_and_tag: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CryptoError::AuthenticationFailed);
        }

        let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
        let mut scratch = Zeroizing::new(ciphertext_and_tag.to_vec());
        cipher
            .decrypt_in_place(XNonce::from_slice(nonce), aad, &mut *scratch)
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        Ok(std::mem::take(&mut *scratch))
    }
}

//! envelope/transport.rs
//!
//! Hex, string and whole-file entry points over the envelope engine.
//!
//! - Hex form is exactly `hex(header ‖ TLV ‖ ciphertext)`, lowercase on output;
//!   either case is accepted on input.
//! - File entry points read the whole input into memory.
//! - Decrypted output is written only after authentication succeeds.

use std::fs;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{AeadCipher, Hash, KeyMaterial, KeyMode, PasswordKdf, SecureRandom};
use crate::envelope::types::{Envelope, EnvelopeEngine};
use crate::types::{EnvelopeError, EnvelopeResult};

impl Envelope {
    pub fn to_hex(&self) -> EnvelopeResult<String> {
        Ok(hex::encode(self.to_bytes()?))
    }

    pub fn from_hex(s: &str) -> EnvelopeResult<Self> {
        Self::parse(&decode_hex(s)?)
    }
}

fn decode_hex(s: &str) -> EnvelopeResult<Vec<u8>> {
    hex::decode(s.trim()).map_err(|e| EnvelopeError::InvalidEncoding(e.to_string()))
}

impl<K, H, A, R> EnvelopeEngine<K, H, A, R>
where
    K: PasswordKdf,
    H: Hash,
    A: AeadCipher,
    R: SecureRandom,
{
    /// Password-encrypt a string into the hex transport form.
    pub fn encrypt_string(&self, plaintext: &str, password: &str, aad: &str) -> EnvelopeResult<String> {
        let material = KeyMaterial::password(password);
        let envelope = self.encrypt(plaintext.as_bytes(), &material, KeyMode::Password, aad.as_bytes())?;
        Ok(hex::encode(envelope))
    }

    /// Decrypt the hex transport form back into a UTF-8 string.
    pub fn decrypt_string(&self, hex_envelope: &str, password: &str, aad: &str) -> EnvelopeResult<String> {
        let bytes = decode_hex(hex_envelope)?;
        let material = KeyMaterial::password(password);
        let plaintext = self.decrypt(&bytes, &material, KeyMode::Password, aad.as_bytes())?;
        String::from_utf8(plaintext).map_err(|e| {
            drop(Zeroizing::new(e.into_bytes()));
            EnvelopeError::InvalidEncoding("plaintext is not valid UTF-8".into())
        })
    }

    pub fn encrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        password: &str,
        aad: &[u8],
    ) -> EnvelopeResult<()> {
        let material = KeyMaterial::password(password);
        self.encrypt_file_with_key(input, output, &material, KeyMode::Password, aad)
    }

    pub fn decrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        password: &str,
        aad: &[u8],
    ) -> EnvelopeResult<()> {
        let material = KeyMaterial::password(password);
        self.decrypt_file_with_key(input, output, &material, KeyMode::Password, aad)
    }

    /// Encrypt a whole file with arbitrary key material.
    pub fn encrypt_file_with_key(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> EnvelopeResult<()> {
        let plaintext = Zeroizing::new(fs::read(input.as_ref())?);
        let envelope = self.encrypt(&plaintext, material, mode, aad)?;
        fs::write(output.as_ref(), &envelope)?;
        debug!(
            input = %input.as_ref().display(),
            output = %output.as_ref().display(),
            bytes = envelope.len(),
            "file encrypted"
        );
        Ok(())
    }

    /// Decrypt a whole file. Nothing is written unless authentication succeeds.
    pub fn decrypt_file_with_key(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        material: &KeyMaterial,
        mode: KeyMode,
        aad: &[u8],
    ) -> EnvelopeResult<()> {
        let envelope = fs::read(input.as_ref())?;
        let plaintext = Zeroizing::new(self.decrypt(&envelope, material, mode, aad)?);
        fs::write(output.as_ref(), &*plaintext)?;
        debug!(
            input = %input.as_ref().display(),
            output = %output.as_ref().display(),
            bytes = plaintext.len(),
            "file decrypted"
        );
        Ok(())
    }
}

//! Session keys and authenticated message encryption with AES-256-GCM
//!
//! The symmetric side of the hybrid exchange: one 256-bit session key per
//! chat session, fresh random 96-bit nonce per message, 128-bit tag.
//! Envelopes are `nonce || ciphertext || tag`, base64-encoded for transport,
//! and carry everything needed to decrypt them in any order.
//!
//! # Security
//!
//! - Nonces come from the OS random source on every call; callers cannot
//!   supply them and no counter is shared between calls
//! - Key bytes are zeroized when a key is dropped or replaced
//! - Tag verification failure rejects the whole message; there is no
//!   partial plaintext path

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::{encoding, error::CryptoError};

/// Session key length (AES-256).
pub const KEY_SIZE: usize = 32;

/// Nonce length for AES-GCM (96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag length (128 bits).
pub const TAG_SIZE: usize = 16;

/// A 256-bit symmetric session key.
///
/// Created by generation (session initiator) or from unwrapped raw bytes
/// (session responder). Key material is zeroized on drop.
pub struct SessionKey {
    bytes: [u8; KEY_SIZE],
}

impl SessionKey {
    /// Generate a fresh key from the OS random source.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| CryptoError::KeyGeneration { reason: err.to_string() })?;
        Ok(Self { bytes })
    }

    /// Reconstruct a key from raw bytes, typically after unwrapping.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != KEY_SIZE {
            return Err(CryptoError::MalformedKey {
                reason: format!("expected {KEY_SIZE} key bytes, got {}", raw.len()),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(raw);
        Ok(Self { bytes })
    }

    /// Raw key bytes, exposed solely so the wrapping path can encrypt them
    /// under a peer's public key.
    ///
    /// This is the only accessor to key material; nothing else in the
    /// crate reads it back out.
    pub fn expose_for_wrap(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey").field("bytes", &"[REDACTED]").finish()
    }
}

/// Cipher context holding the single active session key.
///
/// Starts uninitialized; `generate_key`/`import_key`/`install_key`
/// activate a key, replacing (and thereby zeroizing) any prior one.
/// Encryption and decryption borrow the context immutably, so concurrent
/// calls cannot corrupt nonce freshness: every call draws its own nonce
/// from the OS random source.
#[derive(Debug, Default)]
pub struct SessionCipher {
    key: Option<SessionKey>,
}

impl SessionCipher {
    /// Create an uninitialized cipher context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a key has been generated or imported.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Generate and activate a fresh session key.
    ///
    /// Any previously active key is discarded.
    pub fn generate_key(&mut self) -> Result<(), CryptoError> {
        self.key = Some(SessionKey::generate()?);
        Ok(())
    }

    /// Activate a key reconstructed elsewhere, typically after unwrapping.
    pub fn install_key(&mut self, key: SessionKey) {
        self.key = Some(key);
    }

    /// Import and activate a key from base64-encoded raw bytes.
    pub fn import_key(&mut self, encoded: &str) -> Result<(), CryptoError> {
        let raw = encoding::decode(encoded)?;
        self.key = Some(SessionKey::from_bytes(&raw)?);
        Ok(())
    }

    /// Export the active key as base64 text for the wrapping path.
    ///
    /// Never send this value unwrapped: it is the session secret itself.
    pub fn export_key_for_wrap(&self) -> Result<String, CryptoError> {
        let key = self.active_key("export key")?;
        Ok(encoding::encode(key.expose_for_wrap()))
    }

    /// The active session key, for wrapping under a peer's public key.
    pub fn session_key(&self) -> Result<&SessionKey, CryptoError> {
        self.active_key("wrap key")
    }

    /// Encrypt a message, producing a transport-encoded envelope.
    ///
    /// A fresh random 96-bit nonce is generated per call and prepended to
    /// the ciphertext, so identical plaintexts never produce identical
    /// envelopes.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let key = self.active_key("encrypt")?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|err| CryptoError::KeyGeneration { reason: err.to_string() })?;

        let cipher = Aes256Gcm::new((&key.bytes).into());
        let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        else {
            unreachable!("AES-256-GCM encryption of an in-memory buffer cannot fail");
        };

        let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);

        Ok(encoding::encode(&envelope))
    }

    /// Decrypt a transport-encoded envelope back into message text.
    ///
    /// Fails with [`CryptoError::Authentication`] when the tag does not
    /// verify: tampering, a different key, or transport corruption. The
    /// envelope is rejected whole; no partial plaintext is returned.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CryptoError> {
        let key = self.active_key("decrypt")?;

        let decoded = encoding::decode(envelope)?;
        if decoded.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::MalformedInput {
                reason: format!(
                    "envelope of {} bytes is shorter than nonce and tag",
                    decoded.len()
                ),
            });
        }

        let (nonce_bytes, ciphertext) = decoded.split_at(NONCE_SIZE);
        let cipher = Aes256Gcm::new((&key.bytes).into());
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::MalformedInput {
            reason: "decrypted payload is not valid UTF-8".to_string(),
        })
    }

    fn active_key(&self, operation: &'static str) -> Result<&SessionKey, CryptoError> {
        self.key.as_ref().ok_or(CryptoError::InvalidState { operation })
    }
}

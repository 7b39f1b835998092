//! Identity key pairs and session key wrapping with RSA-OAEP
//!
//! The asymmetric side of the hybrid exchange. An [`IdentityKeyPair`] is
//! generated once per identity and used for exactly one job: unwrapping
//! symmetric session keys that peers wrapped under its public half. The
//! public half travels as SubjectPublicKeyInfo DER, base64-encoded for
//! transport; the private half never leaves the process.
//!
//! Parameters are fixed configuration, not caller-supplied, so a caller
//! cannot weaken them: 2048-bit modulus, public exponent 65537, OAEP
//! padding with SHA-256. Peers must match these bit-for-bit.
//!
//! # Security
//!
//! - [`PeerPublicKey`] carries wrapping capability only; the type holds no
//!   private material and cannot decrypt
//! - Unwrap failure is indistinguishable between "wrong key pair" and
//!   "tampered ciphertext", and is reported as a single error
//! - Imported keys are validated against the fixed parameters before use

use rand::rngs::OsRng;
use rsa::{
    BigUint, Oaep, RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding},
    traits::PublicKeyParts,
};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{encoding, error::CryptoError};

/// Fixed modulus size for identity key pairs.
pub const MODULUS_BITS: usize = 2048;

/// Fixed public exponent (F4).
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Modulus size in bytes.
const MODULUS_BYTES: usize = MODULUS_BITS / 8;

/// OAEP overhead: two SHA-256 digests plus two framing bytes (RFC 8017).
const OAEP_OVERHEAD: usize = 2 * 32 + 2;

/// Largest payload that fits in a single wrap operation.
///
/// Comfortably above the 32-byte session keys this module exists to carry.
pub const MAX_WRAP_PAYLOAD: usize = MODULUS_BYTES - OAEP_OVERHEAD;

/// An identity's asymmetric key pair.
///
/// Immutable after generation. The private half is exclusively owned by
/// the generating party; only the public half is exportable.
pub struct IdentityKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl std::fmt::Debug for IdentityKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose private key material in debug output
        f.debug_struct("IdentityKeyPair")
            .field("public", &self.export_public_key())
            .field("private", &"[REDACTED]")
            .finish()
    }
}

impl IdentityKeyPair {
    /// Generate a fresh key pair from the OS random source.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = OsRng;
        let private = RsaPrivateKey::new(&mut rng, MODULUS_BITS)
            .map_err(|err| CryptoError::KeyGeneration { reason: err.to_string() })?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// Export the public half as base64-encoded SubjectPublicKeyInfo DER.
    ///
    /// This is the `PUBLISH_PUBLIC_KEY` wire payload.
    pub fn export_public_key(&self) -> String {
        let Ok(der) = self.public.to_public_key_der() else {
            unreachable!("a generated RSA public key always has an SPKI encoding");
        };
        encoding::encode(der.as_bytes())
    }

    /// Export the public half as a PEM document.
    ///
    /// Same SPKI key as [`export_public_key`](Self::export_public_key), for
    /// peers that exchange PEM instead of bare base64.
    pub fn export_public_key_pem(&self) -> String {
        let Ok(pem) = self.public.to_public_key_pem(LineEnding::LF) else {
            unreachable!("a generated RSA public key always has an SPKI encoding");
        };
        pem
    }

    /// Unwrap a session key that a peer wrapped under our public key.
    ///
    /// Returns the raw key bytes, zeroized when dropped. Fails with
    /// [`CryptoError::Decryption`] when the ciphertext was not produced
    /// for this key pair or was tampered with in transit.
    pub fn unwrap_key(&self, wrapped: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let ciphertext = encoding::decode(wrapped)?;
        let raw = self
            .private
            .decrypt(Oaep::new::<Sha256>(), &ciphertext)
            .map_err(|_| CryptoError::Decryption)?;
        Ok(Zeroizing::new(raw))
    }
}

/// A peer's imported public key, usable for wrapping only.
#[derive(Debug, Clone)]
pub struct PeerPublicKey {
    key: RsaPublicKey,
}

impl PeerPublicKey {
    /// Import a peer's public key from base64-encoded SPKI DER.
    pub fn import(text: &str) -> Result<Self, CryptoError> {
        let der = encoding::decode(text).map_err(|_| CryptoError::MalformedKey {
            reason: "public key is not valid base64".to_string(),
        })?;
        let key = RsaPublicKey::from_public_key_der(&der)
            .map_err(|err| CryptoError::MalformedKey { reason: err.to_string() })?;
        Self::validate(key)
    }

    /// Import a peer's public key from a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, CryptoError> {
        let key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|err| CryptoError::MalformedKey { reason: err.to_string() })?;
        Self::validate(key)
    }

    /// Reject keys that do not match the fixed scheme parameters.
    fn validate(key: RsaPublicKey) -> Result<Self, CryptoError> {
        if key.size() != MODULUS_BYTES {
            return Err(CryptoError::MalformedKey {
                reason: format!("unsupported modulus size: {} bits", key.size() * 8),
            });
        }
        if key.e() != &BigUint::from(PUBLIC_EXPONENT) {
            return Err(CryptoError::MalformedKey {
                reason: format!("unsupported public exponent: {}", key.e()),
            });
        }
        Ok(Self { key })
    }

    /// Wrap raw session key bytes under this public key.
    ///
    /// Returns the `KEY_EXCHANGE` wire payload. Input larger than
    /// [`MAX_WRAP_PAYLOAD`] is rejected before touching the provider.
    pub fn wrap_key(&self, raw: &[u8]) -> Result<String, CryptoError> {
        if raw.len() > MAX_WRAP_PAYLOAD {
            return Err(CryptoError::PayloadTooLarge {
                max: MAX_WRAP_PAYLOAD,
                actual: raw.len(),
            });
        }
        let mut rng = OsRng;
        let ciphertext = self
            .key
            .encrypt(&mut rng, Oaep::new::<Sha256>(), raw)
            .map_err(|err| CryptoError::KeyGeneration { reason: err.to_string() })?;
        Ok(encoding::encode(&ciphertext))
    }
}

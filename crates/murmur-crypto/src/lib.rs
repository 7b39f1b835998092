//! Murmur Cryptographic Primitives
//!
//! Cryptographic building blocks for end-to-end encrypted chat sessions.
//! Pure operations with no I/O beyond the OS random source; all state is
//! held in explicit context objects owned by the caller.
//!
//! # Hybrid Key Exchange
//!
//! Asymmetric operations are slow and size-limited, so they carry only a
//! short symmetric key. Bulk message traffic runs under the symmetric
//! cipher:
//!
//! ```text
//! Identity Key Pair (RSA-2048, OAEP-SHA256)
//!        │
//!        ▼ wrap / unwrap
//! Session Key (256-bit, one per chat session)
//!        │
//!        ▼ encrypt / decrypt
//! AES-256-GCM Envelope → nonce || ciphertext || tag → base64
//! ```
//!
//! The initiator generates a [`SessionKey`], wraps its raw bytes under the
//! peer's imported public key, and sends the wrapped key. The responder
//! unwraps with its private key and installs the result in its own
//! [`SessionCipher`]. From then on both sides seal and open messages under
//! the shared key, with a fresh random 96-bit nonce per message.
//!
//! # Security
//!
//! Nonce Discipline:
//! - Nonces are drawn from the OS random source on every encryption
//! - Callers never supply nonces or counters
//! - A repeated nonce under one key would break confidentiality, so nonce
//!   generation is not shared state that concurrent calls could corrupt
//!
//! Key Hygiene:
//! - Private key material never leaves the process
//! - Session key bytes are zeroized on drop and on key replacement
//! - Raw key bytes are reachable only through the wrapping path
//!
//! Authenticity:
//! - AES-256-GCM rejects any tampered envelope during tag verification
//! - Authentication failure never yields partial plaintext

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod asymmetric;
pub mod encoding;
pub mod error;
pub mod symmetric;

pub use asymmetric::{IdentityKeyPair, MAX_WRAP_PAYLOAD, PeerPublicKey};
pub use error::CryptoError;
pub use symmetric::{KEY_SIZE, NONCE_SIZE, SessionCipher, SessionKey, TAG_SIZE};

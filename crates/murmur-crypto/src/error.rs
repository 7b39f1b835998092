//! Error types for Murmur cryptographic operations
//!
//! One taxonomy across the codec, the key manager, and the session cipher,
//! so callers can always tell hostile or corrupted input apart from local
//! misconfiguration. Cryptographic failures are never retried: retrying a
//! failed decryption cannot succeed, and retries belong to the transport
//! layer anyway.

use thiserror::Error;

/// Errors from cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material could not be produced (provider or entropy failure)
    #[error("key generation failed: {reason}")]
    KeyGeneration {
        /// Reason reported by the provider
        reason: String,
    },

    /// Operation invoked before the required key exists
    #[error("invalid state: cannot {operation} without an active key")]
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Key material from outside the process could not be accepted
    #[error("malformed key: {reason}")]
    MalformedKey {
        /// Why the key was rejected
        reason: String,
    },

    /// External input was not a valid encoded payload
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Why the input was rejected
        reason: String,
    },

    /// Wrap payload exceeds the asymmetric scheme's size bound
    #[error("payload too large for key wrap: {actual} bytes exceeds {max}")]
    PayloadTooLarge {
        /// Maximum payload the scheme accepts
        max: usize,
        /// Size that was passed in
        actual: usize,
    },

    /// Wrapped key was not produced for this key pair, or was tampered with
    #[error("wrapped key decryption failed")]
    Decryption,

    /// Envelope authentication tag did not verify (tampering or wrong key)
    #[error("envelope authentication failed")]
    Authentication,
}

impl CryptoError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Fatal errors indicate local misconfiguration or a provider failure;
    /// the session cannot proceed. Recoverable errors are caused by a bad
    /// external key, message, or wrapped key: reject that input and keep
    /// the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            // Local faults - abort session setup
            Self::KeyGeneration { .. } | Self::InvalidState { .. } => true,

            // Bad external input or caller misuse - reject and continue
            Self::MalformedKey { .. }
            | Self::MalformedInput { .. }
            | Self::PayloadTooLarge { .. }
            | Self::Decryption
            | Self::Authentication => false,
        }
    }
}

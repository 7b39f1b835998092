//! Error types for the session layer

use murmur_crypto::CryptoError;
use thiserror::Error;

/// Errors from session orchestration
#[derive(Debug, Error)]
pub enum SessionError {
    /// A primitive operation failed
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Key exchange attempted before the peer's public key was learned
    #[error("peer public key not yet learned")]
    PeerKeyUnknown,

    /// Wire payload could not be serialized or parsed
    #[error("wire payload error: {reason}")]
    Wire {
        /// Why the payload was rejected
        reason: String,
    },
}

impl SessionError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Fatal errors mean the session cannot proceed: a local provider
    /// failure or a call made out of sequence. Recoverable errors come
    /// from one bad payload; drop it and keep the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Crypto(err) => err.is_fatal(),
            Self::PeerKeyUnknown => true,
            Self::Wire { .. } => false,
        }
    }
}

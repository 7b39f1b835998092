//! Per-chat session state and the hybrid exchange calling sequence
//!
//! A [`ChatSession`] holds exactly one identity key pair, at most one peer
//! public key, and one cipher context. The exchange runs in a fixed order:
//! publish, learn the peer key, initiate or accept, then seal and open
//! messages. Both sides end up holding the same session key without it
//! ever crossing the wire unwrapped.

use murmur_crypto::{CryptoError, IdentityKeyPair, PeerPublicKey, SessionCipher, SessionKey};

use crate::error::SessionError;

/// State for one end-to-end encrypted chat session.
///
/// One instance per session; do not share across unrelated conversations.
/// Encryption and decryption borrow immutably, so a session behind a
/// shared reference can seal and open concurrently without risking nonce
/// reuse. Key installation is the only mutation.
pub struct ChatSession {
    identity: IdentityKeyPair,
    peer_key: Option<PeerPublicKey>,
    cipher: SessionCipher,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("peer_key_known", &self.peer_key.is_some())
            .field("session_key_active", &self.cipher.has_key())
            .finish()
    }
}

impl ChatSession {
    /// Create a session with a freshly generated identity key pair.
    pub fn new() -> Result<Self, SessionError> {
        let identity = IdentityKeyPair::generate()?;
        tracing::debug!("chat session identity generated");
        Ok(Self { identity, peer_key: None, cipher: SessionCipher::new() })
    }

    /// Our public key as transport text, for `PUBLISH_PUBLIC_KEY`.
    pub fn public_key_text(&self) -> String {
        self.identity.export_public_key()
    }

    /// Our public key as a PEM document.
    pub fn public_key_pem(&self) -> String {
        self.identity.export_public_key_pem()
    }

    /// Import and hold the peer's published public key.
    pub fn learn_peer_key(&mut self, text: &str) -> Result<(), SessionError> {
        self.peer_key = Some(PeerPublicKey::import(text)?);
        tracing::debug!("peer public key imported");
        Ok(())
    }

    /// Import and hold a peer public key published as PEM.
    pub fn learn_peer_key_pem(&mut self, pem: &str) -> Result<(), SessionError> {
        self.peer_key = Some(PeerPublicKey::from_pem(pem)?);
        tracing::debug!("peer public key imported from pem");
        Ok(())
    }

    /// Returns true once a session key is active.
    pub fn has_session_key(&self) -> bool {
        self.cipher.has_key()
    }

    /// Initiate the exchange: generate a session key and wrap it for the
    /// peer.
    ///
    /// Returns the `KEY_EXCHANGE` payload to send. Replaces any session
    /// key this side previously held.
    pub fn initiate_exchange(&mut self) -> Result<String, SessionError> {
        let peer = self.peer_key.as_ref().ok_or(SessionError::PeerKeyUnknown)?;

        // Install only after the wrap succeeds, so a failed exchange
        // leaves any previous session key usable
        let key = SessionKey::generate()?;
        let wrapped = peer.wrap_key(key.expose_for_wrap())?;
        self.cipher.install_key(key);

        tracing::debug!(payload_len = wrapped.len(), "session key wrapped for peer");
        Ok(wrapped)
    }

    /// Accept the exchange: unwrap the peer's wrapped key with our private
    /// key and install it as the active session key.
    pub fn accept_exchange(&mut self, wrapped: &str) -> Result<(), SessionError> {
        let raw = self.identity.unwrap_key(wrapped)?;
        let key = SessionKey::from_bytes(&raw)?;
        self.cipher.install_key(key);

        tracing::debug!("session key unwrapped and installed");
        Ok(())
    }

    /// Encrypt one message under the active session key.
    pub fn seal_message(&self, plaintext: &str) -> Result<String, SessionError> {
        Ok(self.cipher.encrypt(plaintext)?)
    }

    /// Decrypt one received envelope.
    ///
    /// Authentication failures are logged and surfaced as-is: the envelope
    /// is dropped, the session stays up, and no plaintext is produced.
    pub fn open_message(&self, envelope: &str) -> Result<String, SessionError> {
        match self.cipher.decrypt(envelope) {
            Ok(plaintext) => Ok(plaintext),
            Err(err @ CryptoError::Authentication) => {
                tracing::warn!("envelope rejected: authentication failed");
                Err(err.into())
            },
            Err(err) => Err(err.into()),
        }
    }
}

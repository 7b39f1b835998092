//! Text-safe transport encoding for binary key and ciphertext material
//!
//! Everything that crosses the wire (public keys, wrapped keys, message
//! envelopes) travels as standard padded base64 so it can ride alongside
//! ordinary chat text. `decode(encode(x)) == x` holds for every byte
//! sequence, including the empty one.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::CryptoError;

/// Encode binary material as transport-safe text.
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode transport text back into binary material.
///
/// Rejects non-alphabet characters and incorrect padding with
/// [`CryptoError::MalformedInput`].
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64.decode(text).map_err(|err| CryptoError::MalformedInput { reason: err.to_string() })
}

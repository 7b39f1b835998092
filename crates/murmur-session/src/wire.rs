//! JSON-framed wire payloads for the exchange
//!
//! The transport is out of scope, but the payload shapes are part of the
//! interoperability contract: three kinds, every field transport-encoded
//! text. JSON framing matches how chat applications typically carry these
//! alongside ordinary messages; the `type` tag keeps a payload from being
//! interpreted as a different kind than it was sent as.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// One payload crossing the wire between two session endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WirePayload {
    /// A party's exported public identity key (base64 SPKI).
    PublishPublicKey {
        /// Transport-encoded SubjectPublicKeyInfo
        public_key: String,
    },

    /// The session key, wrapped under the receiving party's public key.
    KeyExchange {
        /// Transport-encoded asymmetric ciphertext of the raw session key
        wrapped_key: String,
    },

    /// One encrypted chat message.
    Message {
        /// Transport-encoded envelope: nonce, ciphertext, tag
        envelope: String,
    },
}

impl WirePayload {
    /// Serialize for transmission.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|err| SessionError::Wire { reason: err.to_string() })
    }

    /// Parse a received payload.
    ///
    /// Unknown tags, missing fields, and malformed JSON are rejected
    /// without touching any cryptographic state.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        serde_json::from_str(text).map_err(|err| SessionError::Wire { reason: err.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn payload_json_shape() {
        let payload = WirePayload::Message { envelope: "AAEC".to_string() };
        assert_eq!(payload.to_json().unwrap(), r#"{"type":"message","envelope":"AAEC"}"#);
    }

    #[test]
    fn publish_public_key_roundtrip() {
        let payload = WirePayload::PublishPublicKey { public_key: "MIIBIjAN".to_string() };
        let parsed = WirePayload::from_json(&payload.to_json().unwrap()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let result = WirePayload::from_json(r#"{"type":"rekey","envelope":"AAEC"}"#);
        assert!(matches!(result, Err(SessionError::Wire { .. })));
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = WirePayload::from_json(r#"{"type":"key_exchange"}"#);
        assert!(matches!(result, Err(SessionError::Wire { .. })));
    }

    #[test]
    fn mismatched_field_is_rejected() {
        // A message envelope under a key_exchange tag must not parse
        let result = WirePayload::from_json(r#"{"type":"key_exchange","envelope":"AAEC"}"#);
        assert!(matches!(result, Err(SessionError::Wire { .. })));
    }

    #[test]
    fn plain_text_is_rejected() {
        let result = WirePayload::from_json("hello there");
        assert!(matches!(result, Err(SessionError::Wire { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_payload_roundtrip(text in any::<String>()) {
            for payload in [
                WirePayload::PublishPublicKey { public_key: text.clone() },
                WirePayload::KeyExchange { wrapped_key: text.clone() },
                WirePayload::Message { envelope: text.clone() },
            ] {
                let parsed = WirePayload::from_json(&payload.to_json().unwrap()).unwrap();
                prop_assert_eq!(parsed, payload);
            }
        }
    }
}

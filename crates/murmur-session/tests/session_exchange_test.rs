//! End-to-end exchange between two chat sessions
//!
//! Drives the full calling sequence through the wire payload types, the
//! way two real endpoints would: publish, key exchange, then encrypted
//! messages in both directions, plus the failure paths a hostile or
//! corrupted transport can trigger.

use murmur_crypto::CryptoError;
use murmur_session::{ChatSession, SessionError, WirePayload};

/// Run the publish + exchange sequence; `initiator` ends up with the key
/// it generated, `responder` with the unwrapped copy.
fn establish(initiator: &mut ChatSession, responder: &mut ChatSession) {
    let published = WirePayload::PublishPublicKey { public_key: responder.public_key_text() };
    let WirePayload::PublishPublicKey { public_key } =
        WirePayload::from_json(&published.to_json().unwrap()).unwrap()
    else {
        unreachable!("payload tag changed in transit");
    };

    initiator.learn_peer_key(&public_key).unwrap();
    let exchange = WirePayload::KeyExchange { wrapped_key: initiator.initiate_exchange().unwrap() };
    let WirePayload::KeyExchange { wrapped_key } =
        WirePayload::from_json(&exchange.to_json().unwrap()).unwrap()
    else {
        unreachable!("payload tag changed in transit");
    };

    responder.accept_exchange(&wrapped_key).unwrap();
}

#[test]
fn full_exchange_and_message_flow() {
    // Alice publishes her key; Bob initiates the exchange toward her
    let mut alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();

    assert!(alice.public_key_text().starts_with("MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A"));

    establish(&mut bob, &mut alice);
    assert!(alice.has_session_key());
    assert!(bob.has_session_key());

    // Alice seals "hello"; Bob recovers it exactly
    let envelope = alice.seal_message("hello").unwrap();
    let delivered = WirePayload::Message { envelope };
    let WirePayload::Message { envelope } =
        WirePayload::from_json(&delivered.to_json().unwrap()).unwrap()
    else {
        unreachable!("payload tag changed in transit");
    };
    assert_eq!(bob.open_message(&envelope).unwrap(), "hello");

    // And the reverse direction under the same session key
    let reply = bob.seal_message("hello to you, alice").unwrap();
    assert_eq!(alice.open_message(&reply).unwrap(), "hello to you, alice");
}

#[test]
fn tampered_envelope_is_dropped_not_decrypted() {
    let mut alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();
    establish(&mut bob, &mut alice);

    let envelope = alice.seal_message("do not touch").unwrap();

    // Corrupt one character of the transport text
    let mut chars: Vec<char> = envelope.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    let result = bob.open_message(&tampered);
    match result {
        Err(SessionError::Crypto(
            CryptoError::Authentication | CryptoError::MalformedInput { .. },
        )) => {},
        other => unreachable!("tampered envelope must be rejected, got {other:?}"),
    }

    // The session survives the rejected envelope
    let next = alice.seal_message("still here").unwrap();
    assert_eq!(bob.open_message(&next).unwrap(), "still here");
}

#[test]
fn envelope_from_another_session_is_rejected() {
    let mut alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();
    establish(&mut bob, &mut alice);

    let mut carol = ChatSession::new().unwrap();
    let mut dave = ChatSession::new().unwrap();
    establish(&mut dave, &mut carol);

    let envelope = carol.seal_message("for dave only").unwrap();
    let result = bob.open_message(&envelope);
    assert!(matches!(result, Err(SessionError::Crypto(CryptoError::Authentication))));
}

#[test]
fn wrapped_key_for_another_identity_is_rejected() {
    let alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();
    let mut mallory = ChatSession::new().unwrap();

    // Bob wraps toward Alice, but the payload is replayed at Mallory
    bob.learn_peer_key(&alice.public_key_text()).unwrap();
    let wrapped = bob.initiate_exchange().unwrap();

    let result = mallory.accept_exchange(&wrapped);
    assert!(matches!(result, Err(SessionError::Crypto(CryptoError::Decryption))));
    assert!(!mallory.has_session_key());
}

#[test]
fn reinitiating_replaces_the_session_key() {
    let mut alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();
    establish(&mut bob, &mut alice);

    let stale = alice.seal_message("under the first key").unwrap();

    // A second exchange installs a fresh key on both sides
    let wrapped = bob.initiate_exchange().unwrap();
    alice.accept_exchange(&wrapped).unwrap();

    // Old envelopes no longer authenticate; new traffic flows
    assert!(matches!(
        bob.open_message(&stale),
        Err(SessionError::Crypto(CryptoError::Authentication))
    ));
    let fresh = alice.seal_message("under the second key").unwrap();
    assert_eq!(bob.open_message(&fresh).unwrap(), "under the second key");
}

#[test]
fn pem_published_keys_complete_the_exchange() {
    let mut alice = ChatSession::new().unwrap();
    let mut bob = ChatSession::new().unwrap();

    let pem = alice.public_key_pem();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));

    // Same exchange as the base64 path, with the key published as PEM
    bob.learn_peer_key_pem(&pem).unwrap();
    let wrapped = bob.initiate_exchange().unwrap();
    alice.accept_exchange(&wrapped).unwrap();

    let envelope = bob.seal_message("pem route").unwrap();
    assert_eq!(alice.open_message(&envelope).unwrap(), "pem route");
}

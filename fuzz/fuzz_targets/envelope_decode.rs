//! Fuzz target for envelope decryption
//!
//! Feeds arbitrary transport text to `SessionCipher::decrypt` to find:
//! - Panics on malformed base64 or truncated envelopes
//! - Slicing errors around the nonce/ciphertext split
//! - Any path that returns plaintext without tag verification
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_crypto::{SessionCipher, SessionKey};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut cipher = SessionCipher::new();
    if let Ok(key) = SessionKey::from_bytes(&[0x42u8; 32]) {
        cipher.install_key(key);
    }

    // Hostile envelope: must error, never panic
    let _ = cipher.decrypt(text);
});

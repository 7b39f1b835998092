//! Fuzz target for peer public key import
//!
//! Imports arbitrary text as base64 SPKI and as PEM to find parser
//! crashes or keys that bypass the fixed-parameter validation.
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_crypto::PeerPublicKey;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = PeerPublicKey::import(text);
    let _ = PeerPublicKey::from_pem(text);
});

//! Fuzz target for wire payload parsing
//!
//! Parses arbitrary text as a JSON wire payload. Unknown tags, missing
//! fields, and malformed JSON must all be rejected without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_session::WirePayload;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = WirePayload::from_json(text);
});

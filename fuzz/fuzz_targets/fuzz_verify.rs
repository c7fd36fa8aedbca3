#![no_main]

use libfuzzer_sys::fuzz_target;
use threshold_schnorr::{verify_bytes, ED25519};

// Verification must return a bool for any input, never panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        let _ = verify_bytes(&ED25519, data, b"Hello world", data);
        return;
    }
    let (public_key, rest) = data.split_at(32);
    let (signature, message) = rest.split_at(64);
    let _ = verify_bytes(&ED25519, public_key, message, signature);
});

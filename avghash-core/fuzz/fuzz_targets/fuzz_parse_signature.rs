#![no_main]

//! Fuzz target for Signature parsing and compare_encoded()
//!
//! Run with: cargo +nightly fuzz run fuzz_parse_signature

use avghash_core::{compare_encoded, HasherConfig, Signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(sig) = text.parse::<Signature>() {
        assert_eq!(sig.to_string(), text);
        let restored = Signature::from_hex(&sig.to_hex(), sig.len()).unwrap();
        assert_eq!(restored, sig);
    }

    let (a, b) = text.split_at(text.len() / 2);
    if let Ok(distance) = compare_encoded(a, b, &HasherConfig::default()) {
        assert!(distance <= 64);
    }
});

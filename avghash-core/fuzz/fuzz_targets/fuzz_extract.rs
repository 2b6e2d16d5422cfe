#![no_main]

//! Fuzz target for extraction over arbitrary bitmaps
//!
//! The first two bytes pick the bitmap size, the next two the source region
//! handed to the resampler; the remainder fills the pixels. Extraction must
//! always yield exactly 64 bits, and an out-of-range region must fail with
//! an error, never panic.
//!
//! Run with: cargo +nightly fuzz run fuzz_extract

use avghash_core::{extract, AvgHashError, HasherConfig, ImageBackend, MemoryBackend, MemoryBitmap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [w, h, rw, rh, pixels @ ..] = data else {
        return;
    };
    let (width, height) = (*w as u32 % 64 + 1, *h as u32 % 64 + 1);
    let bitmap = MemoryBitmap::from_fn(width, height, |x, y| {
        let i = (y * width + x) as usize * 3;
        let at = |k: usize| pixels.get(i + k).copied().unwrap_or(0);
        [at(0), at(1), at(2)]
    });

    let config = HasherConfig::default();
    let signature = extract(&MemoryBackend, &bitmap, &config).unwrap();
    assert_eq!(signature.len(), 64);

    let (region_w, region_h) = (*rw as u32 % 128 + 1, *rh as u32 % 128 + 1);
    let result = MemoryBackend.resize_to_grid(&bitmap, region_w, region_h, 8);
    if region_w > width || region_h > height {
        assert!(matches!(result, Err(AvgHashError::Resize(_))));
    } else {
        assert!(result.is_ok());
    }
});

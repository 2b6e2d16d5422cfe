//! WebAssembly bindings for average-hash fingerprinting.
//!
//! Images are hashed client-side in the browser; only signatures need to
//! leave the page.

use avghash_core::{AverageHasher, HasherConfig, DEFAULT_DUPLICATE_THRESHOLD};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of hashing one image.
#[derive(Debug, Serialize, Deserialize)]
pub struct HashResult {
    /// '0'/'1' signature, empty on error
    pub signature: String,
    /// Packed hexadecimal signature, empty on error
    pub hex: String,
    /// Grid edge length used
    pub grid_size: u32,
    /// Error message if hashing failed
    pub error: Option<String>,
}

/// Result of comparing two signatures.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResult {
    /// Number of differing bits
    pub distance: Option<u32>,
    /// Whether the distance is within the threshold
    pub duplicate: bool,
    /// Threshold applied
    pub threshold: u32,
    /// Error message if comparison failed
    pub error: Option<String>,
}

/// Hash JPEG or PNG bytes.
///
/// # Arguments
/// * `image_bytes` - Encoded image
/// * `grid_size` - Grid edge length (0 selects the default of 8)
///
/// # Returns
/// A JSON string containing a [`HashResult`]
#[wasm_bindgen]
pub fn hash_image_wasm(image_bytes: &[u8], grid_size: u32) -> String {
    let result = match hash_internal(image_bytes, grid_size) {
        Ok(result) => result,
        Err(e) => HashResult {
            signature: String::new(),
            hex: String::new(),
            grid_size,
            error: Some(e),
        },
    };
    to_json(&result)
}

/// Compare two '0'/'1' signatures.
///
/// # Arguments
/// * `hash1`, `hash2` - Encoded signatures of equal length
/// * `grid_size` - Grid edge length they were produced with (0 = 8)
/// * `threshold` - Duplicate threshold (negative selects the default of 10)
///
/// # Returns
/// A JSON string containing a [`CompareResult`]
#[wasm_bindgen]
pub fn compare_signatures_wasm(
    hash1: &str,
    hash2: &str,
    grid_size: u32,
    threshold: i32,
) -> String {
    let threshold = u32::try_from(threshold).unwrap_or(DEFAULT_DUPLICATE_THRESHOLD);

    let result = match compare_internal(hash1, hash2, grid_size) {
        Ok(distance) => CompareResult {
            distance: Some(distance),
            duplicate: distance <= threshold,
            threshold,
            error: None,
        },
        Err(e) => CompareResult {
            distance: None,
            duplicate: false,
            threshold,
            error: Some(e),
        },
    };
    to_json(&result)
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn config_for(grid_size: u32) -> Result<HasherConfig, String> {
    if grid_size == 0 {
        return Ok(HasherConfig::default());
    }
    HasherConfig::with_grid_size(grid_size).map_err(|e| e.to_string())
}

fn hash_internal(image_bytes: &[u8], grid_size: u32) -> Result<HashResult, String> {
    let config = config_for(grid_size)?;
    let hasher = AverageHasher::new().with_config(config);
    let signature = hasher.hash_bytes(image_bytes).map_err(|e| e.to_string())?;

    Ok(HashResult {
        hex: signature.to_hex(),
        signature: signature.to_string(),
        grid_size: config.grid_size(),
        error: None,
    })
}

fn compare_internal(hash1: &str, hash2: &str, grid_size: u32) -> Result<u32, String> {
    let config = config_for(grid_size)?;
    avghash_core::compare_encoded(hash1, hash2, &config).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!(r#"{{"error":"Serialization error: {}"}}"#, e))
}

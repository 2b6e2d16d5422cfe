//! avghash core - average-hash perceptual fingerprints for raster images.
//!
//! This crate computes an "average hash" for an image and measures the
//! distance between two hashes, for near-duplicate detection that survives
//! re-encoding and minor resizing.
//!
//! # Features
//!
//! - Area-averaging downsample to a configurable N×N grid (default 8×8)
//! - Pinned BT.601 integer luma weights for cross-platform stable hashes
//! - Mean-threshold bit extraction and Hamming-style comparison
//! - Pluggable decode/resize backends behind [`ImageBackend`]
//! - `'0'`/`'1'` wire format, packed hex form and serde support
//!
//! # Example
//!
//! ```no_run
//! use avghash_core::{AverageHasher, DEFAULT_DUPLICATE_THRESHOLD};
//!
//! # fn example() -> avghash_core::Result<()> {
//! let hasher = AverageHasher::new();
//! let original = hasher.hash_file("photo.jpg")?;
//! let reencoded = hasher.hash_file("photo-q70.jpg")?;
//!
//! println!("{original}");
//! let distance = hasher.compare(&original, &reencoded)?;
//! assert!(distance <= DEFAULT_DUPLICATE_THRESHOLD);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod hasher;
pub mod signature;

// Re-export main types for convenience
pub use backend::{ImageBackend, MemoryBackend, MemoryBitmap};
pub use compare::{
    compare, compare_encoded, compare_with, is_duplicate, Distance, DEFAULT_DUPLICATE_THRESHOLD,
};
pub use config::HasherConfig;
pub use error::{AvgHashError, Result, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
pub use extract::extract;
pub use hasher::AverageHasher;
pub use signature::Signature;

#[cfg(feature = "image-backend")]
pub use backend::{FormatPolicy, ImageCrateBackend};

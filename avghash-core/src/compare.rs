//! Signature comparison.
//!
//! The distance between two signatures is the number of positions at which
//! their bits differ. Lower is more similar; `0` means identical. Deciding
//! what counts as a duplicate is left to the caller, with
//! [`DEFAULT_DUPLICATE_THRESHOLD`] as the conventional cut-off for 64-bit
//! signatures.

use crate::config::HasherConfig;
use crate::error::{AvgHashError, Result};
use crate::signature::Signature;

/// Count of differing bit positions, in `[0, N×N]`.
pub type Distance = u32;

/// Distances at or below this are usually duplicates for an 8×8 grid.
pub const DEFAULT_DUPLICATE_THRESHOLD: Distance = 10;

/// Compare two signatures produced with the default 8×8 grid.
pub fn compare(sig1: &Signature, sig2: &Signature) -> Result<Distance> {
    compare_with(sig1, sig2, &HasherConfig::default())
}

/// Compare two signatures produced with `config`.
///
/// Both signatures must be exactly `config.signature_len()` bits long,
/// otherwise [`AvgHashError::LengthMismatch`] is returned. Every position is
/// visited.
pub fn compare_with(
    sig1: &Signature,
    sig2: &Signature,
    config: &HasherConfig,
) -> Result<Distance> {
    let expected = config.signature_len();
    check_len(expected, sig1.len())?;
    check_len(expected, sig2.len())?;

    let distance = sig1
        .bits()
        .iter()
        .zip(sig2.bits())
        .filter(|(a, b)| a != b)
        .count();

    Ok(distance as Distance)
}

/// Compare two signatures in their `'0'`/`'1'` wire format.
///
/// Lengths are checked before the characters, so a short or long string is
/// always reported as [`AvgHashError::LengthMismatch`].
pub fn compare_encoded(hash1: &str, hash2: &str, config: &HasherConfig) -> Result<Distance> {
    let expected = config.signature_len();
    check_len(expected, hash1.chars().count())?;
    check_len(expected, hash2.chars().count())?;

    let sig1: Signature = hash1.parse()?;
    let sig2: Signature = hash2.parse()?;
    compare_with(&sig1, &sig2, config)
}

/// Whether two signatures are within `threshold` (default 10) of each other.
pub fn is_duplicate(
    sig1: &Signature,
    sig2: &Signature,
    config: &HasherConfig,
    threshold: Option<Distance>,
) -> Result<bool> {
    let threshold = threshold.unwrap_or(DEFAULT_DUPLICATE_THRESHOLD);
    Ok(compare_with(sig1, sig2, config)? <= threshold)
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AvgHashError::LengthMismatch { expected, actual });
    }
    Ok(())
}

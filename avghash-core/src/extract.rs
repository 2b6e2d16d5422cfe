//! Fingerprint extraction.
//!
//! # Algorithm
//!
//! 1. Area-average the source down to an N×N grid.
//! 2. Collapse every cell to BT.601 luma.
//! 3. Read the low 8 bits of each cell, x in the outer loop and y in the
//!    inner loop.
//! 4. Mean = integer sum / (N×N), truncated.
//! 5. Emit `1` for every cell at or above the mean, `0` otherwise.
//!
//! Thresholding against the grid's own mean makes the signature insensitive
//! to uniform brightness shifts. All arithmetic is integer, so the same
//! pixels produce the same bits on every platform.

use tracing::debug;

use crate::backend::ImageBackend;
use crate::config::HasherConfig;
use crate::error::{AvgHashError, Result};
use crate::signature::Signature;

/// Extract the average-hash signature of a decoded bitmap.
///
/// Fails with [`AvgHashError::InvalidImage`] for zero-sized bitmaps before
/// any resampling, and propagates [`AvgHashError::Resize`] from the backend.
pub fn extract<B: ImageBackend>(
    backend: &B,
    bitmap: &B::Bitmap,
    config: &HasherConfig,
) -> Result<Signature> {
    let (width, height) = backend.dimensions(bitmap);
    if width == 0 || height == 0 {
        return Err(AvgHashError::InvalidImage(format!(
            "image has zero dimension ({}x{})",
            width, height
        )));
    }

    let grid_size = config.grid_size();
    let grid = backend.resize_to_grid(bitmap, width, height, grid_size)?;
    let grid = backend.to_grayscale(grid);

    let intensities = read_intensities(backend, &grid, grid_size);
    let mean = mean_intensity(&intensities);
    let signature = threshold_bits(&intensities, mean)?;

    debug!(
        width,
        height,
        grid_size,
        mean,
        ones = signature.count_ones(),
        "Extracted average hash"
    );

    Ok(signature)
}

/// Low 8 bits of every grid cell, x outer and y inner.
pub fn read_intensities<B: ImageBackend>(
    backend: &B,
    grid: &B::Bitmap,
    grid_size: u32,
) -> Vec<u8> {
    let mut intensities = Vec::with_capacity((grid_size * grid_size) as usize);
    for x in 0..grid_size {
        for y in 0..grid_size {
            intensities.push((backend.color_at(grid, x, y) & 0xFF) as u8);
        }
    }
    intensities
}

/// Arithmetic mean with truncating integer division; `0` for no values.
pub fn mean_intensity(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|v| *v as u64).sum();
    (sum / values.len() as u64) as u8
}

/// One bit per value: set when the value is at or above `mean`.
pub fn threshold_bits(values: &[u8], mean: u8) -> Result<Signature> {
    Signature::from_bits(values.iter().map(|v| *v >= mean).collect())
}

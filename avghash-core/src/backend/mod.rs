//! Image decode/resize/grayscale capabilities consumed by the extractor.
//!
//! The extractor never touches a graphics library directly. It drives an
//! [`ImageBackend`], which owns the bitmap representation:
//!
//! - **`ImageCrateBackend`** - JPEG/PNG decoding through the `image` crate
//!   (feature `image-backend`, enabled by default)
//! - **`MemoryBackend`** - in-memory packed RGB bitmaps built in code
//!
//! Both backends share the area-averaging resampler and the pinned luma
//! weights defined here, so the same pixels hash identically through either.

mod memory;
#[cfg(feature = "image-backend")]
mod raster;

pub use memory::{MemoryBackend, MemoryBitmap};
#[cfg(feature = "image-backend")]
pub use raster::{FormatPolicy, ImageCrateBackend};

use crate::error::{AvgHashError, Result};

/// Capabilities the fingerprint extractor needs from an image library.
///
/// Implementations must be stateless with respect to individual bitmaps so a
/// single backend can serve concurrent extractions.
pub trait ImageBackend: Send + Sync {
    /// Decoded bitmap representation.
    type Bitmap;

    /// Decode encoded image bytes.
    ///
    /// Fails with [`AvgHashError::UnsupportedFormat`] for encodings the
    /// backend rejects and [`AvgHashError::InvalidImage`] for corrupt data.
    fn decode(&self, data: &[u8]) -> Result<Self::Bitmap>;

    /// Width and height in pixels.
    fn dimensions(&self, bitmap: &Self::Bitmap) -> (u32, u32);

    /// Area-averaging resize of the top-left `width`×`height` region of
    /// `bitmap` to exactly `grid_size`×`grid_size`.
    ///
    /// Fails with [`AvgHashError::Resize`] when the region extends past the
    /// bitmap or the canvas cannot be allocated.
    fn resize_to_grid(
        &self,
        bitmap: &Self::Bitmap,
        width: u32,
        height: u32,
        grid_size: u32,
    ) -> Result<Self::Bitmap>;

    /// Collapse every pixel to its luma value.
    fn to_grayscale(&self, bitmap: Self::Bitmap) -> Self::Bitmap;

    /// Packed color value at `(x, y)`; the low 8 bits carry the intensity
    /// once the bitmap is grayscale.
    fn color_at(&self, bitmap: &Self::Bitmap, x: u32, y: u32) -> u32;
}

/// ITU-R BT.601 luma with integer weights, truncated.
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Pack RGB channels as `0xRRGGBB`.
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack a `0xRRGGBB` value.
pub fn unpack_rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Reject a source region larger than the bitmap it is read from.
fn check_source_bounds(actual: (u32, u32), width: u32, height: u32) -> Result<()> {
    if width > actual.0 || height > actual.1 {
        return Err(AvgHashError::Resize(format!(
            "source region {}x{} exceeds {}x{} bitmap",
            width, height, actual.0, actual.1
        )));
    }
    Ok(())
}

/// Resample a `width`×`height` source to a `grid_size`×`grid_size` grid.
///
/// Each destination cell averages every source pixel inside its axis-aligned
/// source region, with channel averages rounded to nearest. When the source
/// is smaller than the grid along an axis, each cell covers exactly one source
/// pixel along that axis. Output is indexed `y * grid_size + x`.
pub fn area_average<F>(width: u32, height: u32, grid_size: u32, pixel: F) -> Result<Vec<[u8; 3]>>
where
    F: Fn(u32, u32) -> [u8; 3],
{
    if grid_size == 0 {
        return Err(AvgHashError::Resize("grid size must be positive".into()));
    }
    if width == 0 || height == 0 {
        return Err(AvgHashError::Resize(format!(
            "cannot resample an empty {}x{} source",
            width, height
        )));
    }

    let cells = (grid_size as usize)
        .checked_mul(grid_size as usize)
        .ok_or_else(|| AvgHashError::Resize("grid size overflows canvas".into()))?;

    let mut canvas = Vec::new();
    canvas.try_reserve_exact(cells).map_err(|e| {
        AvgHashError::Resize(format!(
            "unable to allocate {}x{} canvas: {}",
            grid_size, grid_size, e
        ))
    })?;

    for gy in 0..grid_size {
        let (y0, y1) = source_span(gy, grid_size, height);
        for gx in 0..grid_size {
            let (x0, x1) = source_span(gx, grid_size, width);

            let mut sum = [0u64; 3];
            let mut count = 0u64;
            for y in y0..y1 {
                for x in x0..x1 {
                    let rgb = pixel(x, y);
                    for (acc, channel) in sum.iter_mut().zip(rgb) {
                        *acc += channel as u64;
                    }
                    count += 1;
                }
            }

            canvas.push(sum.map(|acc| ((acc + count / 2) / count) as u8));
        }
    }

    Ok(canvas)
}

/// Source range `[start, end)` covered by destination cell `cell`.
fn source_span(cell: u32, grid_size: u32, len: u32) -> (u32, u32) {
    let start = (cell as u64 * len as u64 / grid_size as u64) as u32;
    let end = ((cell as u64 + 1) * len as u64 / grid_size as u64) as u32;
    (start, end.max(start + 1).min(len))
}

//! In-memory bitmaps for synthetic images.

use super::{area_average, luma, pack_rgb, unpack_rgb, ImageBackend};
use crate::error::{AvgHashError, Result};

/// Row-major bitmap of packed `0xRRGGBB` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl MemoryBitmap {
    /// Wrap packed pixels, indexed `y * width + x`.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AvgHashError::InvalidImage(format!(
                "{}x{} bitmap needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> [u8; 3],
    {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pack_rgb(f(x, y)))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Single-color bitmap.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::from_fn(width, height, |_, _| rgb)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Backend over [`MemoryBitmap`].
///
/// Bitmaps are built in code with [`MemoryBitmap::from_fn`] and friends;
/// encoded input is not accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryBackend;

impl ImageBackend for MemoryBackend {
    type Bitmap = MemoryBitmap;

    fn decode(&self, _data: &[u8]) -> Result<MemoryBitmap> {
        Err(AvgHashError::UnsupportedFormat(
            "in-memory backend does not decode encoded images".into(),
        ))
    }

    fn dimensions(&self, bitmap: &MemoryBitmap) -> (u32, u32) {
        (bitmap.width, bitmap.height)
    }

    fn resize_to_grid(
        &self,
        bitmap: &MemoryBitmap,
        width: u32,
        height: u32,
        grid_size: u32,
    ) -> Result<MemoryBitmap> {
        super::check_source_bounds(self.dimensions(bitmap), width, height)?;
        let canvas = area_average(width, height, grid_size, |x, y| {
            unpack_rgb(bitmap.pixel(x, y))
        })?;
        MemoryBitmap::new(
            grid_size,
            grid_size,
            canvas.into_iter().map(pack_rgb).collect(),
        )
        .map_err(|e| AvgHashError::Resize(e.to_string()))
    }

    fn to_grayscale(&self, mut bitmap: MemoryBitmap) -> MemoryBitmap {
        for px in bitmap.pixels.iter_mut() {
            *px = pack_rgb([luma(unpack_rgb(*px)); 3]);
        }
        bitmap
    }

    fn color_at(&self, bitmap: &MemoryBitmap, x: u32, y: u32) -> u32 {
        bitmap.pixel(x, y)
    }
}

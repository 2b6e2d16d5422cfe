//! Decoding through the `image` crate.

use image::{GenericImageView, ImageFormat, RgbImage};
use tracing::debug;

use super::{area_average, luma, pack_rgb, ImageBackend};
use crate::error::{AvgHashError, Result};

/// Encodings accepted by [`ImageCrateBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPolicy {
    allowed: Vec<ImageFormat>,
}

impl Default for FormatPolicy {
    /// JPEG and PNG only.
    fn default() -> Self {
        Self {
            allowed: vec![ImageFormat::Jpeg, ImageFormat::Png],
        }
    }
}

impl FormatPolicy {
    pub fn new(allowed: Vec<ImageFormat>) -> Self {
        Self { allowed }
    }

    /// Every format the `image` features of this build can decode.
    pub fn any() -> Self {
        Self::new(vec![
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::Gif,
            ImageFormat::WebP,
            ImageFormat::Pnm,
        ])
    }

    pub fn allows(&self, format: ImageFormat) -> bool {
        self.allowed.contains(&format)
    }
}

/// Backend decoding JPEG/PNG (by default) into RGB8 buffers.
#[derive(Debug, Clone, Default)]
pub struct ImageCrateBackend {
    policy: FormatPolicy,
}

impl ImageCrateBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FormatPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FormatPolicy {
        &self.policy
    }

    /// Sniff the encoding of `data` and check it against the policy.
    pub fn detect_format(&self, data: &[u8]) -> Result<ImageFormat> {
        let format = image::guess_format(data).map_err(|_| {
            AvgHashError::UnsupportedFormat("unrecognized image encoding".into())
        })?;

        if !self.policy.allows(format) {
            return Err(AvgHashError::UnsupportedFormat(
                format.to_mime_type().to_string(),
            ));
        }

        Ok(format)
    }
}

impl ImageBackend for ImageCrateBackend {
    type Bitmap = RgbImage;

    fn decode(&self, data: &[u8]) -> Result<RgbImage> {
        let format = self.detect_format(data)?;
        let image = image::load_from_memory_with_format(data, format).map_err(|e| {
            AvgHashError::InvalidImage(format!("Failed to decode image: {}", e))
        })?;

        debug!(
            format = format.to_mime_type(),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Ok(image.to_rgb8())
    }

    fn dimensions(&self, bitmap: &RgbImage) -> (u32, u32) {
        bitmap.dimensions()
    }

    fn resize_to_grid(
        &self,
        bitmap: &RgbImage,
        width: u32,
        height: u32,
        grid_size: u32,
    ) -> Result<RgbImage> {
        super::check_source_bounds(bitmap.dimensions(), width, height)?;
        let canvas = area_average(width, height, grid_size, |x, y| bitmap.get_pixel(x, y).0)?;
        let raw: Vec<u8> = canvas.into_iter().flatten().collect();

        RgbImage::from_raw(grid_size, grid_size, raw).ok_or_else(|| {
            AvgHashError::Resize(format!(
                "unable to copy into {}x{} canvas",
                grid_size, grid_size
            ))
        })
    }

    fn to_grayscale(&self, mut bitmap: RgbImage) -> RgbImage {
        for px in bitmap.pixels_mut() {
            px.0 = [luma(px.0); 3];
        }
        bitmap
    }

    fn color_at(&self, bitmap: &RgbImage, x: u32, y: u32) -> u32 {
        pack_rgb(bitmap.get_pixel(x, y).0)
    }
}

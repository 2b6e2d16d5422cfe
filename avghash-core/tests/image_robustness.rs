//! Robustness tests for the average hash over real encoded images.
//!
//! These tests verify that signatures stay close after re-encoding, resizing
//! and brightness changes, and stay far apart for unrelated images.

use avghash_core::{
    AverageHasher, AvgHashError, FormatPolicy, HasherConfig, ImageCrateBackend,
    DEFAULT_DUPLICATE_THRESHOLD,
};
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// With a 64-bit signature, 10 bits = ~15% difference.
const SIMILARITY_THRESHOLD: u32 = DEFAULT_DUPLICATE_THRESHOLD;

/// Threshold for more aggressive transformations (crop).
const AGGRESSIVE_THRESHOLD: u32 = 15;

/// Create a test image with recognizable patterns.
fn create_test_image(width: u32, height: u32) -> RgbImage {
    let mut img = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        let b = (((x + y) as f32 / (width + height) as f32) * 200.0) as u8;

        let pattern = if (x / 20 + y / 20) % 2 == 0 { 30 } else { 0 };
        *pixel = Rgb([r.saturating_add(pattern), g, b]);
    }

    img
}

/// Checkerboard of `cell`-pixel black and white squares.
fn checkerboard(size: u32, cell: u32, inverted: bool) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        let white = ((x / cell + y / cell) % 2 == 0) != inverted;
        if white {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    })
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).expect("encoding failed");
    buffer.into_inner()
}

/// Compress an image to JPEG with the specified quality (1-100).
fn compress_jpeg(img: &DynamicImage, quality: u8) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    img.write_with_encoder(encoder).expect("JPEG encoding failed");
    buffer.into_inner()
}

/// Resize an image by the given percentage.
fn resize_image(img: &DynamicImage, percentage: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    img.resize_exact(
        (width * percentage) / 100,
        (height * percentage) / 100,
        image::imageops::FilterType::Lanczos3,
    )
}

/// Crop the image by removing a percentage from each edge.
fn crop_image(img: &DynamicImage, edge_percentage: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let crop_x = (width * edge_percentage) / 100;
    let crop_y = (height * edge_percentage) / 100;
    img.crop_imm(crop_x, crop_y, width - 2 * crop_x, height - 2 * crop_y)
}

fn distance_between(original: &[u8], transformed: &[u8]) -> u32 {
    let hasher = AverageHasher::new();
    let sig1 = hasher.hash_bytes(original).expect("Failed to hash original");
    let sig2 = hasher
        .hash_bytes(transformed)
        .expect("Failed to hash transformed");
    hasher.compare(&sig1, &sig2).expect("Distance calculation failed")
}

// ============================================================================
// Re-encoding Tests
// ============================================================================

#[test]
fn test_png_roundtrip_is_identical() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let hasher = AverageHasher::new();

    let direct = hasher.hash_dynamic(&original).unwrap();
    let decoded = hasher
        .hash_bytes(&encode(&original, ImageFormat::Png))
        .unwrap();

    assert_eq!(hasher.compare(&direct, &decoded).unwrap(), 0);
}

#[test]
fn test_jpeg_compression_90() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &compress_jpeg(&original, 90),
    );
    println!("JPEG 90% quality - distance: {}", distance);
    assert!(distance <= SIMILARITY_THRESHOLD);
}

#[test]
fn test_jpeg_compression_50() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &compress_jpeg(&original, 50),
    );
    println!("JPEG 50% quality - distance: {}", distance);
    assert!(
        distance <= SIMILARITY_THRESHOLD,
        "JPEG 50% compression should preserve similarity (distance: {}, threshold: {})",
        distance,
        SIMILARITY_THRESHOLD
    );
}

// ============================================================================
// Resize Tests
// ============================================================================

#[test]
fn test_resize_50_percent() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let resized = resize_image(&original, 50);
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &encode(&resized, ImageFormat::Png),
    );
    println!("Resize 50% - distance: {}", distance);
    assert!(distance <= SIMILARITY_THRESHOLD);
}

#[test]
fn test_resize_150_percent() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let resized = resize_image(&original, 150);
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &encode(&resized, ImageFormat::Png),
    );
    println!("Resize 150% - distance: {}", distance);
    assert!(distance <= SIMILARITY_THRESHOLD);
}

#[test]
fn test_resize_then_compress() {
    let original = DynamicImage::ImageRgb8(create_test_image(512, 384));
    let transformed = resize_image(&original, 60);
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &compress_jpeg(&transformed, 80),
    );
    println!("Resize 60% + JPEG 80% - distance: {}", distance);
    assert!(distance <= SIMILARITY_THRESHOLD);
}

#[test]
fn test_crop_10_percent() {
    let original = DynamicImage::ImageRgb8(create_test_image(256, 256));
    let cropped = crop_image(&original, 10);
    let distance = distance_between(
        &encode(&original, ImageFormat::Png),
        &encode(&cropped, ImageFormat::Png),
    );
    println!("Crop 10% - distance: {}", distance);
    assert!(distance <= AGGRESSIVE_THRESHOLD);
}

// ============================================================================
// Brightness Tests
// ============================================================================

#[test]
fn test_brightness_halved() {
    let original = create_test_image(256, 256);
    let mut darker = original.clone();
    for pixel in darker.pixels_mut() {
        pixel.0 = pixel.0.map(|c| c / 2);
    }

    let hasher = AverageHasher::new();
    let sig1 = hasher.extract(&original).unwrap();
    let sig2 = hasher.extract(&darker).unwrap();
    let distance = hasher.compare(&sig1, &sig2).unwrap();
    println!("Brightness 50% - distance: {}", distance);
    assert!(distance <= SIMILARITY_THRESHOLD);
}

// ============================================================================
// Discrimination Tests
// ============================================================================

#[test]
fn test_perpendicular_gradients_differ() {
    let horizontal = RgbImage::from_fn(256, 256, |x, _| Rgb([x as u8; 3]));
    let vertical = RgbImage::from_fn(256, 256, |_, y| Rgb([y as u8; 3]));

    let hasher = AverageHasher::new();
    let h = hasher.extract(&horizontal).unwrap();
    let v = hasher.extract(&vertical).unwrap();

    assert_eq!(hasher.compare(&h, &v).unwrap(), 32);
    assert!(!hasher.is_duplicate(&h, &v, None).unwrap());
}

#[test]
fn test_inverted_checkerboard_is_maximally_distant() {
    let hasher = AverageHasher::new();
    let a = hasher
        .hash_bytes(&encode(
            &DynamicImage::ImageRgb8(checkerboard(256, 32, false)),
            ImageFormat::Png,
        ))
        .unwrap();
    let b = hasher
        .hash_bytes(&encode(
            &DynamicImage::ImageRgb8(checkerboard(256, 32, true)),
            ImageFormat::Png,
        ))
        .unwrap();

    assert_eq!(hasher.compare(&a, &b).unwrap(), 64);
}

#[test]
fn test_pattern_vs_solid_exceeds_threshold() {
    let hasher = AverageHasher::new();
    let pattern = hasher.extract(&create_test_image(256, 256)).unwrap();
    let solid = hasher
        .extract(&RgbImage::from_pixel(256, 256, Rgb([0, 0, 0])))
        .unwrap();

    let distance = hasher.compare(&pattern, &solid).unwrap();
    println!("Pattern vs solid - distance: {}", distance);
    assert!(distance > SIMILARITY_THRESHOLD);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_solid_png_sets_every_bit() {
    let solid = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 25, Rgb([90, 160, 30])));
    let sig = AverageHasher::new()
        .hash_bytes(&encode(&solid, ImageFormat::Png))
        .unwrap();
    assert_eq!(sig.to_string(), "1".repeat(64));
}

#[test]
fn test_tiny_image_upsampled() {
    let tiny = RgbImage::from_fn(2, 2, |x, y| Rgb([((x + y) * 100) as u8; 3]));
    let sig = AverageHasher::new().extract(&tiny).unwrap();
    assert_eq!(sig.len(), 64);
}

#[test]
fn test_larger_grid() {
    let hasher = AverageHasher::new().with_config(HasherConfig::with_grid_size(16).unwrap());
    let sig = hasher.extract(&create_test_image(300, 200)).unwrap();
    assert_eq!(sig.len(), 256);
    assert_eq!(sig.to_hex().len(), 64);
}

#[test]
fn test_hash_file_formats() {
    let dir = tempfile::tempdir().unwrap();
    let img = DynamicImage::ImageRgb8(create_test_image(128, 128));

    let png = dir.path().join("image.png");
    let jpg = dir.path().join("image.jpg");
    let gif = dir.path().join("image.gif");
    std::fs::write(&png, encode(&img, ImageFormat::Png)).unwrap();
    std::fs::write(&jpg, compress_jpeg(&img, 95)).unwrap();
    std::fs::write(
        &gif,
        encode(&DynamicImage::ImageRgba8(img.to_rgba8()), ImageFormat::Gif),
    )
    .unwrap();

    let hasher = AverageHasher::new();
    let a = hasher.hash_file(&png).unwrap();
    let b = hasher.hash_file(&jpg).unwrap();
    assert!(hasher.is_duplicate(&a, &b, None).unwrap());

    assert!(matches!(
        hasher.hash_file(&gif),
        Err(AvgHashError::UnsupportedFormat(_))
    ));

    let permissive = AverageHasher::with_backend(
        ImageCrateBackend::with_policy(FormatPolicy::any()),
        HasherConfig::default(),
    );
    assert!(permissive.hash_file(&gif).is_ok());
}

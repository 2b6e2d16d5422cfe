//! Stateless hashing service bundling a backend with a grid configuration.
//!
//! # Usage
//!
//! ```no_run
//! use avghash_core::AverageHasher;
//!
//! let hasher = AverageHasher::new();
//! let hash1 = hasher.hash_file("1.jpg").unwrap();
//! let hash2 = hasher.hash_file("2.jpg").unwrap();
//!
//! let distance = hasher.compare(&hash1, &hash2).unwrap();
//! let duplicate = distance <= 10;
//! ```

use std::path::Path;

use tracing::debug;

use crate::backend::ImageBackend;
use crate::compare::{self, Distance};
use crate::config::HasherConfig;
use crate::error::{AvgHashError, Result};
use crate::extract;
use crate::signature::Signature;

#[cfg(feature = "image-backend")]
use crate::backend::ImageCrateBackend;

/// Average-hash extractor and comparator over an [`ImageBackend`].
#[derive(Debug, Clone, Default)]
pub struct AverageHasher<B> {
    backend: B,
    config: HasherConfig,
}

#[cfg(feature = "image-backend")]
impl AverageHasher<ImageCrateBackend> {
    /// JPEG/PNG hasher with the default 8×8 grid.
    pub fn new() -> Self {
        Self::with_backend(ImageCrateBackend::new(), HasherConfig::default())
    }

    /// Hash an image already decoded by the `image` crate.
    pub fn hash_dynamic(&self, image: &image::DynamicImage) -> Result<Signature> {
        self.extract(&image.to_rgb8())
    }
}

impl<B: ImageBackend> AverageHasher<B> {
    pub fn with_backend(backend: B, config: HasherConfig) -> Self {
        Self { backend, config }
    }

    /// Same backend, different grid.
    pub fn with_config(self, config: HasherConfig) -> Self {
        Self { config, ..self }
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract the signature of a decoded bitmap.
    pub fn extract(&self, bitmap: &B::Bitmap) -> Result<Signature> {
        extract::extract(&self.backend, bitmap, &self.config)
    }

    /// Decode `data` with the backend and extract its signature.
    pub fn hash_bytes(&self, data: &[u8]) -> Result<Signature> {
        if data.is_empty() {
            return Err(AvgHashError::InvalidImage("empty image data".into()));
        }
        let bitmap = self.backend.decode(data)?;
        self.extract(&bitmap)
    }

    /// Read, decode and hash the file at `path`.
    pub fn hash_file(&self, path: impl AsRef<Path>) -> Result<Signature> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AvgHashError::InvalidImage(format!(
                "File does not exist: `{}`",
                path.display()
            )));
        }

        let data = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "Read image file");
        self.hash_bytes(&data)
    }

    /// Distance between two signatures of this hasher's grid size.
    pub fn compare(&self, sig1: &Signature, sig2: &Signature) -> Result<Distance> {
        compare::compare_with(sig1, sig2, &self.config)
    }

    /// Distance between two `'0'`/`'1'` encoded signatures.
    pub fn compare_encoded(&self, hash1: &str, hash2: &str) -> Result<Distance> {
        compare::compare_encoded(hash1, hash2, &self.config)
    }

    /// Whether two signatures are within `threshold` (default 10).
    pub fn is_duplicate(
        &self,
        sig1: &Signature,
        sig2: &Signature,
        threshold: Option<Distance>,
    ) -> Result<bool> {
        compare::is_duplicate(sig1, sig2, &self.config, threshold)
    }
}

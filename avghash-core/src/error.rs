use thiserror::Error;

/// Default grid edge length (8×8 = 64-bit signatures).
pub const DEFAULT_GRID_SIZE: u32 = 8;

/// Largest accepted grid edge length (64×64 = 4096-bit signatures).
pub const MAX_GRID_SIZE: u32 = 64;

#[derive(Error, Debug)]
pub enum AvgHashError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Signature length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AvgHashError>;

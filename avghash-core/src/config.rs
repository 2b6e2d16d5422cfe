//! Hasher configuration.

use crate::error::{AvgHashError, Result, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Grid configuration shared by extraction and comparison.
///
/// Signatures are only comparable when both were produced with the same grid
/// size, so the comparator checks lengths against this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    grid_size: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl HasherConfig {
    /// Create a configuration with an N×N grid, `1 <= N <= MAX_GRID_SIZE`.
    pub fn with_grid_size(grid_size: u32) -> Result<Self> {
        if grid_size == 0 || grid_size > MAX_GRID_SIZE {
            return Err(AvgHashError::InvalidConfig(format!(
                "grid size must be between 1 and {}, got {}",
                MAX_GRID_SIZE, grid_size
            )));
        }
        Ok(Self { grid_size })
    }

    /// Grid edge length N.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Signature length in bits (N×N).
    pub fn signature_len(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }
}

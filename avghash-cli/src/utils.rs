//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use avghash_core::{AverageHasher, FormatPolicy, HasherConfig, ImageCrateBackend, Signature};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub type Hasher = AverageHasher<ImageCrateBackend>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the hasher from command-line options.
pub fn build_hasher(grid_size: u32, any_format: bool) -> Result<Hasher> {
    let config = HasherConfig::with_grid_size(grid_size)?;
    let policy = if any_format {
        FormatPolicy::any()
    } else {
        FormatPolicy::default()
    };
    debug!(grid_size, any_format, "Configured hasher");
    Ok(AverageHasher::with_backend(
        ImageCrateBackend::with_policy(policy),
        config,
    ))
}

/// Hash the image at `path`.
pub fn hash_path(hasher: &Hasher, path: &Path) -> Result<Signature> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), "Read image file");
    hasher
        .hash_bytes(&data)
        .with_context(|| format!("Failed to hash {}", path.display()))
}

/// Whether `arg` looks like an encoded signature rather than a path.
pub fn is_bit_string(arg: &str) -> bool {
    !arg.is_empty() && arg.chars().all(|c| c == '0' || c == '1')
}

/// Resolve a compare operand: an existing file is hashed, a bit string is
/// parsed as-is.
pub fn resolve_operand(hasher: &Hasher, arg: &str) -> Result<Signature> {
    let path = Path::new(arg);
    if path.is_file() {
        return hash_path(hasher, path);
    }
    if is_bit_string(arg) {
        debug!(bits = arg.len(), "Using literal signature");
        return Ok(arg.parse::<Signature>()?);
    }
    bail!("Failed to read file: {}", arg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bit_string() {
        assert!(is_bit_string("0101"));
        assert!(!is_bit_string(""));
        assert!(!is_bit_string("01a"));
        assert!(!is_bit_string("image.png"));
    }

    #[test]
    fn test_build_hasher_validates_grid() {
        assert_eq!(build_hasher(8, false).unwrap().config().signature_len(), 64);
        assert!(build_hasher(0, false).is_err());
    }

    #[test]
    fn test_resolve_operand() {
        let hasher = build_hasher(2, false).unwrap();
        let sig = resolve_operand(&hasher, "1001").unwrap();
        assert_eq!(sig.to_string(), "1001");

        let err = resolve_operand(&hasher, "missing.png").unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_hash_path_unreadable() {
        let hasher = build_hasher(8, false).unwrap();
        let dir = tempfile::tempdir().unwrap();

        for path in [dir.path().join("missing.png"), dir.path().to_path_buf()] {
            let err = hash_path(&hasher, &path).unwrap_err();
            assert!(format!("{err:#}").contains("Failed to read file"));
            assert_eq!(crate::exit_codes::ExitCode::from_anyhow(&err).code, 66);
        }
    }
}

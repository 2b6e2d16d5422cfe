//! Hash command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::utils::{self, Hasher};
use crate::OutputFormat;

/// One hashed file in JSON output.
#[derive(Debug, Serialize)]
struct HashRecord {
    file: String,
    signature: String,
    hex: String,
    grid_size: u32,
}

/// Execute the hash command.
///
/// Stops at the first file that cannot be hashed. With `quiet` nothing is
/// printed and only the exit status reports success.
pub fn execute(
    hasher: &Hasher,
    files: &[PathBuf],
    hex: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let mut records = Vec::with_capacity(files.len());

    for file in files {
        let signature = utils::hash_path(hasher, file)?;
        info!(path = %file.display(), ones = signature.count_ones(), "Hashed image");

        records.push(HashRecord {
            file: file.display().to_string(),
            signature: signature.to_string(),
            hex: signature.to_hex(),
            grid_size: hasher.config().grid_size(),
        });
    }

    if quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Text => {
            for record in &records {
                let encoded = if hex { &record.hex } else { &record.signature };
                println!("{}  {}", encoded, record.file);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)
                .context("Failed to serialize hashes to JSON")?;
            println!("{}", json);
        }
    }

    Ok(())
}

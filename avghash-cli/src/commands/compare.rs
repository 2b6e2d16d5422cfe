//! Compare command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::utils::{self, Hasher};
use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct CompareReport {
    first: String,
    second: String,
    distance: u32,
    threshold: u32,
    duplicate: bool,
    grid_size: u32,
}

/// Execute the compare command and return whether the inputs are duplicates.
pub fn execute(
    hasher: &Hasher,
    first: &str,
    second: &str,
    threshold: u32,
    format: OutputFormat,
    quiet: bool,
) -> Result<bool> {
    let sig1 = utils::resolve_operand(hasher, first)?;
    let sig2 = utils::resolve_operand(hasher, second)?;

    let distance = hasher
        .compare(&sig1, &sig2)
        .context("Failed to compare signatures")?;
    let duplicate = distance <= threshold;

    info!(distance, threshold, duplicate, "Compared signatures");

    if quiet {
        return Ok(duplicate);
    }

    match format {
        OutputFormat::Json => {
            let report = CompareReport {
                first: sig1.to_string(),
                second: sig2.to_string(),
                distance,
                threshold,
                duplicate,
                grid_size: hasher.config().grid_size(),
            };
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize comparison to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let max = hasher.config().signature_len();
            println!("Difference between {} and {}: {}", sig1, sig2, distance);
            if duplicate {
                println!(
                    "{} {}",
                    "DUPLICATE".green().bold(),
                    format!("({}/{} bits differ, threshold {})", distance, max, threshold).dimmed()
                );
            } else {
                println!(
                    "{} {}",
                    "DIFFERENT".red().bold(),
                    format!("({}/{} bits differ, threshold {})", distance, max, threshold).dimmed()
                );
            }
        }
    }

    Ok(duplicate)
}

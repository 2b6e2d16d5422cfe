//! avghash CLI - average-hash image fingerprinting tool.

use std::path::PathBuf;

use anyhow::Result;
use avghash_core::{DEFAULT_DUPLICATE_THRESHOLD, DEFAULT_GRID_SIZE};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::{ExitCode, EXIT_CODES_HELP};

#[derive(Parser)]
#[command(name = "avghash")]
#[command(author, version, about = "Average-hash image fingerprinting", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Grid edge length N; signatures are N×N bits
    #[arg(long, global = true, env = "AVGHASH_GRID_SIZE", default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u32,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Accept GIF, WebP and PNM input in addition to JPEG and PNG
    #[arg(long, global = true)]
    any_format: bool,

    /// Print nothing; report through the exit status only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the average hash of one or more images
    Hash {
        /// Images to hash (JPEG or PNG)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Print the packed hexadecimal form instead of the bit string
        #[arg(long)]
        hex: bool,
    },

    /// Compare two images or '0'/'1' signatures
    Compare {
        /// Image path or signature
        #[arg(value_name = "A")]
        first: String,

        /// Image path or signature
        #[arg(value_name = "B")]
        second: String,

        /// Maximum distance still reported as a duplicate
        #[arg(
            short,
            long,
            env = "AVGHASH_THRESHOLD",
            default_value_t = DEFAULT_DUPLICATE_THRESHOLD
        )]
        threshold: u32,

        /// Exit with status 2 when the inputs are not duplicates
        #[arg(long)]
        fail_on_different: bool,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    let hasher = utils::build_hasher(cli.grid_size, cli.any_format)?;

    match cli.command {
        Commands::Hash { files, hex } => {
            commands::hash::execute(&hasher, &files, hex, cli.format, cli.quiet)?;
            Ok(ExitCode::success())
        }
        Commands::Compare {
            first,
            second,
            threshold,
            fail_on_different,
        } => {
            let duplicate = commands::compare::execute(
                &hasher, &first, &second, threshold, cli.format, cli.quiet,
            )?;
            if fail_on_different && !duplicate {
                Ok(ExitCode::not_duplicate())
            } else {
                Ok(ExitCode::success())
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);

    let exit = run(cli).unwrap_or_else(|err| ExitCode::from_anyhow(&err));

    if let Some(message) = &exit.message {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
    std::process::exit(exit.code);
}

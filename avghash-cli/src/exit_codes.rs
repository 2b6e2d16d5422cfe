//! Exit codes following sysexits.h conventions.
//!
//! These codes let scripts tell a "not a duplicate" verdict apart from
//! unreadable input or undecodable images.

use avghash_core::AvgHashError;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Images compared as different under `--fail-on-different`.
pub const NOT_DUPLICATE: i32 = 2;

/// Command line usage error (invalid arguments, bad grid size).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (unsupported or corrupt image, malformed signature).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Help text appended to `--help`.
pub const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success (or duplicate verdict)
  1   General error
  2   Images differ (with --fail-on-different)
  64  Usage error (invalid grid size)
  65  Data error (unsupported/corrupt image, malformed signature)
  66  Input file not found or unreadable";

/// Represents an exit code with optional error context.
#[derive(Debug)]
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub const fn not_duplicate() -> Self {
        Self {
            code: NOT_DUPLICATE,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<AvgHashError>())
            .map(|err| match err {
                AvgHashError::InvalidImage(_)
                | AvgHashError::UnsupportedFormat(_)
                | AvgHashError::InvalidSignature(_)
                | AvgHashError::LengthMismatch { .. } => DATA_ERROR,
                AvgHashError::InvalidConfig(_) => USAGE_ERROR,
                AvgHashError::Io(_) => INPUT_ERROR,
                AvgHashError::Resize(_) => GENERAL_ERROR,
            })
            .unwrap_or_else(|| {
                if message.contains("Failed to read file") {
                    INPUT_ERROR
                } else {
                    GENERAL_ERROR
                }
            });

        Self {
            code,
            message: Some(message),
        }
    }
}

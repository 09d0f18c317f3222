//! CLI support for gqt-lang
//!
//! Provides programmatic access to the `gqt` command so it can be embedded in
//! other tools.

mod check;
mod log;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use self::log::{GQT_LOG, init_logger};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("parse error at {0}")]
    Parse(#[from] crate::ParseError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no input provided. Pass a template or pipe one to stdin.")]
    NoInput,
}

//! Defines the custom error types for the contact-identity crate.
//!
//! Identifier classification itself never errors: malformed or empty input
//! degrades to empty/neutral values by design. The error type below covers
//! the configuration boundary only.

use std::io;
use thiserror::Error;

/// The primary error type for this crate.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a TOML configuration file.
    #[error("TOML Parse Error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

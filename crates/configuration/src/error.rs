//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::environment::Variable;

/// The errors that can be thrown when parsing a configuration file.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported configuration version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when writing a configuration file.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("unable to serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a runtime one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid value {value:?} for {variable}: {message}")]
    InvalidEnvironmentValue {
        variable: Variable,
        value: String,
        message: String,
    },
    #[error("{0}")]
    Environment(crate::environment::Error),
    #[error("the minimum attribute length must be at least 1")]
    ZeroMinimumAttributeLength,
}

//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes.

use std::fmt;

use crate::constants::exit_codes;

/// Startup errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Invalid user input
    InvalidInput { message: String, hint: String },

    /// Config or database unusable
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidInput { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::Config(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create an InvalidInput error with message and hint.
    pub fn invalid_input(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::Config(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::Config(_) => exit_codes::CONFIG_FAILED,
        }
    }
}

/// Exit code for an arbitrary error, honoring `CliError` anywhere in the chain.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map(CliError::exit_code)
        .unwrap_or(1)
}

//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! and the mapping from core vault errors onto the same codes.

use std::fmt;

use strongbox_core::VaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, vault, record)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong master password)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error that reached the top level.
pub fn vault_exit_code(err: &VaultError) -> i32 {
    match err {
        VaultError::WrongMasterPasswordOrCorruptVault => exit_codes::AUTH_FAILED,
        VaultError::CorruptVault(_)
        | VaultError::UnsupportedVersion(_)
        | VaultError::MalformedEncoding(_)
        | VaultError::DecryptionFailed => exit_codes::INTEGRITY_FAILED,
        VaultError::IndexOutOfRange { .. } => exit_codes::NOT_FOUND,
        VaultError::WeakCredential | VaultError::Validation(_) | VaultError::InvalidInput(_) => {
            exit_codes::INVALID_INPUT
        }
        VaultError::StorageWriteFailed(_)
        | VaultError::StorageReadFailed(_)
        | VaultError::Crypto(_) => exit_codes::FAILURE,
    }
}

/// Exit code for any error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(vault_err) = err.downcast_ref::<VaultError>() {
        return vault_exit_code(vault_err);
    }
    exit_codes::FAILURE
}

/// Contextual hint for common failures.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<VaultError>()? {
        VaultError::WrongMasterPasswordOrCorruptVault => Some(
            "Hint: Check your master password. Set STRONGBOX_PASSWORD for non-interactive use.",
        ),
        VaultError::CorruptVault(_) => {
            Some("Hint: Restore the vault file from a backup; the current file cannot be trusted.")
        }
        VaultError::UnsupportedVersion(_) => {
            Some("Hint: This vault was written by a newer strongbox. Upgrade to open it.")
        }
        VaultError::WeakCredential => Some("Hint: The master password cannot be empty."),
        _ => None,
    }
}

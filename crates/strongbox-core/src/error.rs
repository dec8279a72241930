//! Error types for Strongbox core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-friendly messages.

use thiserror::Error;

/// Result type alias for Strongbox operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Strongbox operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Master password is empty
    #[error("Master password cannot be empty")]
    WeakCredential,

    /// Text is not valid for the byte encoding
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Authentication failed while opening a ciphertext
    #[error("Decryption failed")]
    DecryptionFailed,

    /// A field failed to decrypt during load
    #[error("Wrong master password or corrupt vault")]
    WrongMasterPasswordOrCorruptVault,

    /// Envelope is structurally invalid
    #[error("Corrupt vault: {0}")]
    CorruptVault(String),

    /// Envelope was written by a newer format
    #[error("Unsupported vault format version {0}")]
    UnsupportedVersion(u32),

    /// Record index outside the store
    #[error("Index {index} out of range (vault holds {size} records)")]
    IndexOutOfRange { index: usize, size: usize },

    /// Destination could not be written
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    /// Source could not be read
    #[error("Storage read failed: {0}")]
    StorageReadFailed(String),

    /// Record data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid caller input (salt length, KDF parameters)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cryptographic backend error (RNG, parameter construction)
    #[error("Crypto error: {0}")]
    Crypto(String),
}

//! Vault codec trait definition.
//!
//! The `VaultCodec` trait is the boundary between an in-memory store and its
//! encrypted form on disk. Callers hand over a path and a master password;
//! nothing derived from the password outlives the call.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::vault::VaultStore;

/// What a successful verification learned about a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSummary {
    /// Vault name from the envelope
    pub name: String,

    /// Envelope format version
    pub version: u32,

    /// Number of records that decrypted successfully
    pub records: usize,

    /// When the envelope was written, if recorded
    pub saved_at: Option<DateTime<Utc>>,

    /// Whether the envelope carries a vault-wide password verifier
    pub has_verifier: bool,
}

/// Save/load interface for encrypted vaults.
///
/// All implementations must ensure:
/// - Every save draws fresh randomness, so unchanged content never produces
///   the same bytes twice
/// - A failed save leaves the previous file untouched
/// - A load either returns the whole store or fails
pub trait VaultCodec {
    /// Encrypt `store` under `master_password` and write it to `destination`.
    ///
    /// # Errors
    ///
    /// - `VaultError::WeakCredential` if the master password is empty
    /// - `VaultError::StorageWriteFailed` if the destination cannot be written
    fn save(&self, store: &VaultStore, master_password: &str, destination: &Path) -> Result<()>;

    /// Read `source` and decrypt it with `master_password`.
    ///
    /// # Errors
    ///
    /// - `VaultError::WeakCredential` if the master password is empty
    /// - `VaultError::StorageReadFailed` if the file cannot be read
    /// - `VaultError::CorruptVault` if the envelope is structurally invalid
    /// - `VaultError::WrongMasterPasswordOrCorruptVault` if decryption fails
    fn load(&self, source: &Path, master_password: &str) -> Result<VaultStore>;

    /// Fully decrypt `source` and report on it without returning the records.
    fn verify(&self, source: &Path, master_password: &str) -> Result<VaultSummary>;
}

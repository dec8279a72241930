//! Key derivation using Argon2id.
//!
//! Every record in a saved vault gets its own random salt, and therefore its
//! own key, derived from the master password with the memory-hard Argon2id
//! function.

use argon2::Argon2;
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Length of derived key in bytes (32 bytes = 256 bits for XChaCha20-Poly1305).
pub const KEY_LENGTH: usize = 32;

/// Length of a freshly generated salt in bytes.
pub const SALT_LENGTH: usize = 16;

const MEMORY_KIB_MIN: u32 = 8;
const MEMORY_KIB_MAX: u32 = 1024 * 1024;
const ITERATIONS_MIN: u32 = 1;
const ITERATIONS_MAX: u32 = 10;
const PARALLELISM_MIN: u32 = 1;
const PARALLELISM_MAX: u32 = 4;

/// Argon2id cost parameters.
///
/// These are persisted in the envelope so a vault is always opened with the
/// parameters it was sealed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for KdfParams {
    /// 64 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the parameters against the supported bounds.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidInput` naming the first value out of range.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "memory_kib",
            self.memory_kib,
            MEMORY_KIB_MIN,
            MEMORY_KIB_MAX,
        )?;
        check_range(
            "iterations",
            self.iterations,
            ITERATIONS_MIN,
            ITERATIONS_MAX,
        )?;
        check_range(
            "parallelism",
            self.parallelism,
            PARALLELISM_MIN,
            PARALLELISM_MAX,
        )?;

        // Argon2 needs at least 8 KiB per lane.
        if self.memory_kib < 8 * self.parallelism {
            return Err(VaultError::InvalidInput(format!(
                "memory_kib must be at least {} for parallelism {}",
                8 * self.parallelism,
                self.parallelism
            )));
        }

        Ok(())
    }
}

fn check_range(label: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(VaultError::InvalidInput(format!(
            "{} must be between {} and {} (got {})",
            label, min, max, value
        )));
    }
    Ok(())
}

/// A cryptographic key derived from the master password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Draw a fresh random salt from the operating system CSPRNG.
///
/// # Errors
///
/// Returns `VaultError::Crypto` if the OS random source is unavailable.
pub fn generate_salt() -> Result<[u8; SALT_LENGTH]> {
    let mut salt = [0u8; SALT_LENGTH];
    getrandom::getrandom(&mut salt)
        .map_err(|e| VaultError::Crypto(format!("Failed to generate salt: {}", e)))?;
    Ok(salt)
}

/// Derive an encryption key from the master password using Argon2id.
///
/// # Arguments
///
/// * `master_password` - The password to derive from
/// * `salt` - Random salt (at least 16 bytes, stored next to the ciphertext)
/// * `params` - Argon2id cost parameters
///
/// # Security
///
/// - Same password + salt + params always produces the same key (deterministic)
/// - Different salt produces a different key
/// - Memory-hard: resistant to GPU attacks at the default parameters
///
/// # Examples
///
/// ```
/// use strongbox_core::crypto::{derive_key, KdfParams};
///
/// let salt = b"unique-salt-16by";
/// let key = derive_key("correct", salt, &KdfParams::new(64, 1, 1)).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(master_password: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if master_password.is_empty() {
        return Err(VaultError::WeakCredential);
    }

    if salt.len() < SALT_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            SALT_LENGTH
        )));
    }

    params.validate()?;

    let argon2_params = argon2::Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LENGTH),
    )
    .map_err(|e| VaultError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(master_password.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| VaultError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}

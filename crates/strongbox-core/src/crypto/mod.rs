//! Cryptographic operations for Strongbox.
//!
//! This module provides key derivation and field encryption using
//! well-audited libraries:
//! - **Argon2id**: Memory-hard key derivation from the master password
//! - **XChaCha20-Poly1305**: Authenticated encryption of individual fields
//!
//! ## Security Model
//!
//! - A fresh 16-byte salt per record per save, so no two saves share a key
//! - A fresh 24-byte nonce per field, carried in front of the ciphertext
//! - Derived keys are zeroized from memory on drop
//! - The master password is never stored
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault file
//! - Offline brute-force attacks on the master password
//! - Tampering with, truncating, or swapping envelope fields
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked process / memory

pub mod cipher;
pub mod key;
pub mod password;

pub use cipher::{decrypt, encrypt, open, seal, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, generate_salt, DerivedKey, KdfParams, KEY_LENGTH, SALT_LENGTH};
pub use password::validate_master_password;

//! Encrypted vault persistence.
//!
//! This module provides the on-disk envelope format and the engine that
//! seals a [`VaultStore`](crate::vault::VaultStore) into it and opens it
//! back up.
//!
//! ## Components
//!
//! - [`VaultCodec`]: The save/load interface
//! - [`JsonVaultCodec`]: JSON envelope with per-record salts and per-field ciphertexts
//! - [`envelope`]: Serde types for the envelope document

pub mod envelope;
pub mod json;
pub mod traits;

pub use envelope::{EncryptedEntry, Envelope, FORMAT_VERSION};
pub use json::JsonVaultCodec;
pub use traits::{VaultCodec, VaultSummary};

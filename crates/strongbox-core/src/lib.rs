//! # Strongbox Core
//!
//! Core library for Strongbox - a local, password-encrypted secret vault.
//!
//! This crate provides the in-memory credential model and the encrypted
//! persistence engine, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **encoding**: Printable text encoding for salts and ciphertexts
//! - **crypto**: Master password checks, Argon2id key derivation, field cipher
//! - **vault**: Credential records and the ordered vault store
//! - **storage**: The JSON envelope format and the save/load engine
//! - **fs**: Atomic file replacement and save locking
//!
//! ## Example
//!
//! ```no_run
//! use strongbox_core::storage::{JsonVaultCodec, VaultCodec};
//! use strongbox_core::vault::{VaultRecord, VaultStore};
//!
//! let mut store = VaultStore::new("Personal");
//! store.add_record(VaultRecord::new("Bing", "a@outlook.com", "helloworld123", "www.bing.ca", "none")?);
//!
//! let codec = JsonVaultCodec::default();
//! codec.save(&store, "correct", "vault.json".as_ref())?;
//! let reloaded = codec.load("vault.json".as_ref(), "correct")?;
//! assert_eq!(reloaded.size(), 1);
//! # Ok::<(), strongbox_core::VaultError>(())
//! ```

pub mod crypto;
pub mod encoding;
pub mod error;
pub mod fs;
pub mod storage;
pub mod vault;

pub use error::{Result, VaultError};
pub use storage::{JsonVaultCodec, VaultCodec};
pub use vault::{VaultRecord, VaultStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! In-memory vault model.
//!
//! A [`VaultStore`] is a named, ordered list of [`VaultRecord`]s. Index order
//! is insertion order and is part of the public contract: callers address
//! records by position.

pub mod record;
pub mod store;

pub use record::{RecordField, Secret, VaultRecord};
pub use store::VaultStore;

//! Decrypted credential records.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

/// A credential value.
///
/// Redacted in `Debug` output and zeroized from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext value.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// The five text fields of a record, in envelope order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Name,
    Username,
    Password,
    Url,
    Notes,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::Name,
        RecordField::Username,
        RecordField::Password,
        RecordField::Url,
        RecordField::Notes,
    ];

    /// Key used for this field in the envelope, also bound as associated data.
    pub fn label(self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Username => "username",
            RecordField::Password => "password",
            RecordField::Url => "url",
            RecordField::Notes => "notes",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decrypted credential.
///
/// Fields are fixed at construction; an edit builds a new record and swaps
/// it in with [`VaultStore::replace_record`](super::VaultStore::replace_record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRecord {
    name: String,
    username: String,
    secret: Secret,
    url: String,
    notes: String,
}

impl VaultRecord {
    /// Build a record.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Validation` if `secret` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use strongbox_core::vault::VaultRecord;
    ///
    /// let record = VaultRecord::new("Bing", "a@outlook.com", "helloworld123", "www.bing.ca", "none").unwrap();
    /// assert_eq!(record.secret().expose(), "helloworld123");
    /// assert!(VaultRecord::new("Bing", "a@outlook.com", "", "www.bing.ca", "none").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Self> {
        let secret = Secret::new(secret);
        if secret.is_empty() {
            return Err(VaultError::Validation("Secret cannot be empty".to_string()));
        }

        Ok(Self {
            name: name.into(),
            username: username.into(),
            secret,
            url: url.into(),
            notes: notes.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Plaintext of one field by its envelope position.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Username => &self.username,
            RecordField::Password => self.secret.expose(),
            RecordField::Url => &self.url,
            RecordField::Notes => &self.notes,
        }
    }
}

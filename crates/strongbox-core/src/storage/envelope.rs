//! On-disk envelope types.
//!
//! One JSON document per vault:
//!
//! ```text
//! { "version": 1,
//!   "name": "Personal",
//!   "saved_at": "2026-10-16T09:30:00Z",
//!   "kdf": { "algorithm": "argon2id", "memory_kib": 65536, "iterations": 3, "parallelism": 1 },
//!   "verifier": { "salt": "<b64>", "check": "<b64>" },
//!   "entries": [
//!     { "salt": "<b64>", "name": "<b64>", "username": "<b64>",
//!       "password": "<b64>", "url": "<b64>", "notes": "<b64>" } ] }
//! ```
//!
//! `version`, `saved_at`, `kdf` and `verifier` may be absent in older files.
//! Unknown keys are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::vault::RecordField;

/// Envelope format version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// The only key derivation function understood by version 1.
pub const KDF_ALGORITHM: &str = "argon2id";

fn legacy_version() -> u32 {
    1
}

/// The complete serialized vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default = "legacy_version")]
    pub version: u32,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf: Option<KdfSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<Verifier>,

    pub entries: Vec<EncryptedEntry>,
}

/// Key derivation settings shared by every salt in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfSection {
    pub algorithm: String,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfSection {
    pub fn params(&self) -> KdfParams {
        KdfParams::new(self.memory_kib, self.iterations, self.parallelism)
    }
}

impl From<KdfParams> for KdfSection {
    fn from(params: KdfParams) -> Self {
        Self {
            algorithm: KDF_ALGORITHM.to_string(),
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }
}

/// Known-plaintext marker sealed under its own salt.
///
/// Opening it proves the master password before any record is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifier {
    pub salt: String,
    pub check: String,
}

/// One record: a salt and five independently sealed fields, all base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEntry {
    pub salt: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

impl EncryptedEntry {
    /// Encoded ciphertext stored for `field`.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Username => &self.username,
            RecordField::Password => &self.password,
            RecordField::Url => &self.url,
            RecordField::Notes => &self.notes,
        }
    }

    pub fn field_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Name => &mut self.name,
            RecordField::Username => &mut self.username,
            RecordField::Password => &mut self.password,
            RecordField::Url => &mut self.url,
            RecordField::Notes => &mut self.notes,
        }
    }
}

/// Just enough of an envelope to read its version before committing to a layout.
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    #[serde(default = "legacy_version")]
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_envelope_parses() {
        let json = r#"{
            "name": "Old",
            "entries": [
                { "salt": "AA==", "name": "AA==", "username": "AA==",
                  "password": "AA==", "url": "AA==", "notes": "AA==" }
            ]
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.version, 1);
        assert!(envelope.kdf.is_none());
        assert!(envelope.verifier.is_none());
        assert_eq!(envelope.entries.len(), 1);
    }

    #[test]
    fn test_missing_entry_key_rejected() {
        let json = r#"{
            "name": "Broken",
            "entries": [ { "salt": "AA==", "name": "AA==" } ]
        }"#;

        assert!(serde_json::from_str::<Envelope>(json).is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{ "version": 1, "name": "V", "entries": [], "comment": "hi" }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(envelope.entries.is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let envelope = Envelope {
            version: FORMAT_VERSION,
            name: "Personal".to_string(),
            saved_at: None,
            kdf: Some(KdfParams::new(64, 1, 1).into()),
            verifier: None,
            entries: vec![],
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["kdf"]["algorithm"], "argon2id");
        assert_eq!(value["kdf"]["memory_kib"], 64);
        assert!(value.get("saved_at").is_none());
        assert!(value.get("verifier").is_none());
    }

    #[test]
    fn test_version_probe_ignores_layout() {
        let probe: VersionProbe =
            serde_json::from_str(r#"{ "version": 7, "records": "new layout" }"#).unwrap();
        assert_eq!(probe.version, 7);
    }
}

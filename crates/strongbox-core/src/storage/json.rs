//! JSON envelope codec.
//!
//! Every record is sealed under its own key, derived from the master password
//! and a salt drawn fresh on every save. Each of its five fields is sealed
//! separately, with the field label as associated data.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::envelope::{
    EncryptedEntry, Envelope, KdfSection, Verifier, VersionProbe, FORMAT_VERSION, KDF_ALGORITHM,
};
use super::traits::{VaultCodec, VaultSummary};
use crate::crypto::{
    derive_key, generate_salt, open, seal, validate_master_password, DerivedKey, KdfParams,
    SALT_LENGTH,
};
use crate::encoding;
use crate::error::{Result, VaultError};
use crate::fs::{write_atomic, SaveLock};
use crate::vault::{RecordField, VaultRecord, VaultStore};

/// Known plaintext sealed into the envelope's verifier.
const VERIFIER_MARKER: &str = "strongbox-verifier-v1";

/// Associated data bound to the verifier ciphertext.
const VERIFIER_AAD: &[u8] = b"verifier";

/// Codec for the JSON envelope format.
#[derive(Debug, Clone, Default)]
pub struct JsonVaultCodec {
    kdf: KdfParams,
}

impl JsonVaultCodec {
    /// Codec that seals new envelopes with the given Argon2id parameters.
    ///
    /// Loading always uses the parameters recorded in the envelope itself.
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    /// Seal `store` into an envelope without touching the filesystem.
    pub fn seal_store(&self, store: &VaultStore, master_password: &str) -> Result<Envelope> {
        validate_master_password(master_password)?;
        self.kdf.validate()?;

        let verifier = seal_verifier(master_password, &self.kdf)?;

        let entries = store
            .iter()
            .map(|record| seal_record(record, master_password, &self.kdf))
            .collect::<Result<Vec<_>>>()?;

        Ok(Envelope {
            version: FORMAT_VERSION,
            name: store.name().to_string(),
            saved_at: Some(chrono::Utc::now()),
            kdf: Some(KdfSection::from(self.kdf)),
            verifier: Some(verifier),
            entries,
        })
    }

    /// Serialize `store` to envelope JSON text.
    pub fn to_json(&self, store: &VaultStore, master_password: &str) -> Result<String> {
        let envelope = self.seal_store(store, master_password)?;
        serde_json::to_string_pretty(&envelope)
            .map_err(|e| VaultError::StorageWriteFailed(format!("Failed to serialize vault: {}", e)))
    }

    /// Parse envelope JSON text and decrypt it.
    pub fn from_json(&self, json: &str, master_password: &str) -> Result<VaultStore> {
        validate_master_password(master_password)?;
        let envelope = parse_envelope(json)?;
        open_envelope(&envelope, master_password)
    }

    fn read_source(source: &Path) -> Result<String> {
        fs::read_to_string(source).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VaultError::StorageReadFailed(format!(
                "Vault file not found: {}",
                source.display()
            )),
            io::ErrorKind::InvalidData => {
                VaultError::CorruptVault("Vault file is not valid UTF-8".to_string())
            }
            _ => VaultError::StorageReadFailed(format!(
                "Failed to read {}: {}",
                source.display(),
                e
            )),
        })
    }
}

impl VaultCodec for JsonVaultCodec {
    fn save(&self, store: &VaultStore, master_password: &str, destination: &Path) -> Result<()> {
        validate_master_password(master_password)?;

        debug!(
            path = %destination.display(),
            records = store.size(),
            "saving vault"
        );

        let json = self.to_json(store, master_password)?;

        let _lock = SaveLock::acquire(destination)?;
        write_atomic(destination, json.as_bytes())?;

        debug!(path = %destination.display(), bytes = json.len(), "vault saved");
        Ok(())
    }

    fn load(&self, source: &Path, master_password: &str) -> Result<VaultStore> {
        validate_master_password(master_password)?;

        debug!(path = %source.display(), "loading vault");
        let json = Self::read_source(source)?;
        let store = self.from_json(&json, master_password)?;
        debug!(path = %source.display(), records = store.size(), "vault loaded");

        Ok(store)
    }

    fn verify(&self, source: &Path, master_password: &str) -> Result<VaultSummary> {
        validate_master_password(master_password)?;

        let json = Self::read_source(source)?;
        let envelope = parse_envelope(&json)?;
        let store = open_envelope(&envelope, master_password)?;

        Ok(VaultSummary {
            name: store.name().to_string(),
            version: envelope.version,
            records: store.size(),
            saved_at: envelope.saved_at,
            has_verifier: envelope.verifier.is_some(),
        })
    }
}

fn seal_verifier(master_password: &str, kdf: &KdfParams) -> Result<Verifier> {
    let salt = generate_salt()?;
    let key = derive_key(master_password, &salt, kdf)?;
    let check = seal(VERIFIER_MARKER, &key, VERIFIER_AAD)?;

    Ok(Verifier {
        salt: encoding::encode(&salt),
        check: encoding::encode(&check),
    })
}

fn seal_record(record: &VaultRecord, master_password: &str, kdf: &KdfParams) -> Result<EncryptedEntry> {
    let salt = generate_salt()?;
    let key = derive_key(master_password, &salt, kdf)?;

    let seal_field = |field: RecordField| -> Result<String> {
        let sealed = seal(record.field(field), &key, field.label().as_bytes())?;
        Ok(encoding::encode(&sealed))
    };

    Ok(EncryptedEntry {
        salt: encoding::encode(&salt),
        name: seal_field(RecordField::Name)?,
        username: seal_field(RecordField::Username)?,
        password: seal_field(RecordField::Password)?,
        url: seal_field(RecordField::Url)?,
        notes: seal_field(RecordField::Notes)?,
    })
}

fn parse_envelope(json: &str) -> Result<Envelope> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| VaultError::CorruptVault(format!("Invalid vault JSON: {}", e)))?;
    if !value.is_object() {
        return Err(VaultError::CorruptVault(
            "Vault envelope must be a JSON object".to_string(),
        ));
    }

    let probe = VersionProbe::deserialize(&value)
        .map_err(|e| VaultError::CorruptVault(format!("Invalid vault version: {}", e)))?;
    if probe.version > FORMAT_VERSION || probe.version == 0 {
        return Err(VaultError::UnsupportedVersion(probe.version));
    }

    Envelope::deserialize(&value)
        .map_err(|e| VaultError::CorruptVault(format!("Invalid vault envelope: {}", e)))
}

fn envelope_kdf(envelope: &Envelope) -> Result<KdfParams> {
    let Some(section) = envelope.kdf.as_ref() else {
        return Ok(KdfParams::default());
    };

    if section.algorithm != KDF_ALGORITHM {
        return Err(VaultError::CorruptVault(format!(
            "Unsupported key derivation algorithm: {}",
            section.algorithm
        )));
    }

    let params = section.params();
    params
        .validate()
        .map_err(|e| VaultError::CorruptVault(format!("Invalid KDF parameters: {}", e)))?;
    Ok(params)
}

fn decode_salt(text: &str, context: &str) -> Result<Vec<u8>> {
    let salt = encoding::decode(text)
        .map_err(|e| VaultError::CorruptVault(format!("{} salt: {}", context, e)))?;
    if salt.len() != SALT_LENGTH {
        return Err(VaultError::CorruptVault(format!(
            "{} salt must be {} bytes (got {})",
            context,
            SALT_LENGTH,
            salt.len()
        )));
    }
    Ok(salt)
}

fn open_verifier(verifier: &Verifier, master_password: &str, kdf: &KdfParams) -> Result<()> {
    let salt = decode_salt(&verifier.salt, "Verifier")?;
    let check = encoding::decode(&verifier.check)
        .map_err(|e| VaultError::CorruptVault(format!("Verifier check: {}", e)))?;

    let key = derive_key(master_password, &salt, kdf)?;
    let marker = open(&check, &key, VERIFIER_AAD).map_err(|e| match e {
        VaultError::DecryptionFailed => VaultError::WrongMasterPasswordOrCorruptVault,
        other => other,
    })?;

    if marker != VERIFIER_MARKER {
        return Err(VaultError::CorruptVault(
            "Verifier marker does not match".to_string(),
        ));
    }
    Ok(())
}

fn open_entry(
    index: usize,
    entry: &EncryptedEntry,
    master_password: &str,
    kdf: &KdfParams,
    password_verified: bool,
) -> Result<VaultRecord> {
    let context = format!("Entry {}", index);
    let salt = decode_salt(&entry.salt, &context)?;

    // Decode everything before paying for key derivation.
    let mut sealed = Vec::with_capacity(RecordField::ALL.len());
    for field in RecordField::ALL {
        let bytes = encoding::decode(entry.field(field))
            .map_err(|e| VaultError::CorruptVault(format!("{} {}: {}", context, field, e)))?;
        sealed.push((field, bytes));
    }

    let key: DerivedKey = derive_key(master_password, &salt, kdf)?;

    let mut plaintexts = Vec::with_capacity(sealed.len());
    for (field, bytes) in &sealed {
        let plaintext = open(bytes, &key, field.label().as_bytes()).map_err(|e| match e {
            VaultError::DecryptionFailed if password_verified => VaultError::CorruptVault(
                format!("{} {} failed authentication", context, field),
            ),
            VaultError::DecryptionFailed => VaultError::WrongMasterPasswordOrCorruptVault,
            other => other,
        })?;
        plaintexts.push(plaintext);
    }
    drop(key);

    let mut fields = plaintexts.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let (name, username, secret, url, notes) = (next(), next(), next(), next(), next());

    VaultRecord::new(name, username, secret, url, notes)
        .map_err(|e| VaultError::CorruptVault(format!("{}: {}", context, e)))
}

fn open_envelope(envelope: &Envelope, master_password: &str) -> Result<VaultStore> {
    let kdf = envelope_kdf(envelope)?;

    let password_verified = match envelope.verifier.as_ref() {
        Some(verifier) => {
            open_verifier(verifier, master_password, &kdf)?;
            true
        }
        None => {
            warn!("vault has no password verifier; it will be added on next save");
            false
        }
    };

    let records = envelope
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| open_entry(index, entry, master_password, &kdf, password_verified))
        .collect::<Result<Vec<_>>>()?;

    Ok(VaultStore::with_records(envelope.name.clone(), records))
}

//! Application context for the Strongbox CLI.
//!
//! Resolves config and vault paths, picks the codec parameters, and obtains
//! the master password for a single command run.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use dialoguer::Password;
use secrecy::{ExposeSecret, SecretString};
use strongbox_core::storage::{JsonVaultCodec, VaultCodec};
use strongbox_core::{VaultError, VaultStore};
use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_config_path, default_vault_path, read_config, StrongboxConfig};
use crate::constants::{CONFIG_ENV, PASSWORD_ENV};
use crate::errors::CliError;

/// Per-invocation state shared by every command handler.
pub struct AppContext {
    vault_override: Option<String>,
    quiet: bool,
}

/// An opened vault together with what is needed to write it back.
pub struct OpenVault {
    pub store: VaultStore,
    pub path: PathBuf,
    pub master_password: SecretString,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        Self {
            vault_override: cli.vault.clone(),
            quiet: cli.quiet,
        }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        if let Ok(value) = std::env::var(CONFIG_ENV) {
            if !value.trim().is_empty() {
                return Ok(PathBuf::from(value));
            }
        }
        default_config_path()
    }

    /// Read the config file, if one exists.
    pub fn config(&self) -> anyhow::Result<Option<StrongboxConfig>> {
        let path = self.config_path()?;
        if !path.exists() {
            return Ok(None);
        }
        read_config(&path).map(Some)
    }

    /// Vault path from `--vault`, then the config file, then the default.
    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.vault_override.as_ref() {
            return Ok(PathBuf::from(path));
        }
        if let Some(config) = self.config()? {
            return Ok(PathBuf::from(config.vault.path));
        }
        default_vault_path()
    }

    /// Codec sealing with the configured KDF parameters (or the defaults).
    pub fn codec(&self) -> anyhow::Result<JsonVaultCodec> {
        let kdf = self
            .config()?
            .and_then(|config| config.kdf)
            .unwrap_or_default();
        kdf.validate()?;
        Ok(JsonVaultCodec::new(kdf))
    }

    /// Obtain the master password from `STRONGBOX_PASSWORD` or a hidden prompt.
    pub fn master_password(&self, confirm: bool) -> anyhow::Result<SecretString> {
        if let Ok(value) = std::env::var(PASSWORD_ENV) {
            if !value.is_empty() {
                return Ok(SecretString::from(value));
            }
        }

        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(format!(
                "No master password provided and no TTY available. Set {}.",
                PASSWORD_ENV
            ))
            .into());
        }

        let mut prompt = Password::new().with_prompt("Master password");
        if confirm {
            prompt = prompt.with_confirmation("Confirm master password", "Passwords do not match");
        }
        let value = prompt
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))?;
        Ok(SecretString::from(value))
    }

    /// Resolve, unlock, and decrypt the vault.
    pub fn open_vault(&self) -> anyhow::Result<OpenVault> {
        let path = self.vault_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                format!("No vault found at {}", path.display()),
                missing_vault_hint(),
            )
            .into());
        }

        let codec = self.codec()?;
        let master_password = self.master_password(false)?;
        let store = codec
            .load(&path, master_password.expose_secret())
            .map_err(|err| match err {
                VaultError::WrongMasterPasswordOrCorruptVault => {
                    anyhow::Error::from(CliError::auth_failed_with_hint(
                        "Wrong master password or corrupt vault.",
                        "Hint: Check your master password. Set STRONGBOX_PASSWORD for non-interactive use.",
                    ))
                }
                other => anyhow::Error::from(other),
            })?;
        debug!(path = %path.display(), records = store.size(), "vault opened");

        Ok(OpenVault {
            store,
            path,
            master_password,
        })
    }

    /// Encrypt and write the vault back to where it was opened from.
    pub fn save_vault(&self, vault: &OpenVault) -> anyhow::Result<()> {
        self.save_store(&vault.store, &vault.path, &vault.master_password)
    }

    pub fn save_store(
        &self,
        store: &VaultStore,
        path: &Path,
        master_password: &SecretString,
    ) -> anyhow::Result<()> {
        self.codec()?
            .save(store, master_password.expose_secret(), path)?;
        Ok(())
    }
}

pub fn missing_vault_hint() -> String {
    "Run:\n  strongbox init\n\nOr specify a vault path:\n  STRONGBOX_PATH=/path/to/vault.json strongbox init"
        .to_string()
}

use std::path::PathBuf;

use strongbox_core::VaultStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{write_config, StrongboxConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_ref() {
        Some(path) => PathBuf::from(path),
        None => ctx.vault_path()?,
    };

    if target.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}. Use --force to overwrite it.",
            target.display()
        ))
        .into());
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
    }

    let master_password = ctx.master_password(true)?;
    let store = match args.name.as_ref() {
        Some(name) => VaultStore::new(name.clone()),
        None => VaultStore::default(),
    };
    ctx.save_store(&store, &target, &master_password)?;

    let config_path = ctx.config_path()?;
    if !config_path.exists() {
        write_config(&config_path, &StrongboxConfig::new(&target))?;
        if !ctx.quiet() {
            println!("Wrote config to {}", config_path.display());
        }
    }

    if !ctx.quiet() {
        println!("Initialized new vault at {}", target.display());
    }
    Ok(())
}

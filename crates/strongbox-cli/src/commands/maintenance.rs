use secrecy::ExposeSecret;
use strongbox_core::VaultCodec;

use crate::app::{missing_vault_hint, AppContext};
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.vault_path()?;
    if !path.exists() {
        return Err(CliError::not_found(
            format!("No vault found at {}", path.display()),
            missing_vault_hint(),
        )
        .into());
    }

    let codec = ctx.codec()?;
    let master_password = ctx.master_password(false)?;
    match codec.verify(&path, master_password.expose_secret()) {
        Ok(summary) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- name: {}", summary.name);
                println!("- format version: {}", summary.version);
                println!("- records: {}", summary.records);
                match summary.saved_at {
                    Some(saved_at) => println!("- saved at: {}", saved_at.to_rfc3339()),
                    None => println!("- saved at: unknown"),
                }
                println!(
                    "- password verifier: {}",
                    if summary.has_verifier {
                        "present"
                    } else {
                        "missing (added on next save)"
                    }
                );
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            Err(err.into())
        }
    }
}

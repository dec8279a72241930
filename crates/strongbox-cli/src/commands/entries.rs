use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use strongbox_core::{VaultError, VaultRecord};

use crate::app::AppContext;
use crate::cli::{AddArgs, ListArgs, RemoveArgs, ShowArgs};
use crate::errors::CliError;
use crate::output::{print_record, record_json, record_table};

/// Map a 1-based record number onto a store index.
fn record_index(number: usize, size: usize) -> anyhow::Result<usize> {
    if number == 0 || number > size {
        return Err(CliError::not_found(
            format!("Record #{} does not exist.", number),
            "Hint: Run `strongbox list` to see record numbers.",
        )
        .into());
    }
    Ok(number - 1)
}

fn read_secret(secret: Option<&String>) -> anyhow::Result<String> {
    if let Some(value) = secret {
        return Ok(value.clone());
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer.trim_end_matches(&['\r', '\n'][..]).to_string());
    }

    Password::new()
        .with_prompt("Secret")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let secret = read_secret(args.secret.as_ref())?;
    let record = VaultRecord::new(
        args.name.clone(),
        args.username.clone(),
        secret,
        args.url.clone(),
        args.notes.clone(),
    )
    .map_err(|err| match err {
        VaultError::Validation(message) => anyhow::Error::from(CliError::invalid_input(message)),
        other => anyhow::Error::from(other),
    })?;

    let mut vault = ctx.open_vault()?;
    vault.store.add_record(record);
    ctx.save_vault(&vault)?;

    if !ctx.quiet() {
        println!("Added record #{} ({})", vault.store.size(), args.name);
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let records = vault.store.records();

    if args.json {
        let values: Vec<serde_json::Value> = records
            .iter()
            .enumerate()
            .map(|(index, record)| record_json(index + 1, record, false))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if records.is_empty() {
        if !ctx.quiet() {
            println!("You have no records.");
        }
        return Ok(());
    }

    println!("{}", record_table(records));
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let index = record_index(args.number, vault.store.size())?;
    let record = vault.store.record_at(index)?;

    if args.json {
        let value = record_json(args.number, record, args.reveal);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_record(args.number, record, args.reveal);
    }
    Ok(())
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault()?;
    let index = record_index(args.number, vault.store.size())?;
    let removed = vault.store.remove_record(index)?;
    ctx.save_vault(&vault)?;

    if !ctx.quiet() {
        println!("Removed record #{} ({})", args.number, removed.name());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_index_bounds() {
        assert_eq!(record_index(1, 2).unwrap(), 0);
        assert_eq!(record_index(2, 2).unwrap(), 1);
        assert!(record_index(0, 2).is_err());
        assert!(record_index(3, 2).is_err());
        assert!(record_index(1, 0).is_err());
    }
}

//! Strongbox CLI - a local, password-encrypted secret vault
//!
//! This is the command-line interface for Strongbox. It drives the core
//! library's encrypted persistence engine; all cryptography lives there.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, init, maintenance, misc};
use crate::errors::{exit_code_for, hint_for};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = hint_for(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(exit_code_for(&e));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => init::handle_init(ctx, args),
        Commands::Add(args) => entries::handle_add(ctx, args),
        Commands::List(args) => entries::handle_list(ctx, args),
        Commands::Show(args) => entries::handle_show(ctx, args),
        Commands::Remove(args) => entries::handle_remove(ctx, args),
        Commands::Check => maintenance::handle_check(ctx),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}

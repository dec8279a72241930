use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use strongbox_core::VERSION;

/// Strongbox - a local, password-encrypted secret vault
#[derive(Parser)]
#[command(name = "strongbox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(long, global = true, env = "STRONGBOX_PATH")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init(InitArgs),

    /// Add a record to the vault
    Add(AddArgs),

    /// List records (secrets are never listed)
    List(ListArgs),

    /// Show one record
    Show(ShowArgs),

    /// Remove one record
    Remove(RemoveArgs),

    /// Decrypt the whole vault and report on it
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Vault name stored in the envelope
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing vault
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Site or account name
    #[arg(long)]
    pub name: String,

    /// Username or login
    #[arg(long, default_value = "")]
    pub username: String,

    /// Secret value (read from stdin or a prompt when omitted)
    #[arg(long)]
    pub secret: Option<String>,

    /// Site URL
    #[arg(long, default_value = "")]
    pub url: String,

    /// Free-text notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Record number as shown by `list` (starting at 1)
    #[arg(value_name = "N")]
    pub number: usize,

    /// Print the secret instead of a mask
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Record number as shown by `list` (starting at 1)
    #[arg(value_name = "N")]
    pub number: usize,
}

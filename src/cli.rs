//! Command-line definition for the card wallet

use crate::card::BalancePolicy;
use crate::config::{OutputFormat, Overrides};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "card-wallet",
    version,
    about = "Keep track of wallet cards and their balances in a plain text file"
)]
pub struct Cli {
    /// Wallet file to read and write (defaults to ./wallet.txt)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// How balances given to `add` are read
    #[arg(long, value_enum, global = true)]
    pub balance_parsing: Option<BalancePolicy>,

    /// Config profile to use instead of the active one
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Config file location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings overrides given on the command line
    #[must_use]
    pub fn overrides(&self) -> Overrides<'_> {
        Overrides {
            wallet_file: self.file.as_deref(),
            output_format: self.output,
            balance_policy: self.balance_parsing,
            profile: self.profile.as_deref(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new card
    Add {
        /// Card number (digits only)
        id: String,

        /// Holder first name
        first_name: String,

        /// Holder last name
        last_name: String,

        /// Starting balance, e.g. 100 or 99.95
        #[arg(allow_hyphen_values = true)]
        balance: String,
    },

    /// View all cards
    View,

    /// Remove a card
    Remove {
        /// Card number to remove
        id: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new config file with the default profile
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// List configuration values of the active (or --profile) profile
    List,

    /// Get a specific configuration value
    Get {
        /// Configuration key (wallet-file, balance-parsing, output-format)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (wallet-file, balance-parsing, output-format)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Manage profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show config file path
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all available profiles
    List,

    /// Show active profile name
    Active,

    /// Set active profile
    Use {
        /// Profile name to activate
        name: String,
    },

    /// Create a new profile
    Create {
        /// Profile name
        name: String,

        /// Wallet file for this profile
        #[arg(long)]
        wallet_file: String,

        /// Balance parsing policy for this profile
        #[arg(long, value_enum)]
        policy: Option<BalancePolicy>,
    },
}

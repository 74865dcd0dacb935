//! Card wallet - command-line record keeping for wallet cards
//!
//! Stores card numbers, holder names and balances in a plain text file and
//! supports adding, viewing and removing cards.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wallet_cli::card::BalancePolicy;
use wallet_cli::cli::{Cli, Commands, ConfigCommands, ProfileCommands};
use wallet_cli::commands::{self, add_card::AddCardRequest, config_file_ops};
use wallet_cli::config::{parse_output_format, OutputFormat, Settings, WalletCliConfig};
use wallet_cli::config_file::ConfigFile;
use wallet_cli::utils::colors::{init_colors, Theme};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    init_colors(cli.no_color);

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let env_config = WalletCliConfig::new();

    // Settings may fail to resolve, so errors only honour the flag and env format
    let error_format = cli
        .output
        .or_else(|| {
            env_config
                .output_format
                .as_deref()
                .and_then(|format| parse_output_format(format).ok())
        })
        .unwrap_or_default();

    match execute_command(&cli, command, &env_config) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            match error_format {
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "success": false,
                        "error": format!("{e:#}"),
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
                OutputFormat::Human | OutputFormat::Csv => {
                    eprintln!("{} {e:#}", Theme::error("Error:"));
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main command router
fn execute_command(cli: &Cli, command: &Commands, env_config: &WalletCliConfig) -> Result<String> {
    let config_path = || env_config.config_file_path(cli.config.as_deref());
    // Card commands never fail on a broken config file, config commands do
    let settings = || -> Result<Settings> {
        let config_file = match config_path() {
            Ok(path) => ConfigFile::load_or_default(&path),
            Err(err) => {
                warn!("No config file location: {err:#}");
                ConfigFile::new()
            }
        };
        Settings::resolve(&cli.overrides(), env_config, &config_file)
    };

    match command {
        Commands::Add {
            id,
            first_name,
            last_name,
            balance,
        } => {
            let request = AddCardRequest {
                id,
                first_name,
                last_name,
                balance,
            };
            commands::execute_add_card(&settings()?, &request)
        }
        Commands::View => commands::execute_view_cards(&settings()?),
        Commands::Remove { id } => commands::execute_remove_card(&settings()?, id),
        Commands::Config { command } => execute_config_commands(cli, &config_path()?, command),
        Commands::Completions { shell } => commands::execute_completions(*shell, Cli::command()),
    }
}

/// Execute config commands
fn execute_config_commands(
    cli: &Cli,
    config_path: &Path,
    command: &ConfigCommands,
) -> Result<String> {
    let profile = cli.profile.as_deref();

    match command {
        ConfigCommands::Init { force } => config_file_ops::init(config_path, *force),
        ConfigCommands::List => config_file_ops::list(config_path, profile),
        ConfigCommands::Get { key } => config_file_ops::get(config_path, key, profile),
        ConfigCommands::Set { key, value } => {
            config_file_ops::set(config_path, key, value, profile)
        }
        ConfigCommands::Path => Ok(config_file_ops::path(config_path)),
        ConfigCommands::Profile { command } => match command {
            ProfileCommands::List => config_file_ops::list_profiles(config_path),
            ProfileCommands::Active => config_file_ops::show_active_profile(config_path),
            ProfileCommands::Use { name } => config_file_ops::use_profile(config_path, name),
            ProfileCommands::Create {
                name,
                wallet_file,
                policy,
            } => config_file_ops::create_profile(
                config_path,
                name,
                wallet_file,
                policy.map(BalancePolicy::as_str),
            ),
        },
    }
}

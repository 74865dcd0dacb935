//! Configuration management for the wallet CLI
//!
//! Reads overrides from environment variables and resolves the settings an
//! invocation runs with from flags, environment, config file and defaults.

use crate::card::BalancePolicy;
use crate::config_file::ConfigFile;
use crate::store::DEFAULT_WALLET_FILE;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Output format for command results
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Csv,
}

/// Overrides taken from the environment
#[derive(Debug, Clone, Default)]
pub struct WalletCliConfig {
    /// `WALLET_FILE`: wallet file path
    pub wallet_file: Option<String>,

    /// `WALLET_OUTPUT_FORMAT`: human, json or csv
    pub output_format: Option<String>,

    /// `WALLET_BALANCE_PARSING`: lenient or strict
    pub balance_parsing: Option<String>,

    /// `WALLET_CONFIG`: config file location
    pub config_path: Option<String>,
}

impl WalletCliConfig {
    /// Read the configuration from the process environment
    #[must_use]
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            wallet_file: non_empty("WALLET_FILE"),
            output_format: non_empty("WALLET_OUTPUT_FORMAT"),
            balance_parsing: non_empty("WALLET_BALANCE_PARSING"),
            config_path: non_empty("WALLET_CONFIG"),
        }
    }

    /// Config file location: explicit flag, then `WALLET_CONFIG`, then the XDG path
    ///
    /// # Errors
    ///
    /// Returns an error if no location is given and the config directory cannot be determined
    pub fn config_file_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        match &self.config_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => ConfigFile::config_file_path(),
        }
    }
}

/// Values given on the command line for a single invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub wallet_file: Option<&'a Path>,
    pub output_format: Option<OutputFormat>,
    pub balance_policy: Option<BalancePolicy>,
    pub profile: Option<&'a str>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub wallet_file: PathBuf,
    pub output_format: OutputFormat,
    pub balance_policy: BalancePolicy,
}

impl Settings {
    /// Resolve settings with precedence: CLI flags > env vars > config file > defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a requested profile does not exist or an
    /// environment/config value is not valid
    pub fn resolve(
        overrides: &Overrides<'_>,
        env_config: &WalletCliConfig,
        config_file: &ConfigFile,
    ) -> Result<Self> {
        let profile = match overrides.profile {
            Some(name) => Some(
                config_file
                    .get_profile(name)
                    .with_context(|| format!("Profile '{name}' not found in config file"))?,
            ),
            None => config_file.active_profile(),
        };

        let wallet_file = overrides.wallet_file.map_or_else(
            || {
                env_config
                    .wallet_file
                    .as_deref()
                    .or_else(|| profile.map(|p| p.wallet_file.as_str()))
                    .map_or_else(|| PathBuf::from(DEFAULT_WALLET_FILE), PathBuf::from)
            },
            Path::to_path_buf,
        );

        let output_format = match overrides.output_format {
            Some(format) => format,
            None => env_config
                .output_format
                .as_deref()
                .or(config_file.defaults.output_format.as_deref())
                .map(parse_output_format)
                .transpose()?
                .unwrap_or_default(),
        };

        let balance_policy = match overrides.balance_policy {
            Some(policy) => policy,
            None => env_config
                .balance_parsing
                .as_deref()
                .or_else(|| profile.and_then(|p| p.balance_parsing.as_deref()))
                .map(parse_balance_policy)
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(Self {
            wallet_file,
            output_format,
            balance_policy,
        })
    }
}

/// Parse output format from string
///
/// # Errors
///
/// Returns an error for anything other than human, json or csv
pub fn parse_output_format(format_str: &str) -> Result<OutputFormat> {
    match format_str.to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(anyhow::anyhow!("Invalid output format: {format_str}")),
    }
}

/// Parse balance parsing policy from string
///
/// # Errors
///
/// Returns an error for anything other than lenient or strict
pub fn parse_balance_policy(policy_str: &str) -> Result<BalancePolicy> {
    match policy_str.to_lowercase().as_str() {
        "lenient" => Ok(BalancePolicy::Lenient),
        "strict" => Ok(BalancePolicy::Strict),
        _ => Err(anyhow::anyhow!(
            "Invalid balance parsing policy: {policy_str} (expected lenient or strict)"
        )),
    }
}

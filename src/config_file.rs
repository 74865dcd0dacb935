//! Persistent configuration file management for the wallet CLI
//!
//! Manages the TOML configuration file stored in XDG-compliant locations,
//! supporting profiles that point at different wallet files.

use crate::config::{parse_balance_policy, parse_output_format};
use crate::store::DEFAULT_WALLET_FILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the profile created by default
pub const DEFAULT_PROFILE: &str = "default";

/// Persistent configuration file structure
///
/// Configuration precedence order (highest to lowest):
///
/// 1. CLI flags (`--file`, `--output`, `--balance-parsing`)
/// 2. Environment variables (`WALLET_FILE`, etc.)
/// 3. Config file active profile
/// 4. Config file defaults
/// 5. Hardcoded defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Configuration file version for migration support
    #[serde(default = "default_version")]
    pub version: String,

    /// Default settings that apply across all profiles
    #[serde(default)]
    pub defaults: DefaultConfig,

    /// Named profiles, one per wallet
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Default configuration values
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultConfig {
    /// Active profile name
    pub active_profile: Option<String>,

    /// Default output format (human, json or csv)
    pub output_format: Option<String>,
}

/// Profile-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Wallet file for this profile
    pub wallet_file: String,

    /// Balance parsing policy (lenient or strict)
    pub balance_parsing: Option<String>,
}

impl ConfigFile {
    /// Create a new config with a single default profile
    #[must_use]
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            DEFAULT_PROFILE.to_string(),
            ProfileConfig {
                wallet_file: DEFAULT_WALLET_FILE.to_string(),
                balance_parsing: None,
            },
        );

        Self {
            version: default_version(),
            defaults: DefaultConfig {
                active_profile: Some(DEFAULT_PROFILE.to_string()),
                output_format: Some("human".to_string()),
            },
            profiles,
        }
    }

    /// Load config file from `path`, falling back to defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config file from `path` for commands that only read settings
    ///
    /// A file that cannot be read or parsed is logged and replaced by the
    /// defaults, so the wallet stays usable with a broken config.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            warn!("Ignoring config file: {err:#}");
            Self::new()
        })
    }

    /// Save config file to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get XDG-compliant config file path
    ///
    /// Returns `~/.config/card-wallet/config.toml` on Linux
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;

        Ok(config_dir.join("card-wallet").join("config.toml"))
    }

    /// Get the active profile configuration
    #[must_use]
    pub fn active_profile(&self) -> Option<&ProfileConfig> {
        self.defaults
            .active_profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    /// Get a specific profile by name
    #[must_use]
    pub fn get_profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }

    /// Profile names in alphabetical order
    #[must_use]
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Set the active profile
    pub fn set_active_profile(&mut self, profile_name: String) {
        self.defaults.active_profile = Some(profile_name);
    }

    /// Set a value in the active profile
    ///
    /// `output-format` is global and lives in the defaults section.
    ///
    /// # Errors
    ///
    /// Returns an error if no active profile is set, the key is unknown or
    /// the value is invalid for the key
    pub fn set_profile_value(&mut self, key: &str, value: String) -> Result<()> {
        if matches!(key, "output-format" | "output_format") {
            parse_output_format(&value)?;
            self.defaults.output_format = Some(value);
            return Ok(());
        }

        let profile_name = self
            .defaults
            .active_profile
            .as_ref()
            .context("No active profile set. Use 'config init' to create one.")?;

        let profile = self
            .profiles
            .get_mut(profile_name)
            .with_context(|| format!("Profile '{profile_name}' not found"))?;

        match key {
            "wallet-file" | "wallet_file" => profile.wallet_file = value,
            "balance-parsing" | "balance_parsing" => {
                parse_balance_policy(&value)?;
                profile.balance_parsing = Some(value);
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }

        Ok(())
    }

    /// Get a value from the active profile
    ///
    /// # Errors
    ///
    /// Returns an error if no active profile is set or key is unknown
    pub fn get_profile_value(&self, key: &str) -> Result<Option<String>> {
        if matches!(key, "output-format" | "output_format") {
            return Ok(self.defaults.output_format.clone());
        }

        let profile_name = self
            .defaults
            .active_profile
            .as_ref()
            .context("No active profile set")?;

        let profile = self
            .profiles
            .get(profile_name)
            .with_context(|| format!("Profile '{profile_name}' not found"))?;

        let value = match key {
            "wallet-file" | "wallet_file" => Some(profile.wallet_file.clone()),
            "balance-parsing" | "balance_parsing" => profile.balance_parsing.clone(),
            _ => anyhow::bail!("Unknown config key: {key}"),
        };

        Ok(value)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

//! Config file operations command handlers
//!
//! Every handler takes the config file location explicitly so the caller
//! decides between `--config`, `WALLET_CONFIG` and the XDG default.

use crate::config::parse_balance_policy;
use crate::config_file::{ConfigFile, ProfileConfig};
use crate::utils::colors::Theme;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

/// Initialize a new config file
///
/// # Errors
///
/// Returns an error if the config file already exists (unless `force` is true),
/// or if the file cannot be created or written
pub fn init(config_path: &Path, force: bool) -> Result<String> {
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config file already exists at: {}\n\
             Use --force to overwrite",
            config_path.display()
        ));
    }

    let config = ConfigFile::new();
    config.save_to(config_path)?;

    let mut output = String::new();
    writeln!(
        &mut output,
        "{} Config file initialized at: {}",
        Theme::success("✓"),
        Theme::value(&config_path.display().to_string())
    )?;
    writeln!(&mut output)?;
    writeln!(&mut output, "{}", Theme::header("Default profile created:"))?;
    writeln!(
        &mut output,
        "  {} {} -> wallet.txt",
        Theme::dim("•"),
        Theme::highlight("default (active)")
    )?;
    writeln!(&mut output)?;
    writeln!(&mut output, "{}", Theme::dim("Use 'card-wallet config list' to view configuration"))?;
    write!(
        &mut output,
        "{}",
        Theme::dim("Use 'card-wallet config set <key> <value>' to customize")
    )?;
    Ok(output)
}

/// List the configuration of a profile
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or if the specified profile is not found
pub fn list(config_path: &Path, profile_name: Option<&str>) -> Result<String> {
    let config = ConfigFile::load_from(config_path)?;

    let profile_to_show = if let Some(name) = profile_name {
        config
            .get_profile(name)
            .with_context(|| format!("Profile '{name}' not found"))?
    } else {
        config
            .active_profile()
            .context("No active profile set. Run 'card-wallet config init'")?
    };

    let profile_name_display = profile_name
        .map(String::from)
        .or_else(|| config.defaults.active_profile.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let mut output = String::new();
    writeln!(
        &mut output,
        "{} (profile: {})",
        Theme::header("Configuration"),
        Theme::highlight(&profile_name_display)
    )?;
    writeln!(&mut output, "{}", Theme::dim(&"=".repeat(50)))?;
    writeln!(
        &mut output,
        "{:<17} {}",
        Theme::info("Wallet File:"),
        Theme::value(&profile_to_show.wallet_file)
    )?;
    writeln!(&mut output, "{:<17} {}",
        Theme::info("Balance Parsing:"),
        profile_to_show.balance_parsing.as_ref().map_or_else(
            || Theme::dim("lenient (default)"),
            |v| Theme::value(v)
        ))?;
    write!(&mut output, "{:<17} {}",
        Theme::info("Output Format:"),
        config.defaults.output_format.as_ref().map_or_else(
            || Theme::dim("human (default)"),
            |v| Theme::value(v)
        ))?;

    Ok(output)
}

/// Get a specific configuration value
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, the profile is not
/// found, or the key is invalid
pub fn get(config_path: &Path, key: &str, profile_name: Option<&str>) -> Result<String> {
    let mut config = ConfigFile::load_from(config_path)?;

    if let Some(name) = profile_name {
        config.set_active_profile(name.to_string());
    }

    let value = config.get_profile_value(key)?;

    Ok(value.unwrap_or_else(|| "(not set)".to_string()))
}

/// Set a configuration value
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or saved, the profile
/// is not found, or the key is invalid
pub fn set(
    config_path: &Path,
    key: &str,
    value: &str,
    profile_name: Option<&str>,
) -> Result<String> {
    let mut config = ConfigFile::load_from(config_path)?;

    // Temporarily set active profile if specified
    let original_active = config.defaults.active_profile.clone();
    if let Some(name) = profile_name {
        config.set_active_profile(name.to_string());
    }

    config.set_profile_value(key, value.to_string())?;

    // Restore original active profile before saving
    if let Some(original) = original_active {
        config.set_active_profile(original);
    }

    config.save_to(config_path)?;

    let profile_display = profile_name
        .map(String::from)
        .or(config.defaults.active_profile)
        .unwrap_or_else(|| "unknown".to_string());

    Ok(format!(
        "{} Set {} = {} (profile: {})",
        Theme::success("✓"),
        Theme::info(key),
        Theme::value(value),
        Theme::highlight(&profile_display)
    ))
}

/// Show config file path
#[must_use]
pub fn path(config_path: &Path) -> String {
    config_path.display().to_string()
}

/// List all available profiles
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded
pub fn list_profiles(config_path: &Path) -> Result<String> {
    let config = ConfigFile::load_from(config_path)?;

    let mut output = String::new();
    writeln!(&mut output, "{}", Theme::header("Available Profiles:"))?;
    write!(&mut output, "{}", Theme::dim(&"=".repeat(50)))?;

    let active_profile = config.defaults.active_profile.as_deref();

    for name in config.profile_names() {
        let Some(profile) = config.get_profile(name) else {
            continue;
        };
        let name_display = if active_profile == Some(name) {
            format!("{} {}", Theme::highlight(name), Theme::success("(active)"))
        } else {
            Theme::value(name).to_string()
        };

        writeln!(&mut output)?;
        writeln!(&mut output, "{name_display}")?;
        write!(&mut output, "  {}: {}", Theme::dim("Wallet file"), profile.wallet_file)?;
        if let Some(ref policy) = profile.balance_parsing {
            write!(&mut output, "\n  {}: {}", Theme::dim("Balance parsing"), policy)?;
        }
    }

    Ok(output)
}

/// Show active profile name
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded
pub fn show_active_profile(config_path: &Path) -> Result<String> {
    let config = ConfigFile::load_from(config_path)?;

    Ok(config.defaults.active_profile.unwrap_or_else(|| "(none)".to_string()))
}

/// Set active profile
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or saved, or if the
/// specified profile does not exist
pub fn use_profile(config_path: &Path, profile_name: &str) -> Result<String> {
    let mut config = ConfigFile::load_from(config_path)?;

    if !config.profiles.contains_key(profile_name) {
        return Err(anyhow::anyhow!(
            "Profile '{profile_name}' not found.\n\
             \n\
             Available profiles:\n  {}\n\
             \n\
             Use 'card-wallet config profile create' to create a new profile",
            config.profile_names().join("\n  ")
        ));
    }

    config.set_active_profile(profile_name.to_string());
    config.save_to(config_path)?;

    Ok(format!(
        "{} Active profile set to: {}",
        Theme::success("✓"),
        Theme::highlight(profile_name)
    ))
}

/// Create a new profile
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or saved, the balance
/// policy is invalid, or a profile with the same name already exists
pub fn create_profile(
    config_path: &Path,
    name: &str,
    wallet_file: &str,
    balance_parsing: Option<&str>,
) -> Result<String> {
    let mut config = ConfigFile::load_from(config_path)?;

    if config.profiles.contains_key(name) {
        return Err(anyhow::anyhow!(
            "Profile '{name}' already exists.\n\
             Use 'card-wallet config set --profile {name}' to modify it"
        ));
    }

    if let Some(policy) = balance_parsing {
        parse_balance_policy(policy)?;
    }

    let profile = ProfileConfig {
        wallet_file: wallet_file.to_string(),
        balance_parsing: balance_parsing.map(String::from),
    };

    config.profiles.insert(name.to_string(), profile);
    config.save_to(config_path)?;

    let mut output = String::new();
    writeln!(
        &mut output,
        "{} Profile '{}' created with:",
        Theme::success("✓"),
        Theme::highlight(name)
    )?;
    writeln!(&mut output, "  {} Wallet file: {}", Theme::dim("•"), Theme::value(wallet_file))?;
    writeln!(&mut output)?;
    write!(
        &mut output,
        "{}",
        Theme::dim(&format!("Use 'card-wallet config profile use {name}' to activate"))
    )?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("config.toml")
    }

    #[test]
    fn test_path_returns_given_path() {
        let dir = TempDir::new().expect("temp dir");
        assert!(path(&config_path(&dir)).ends_with("config.toml"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_path(&dir);

        init(&path, false).expect("first init");
        assert!(path.exists());

        let err = init(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        init(&path, true).expect("forced init");
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_path(&dir);

        set(&path, "wallet-file", "cards.txt", None).expect("set");
        assert_eq!(get(&path, "wallet-file", None).expect("get"), "cards.txt");
        assert_eq!(get(&path, "balance-parsing", None).expect("get"), "(not set)");
    }

    #[test]
    fn test_profile_lifecycle() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_path(&dir);

        create_profile(&path, "travel", "travel.txt", Some("strict")).expect("create");
        assert!(create_profile(&path, "travel", "other.txt", None).is_err());
        assert!(create_profile(&path, "bad", "bad.txt", Some("fuzzy")).is_err());

        let listing = list_profiles(&path).expect("list");
        assert!(listing.contains("travel"));
        assert!(listing.contains("travel.txt"));

        assert_eq!(show_active_profile(&path).expect("active"), "default");
        use_profile(&path, "travel").expect("use");
        assert_eq!(show_active_profile(&path).expect("active"), "travel");
        assert_eq!(get(&path, "wallet-file", None).expect("get"), "travel.txt");
        assert_eq!(
            get(&path, "wallet-file", Some("default")).expect("get"),
            "wallet.txt"
        );

        let err = use_profile(&path, "missing").unwrap_err();
        assert!(err.to_string().contains("Available profiles"));
    }

    #[test]
    fn test_set_on_named_profile_keeps_active() {
        let dir = TempDir::new().expect("temp dir");
        let path = config_path(&dir);
        create_profile(&path, "work", "work.txt", None).expect("create");

        set(&path, "wallet-file", "office.txt", Some("work")).expect("set");

        let listing = list(&path, None).expect("list");
        assert!(listing.contains("profile: default"));
        assert!(listing.contains("wallet.txt"));
        assert_eq!(get(&path, "wallet-file", Some("work")).expect("get"), "office.txt");
    }
}

//! Remove card command implementation

use crate::config::{OutputFormat, Settings};
use crate::errors::{enhance_store_error, StoreError};
use crate::store::CardStore;
use crate::utils::colors::Theme;
use anyhow::Result;
use tracing::info;

/// Execute the remove command
///
/// A card that does not exist is reported as a notice, not an error, and
/// the wallet file is not rewritten in that case.
///
/// # Errors
/// Returns error if the wallet file cannot be read or written
pub fn execute(settings: &Settings, id: &str) -> Result<String> {
    info!("Removing card {} from {}", id, settings.wallet_file.display());

    let store = CardStore::new(&settings.wallet_file);
    let mut wallet = store.load().map_err(enhance_store_error)?;

    let removed = match wallet.take(id) {
        Ok(card) => Some(card),
        Err(StoreError::NotFound { .. }) => None,
        Err(err) => return Err(enhance_store_error(err)),
    };

    if let Some(card) = &removed {
        store.save(wallet.cards()).map_err(enhance_store_error)?;
        info!("Removed card {} held by {}", card.id, card.holder());
    }

    let found = removed.is_some();
    let message = if found {
        "Card removed successfully!"
    } else {
        "Card not found!"
    };

    match settings.output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "success": true,
            "found": found,
            "id": id,
            "message": message,
        }))?),
        OutputFormat::Human | OutputFormat::Csv if found => Ok(Theme::success(message).to_string()),
        OutputFormat::Human | OutputFormat::Csv => Ok(Theme::warning(message).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::BalancePolicy;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            wallet_file: dir.path().join("wallet.txt"),
            output_format: OutputFormat::Human,
            balance_policy: BalancePolicy::Lenient,
        }
    }

    #[test]
    fn test_remove_existing_card() {
        let dir = TempDir::new().expect("temp dir");
        let settings = settings_in(&dir);
        fs::write(&settings.wallet_file, "1 A B 1.00\n2 C D 2.00\n").expect("seed");

        let output = execute(&settings, "1").expect("remove");
        assert!(output.contains("Card removed successfully!"));
        assert_eq!(
            fs::read_to_string(&settings.wallet_file).expect("read"),
            "2 C D 2.00\n"
        );
    }

    #[test]
    fn test_remove_missing_card_is_a_notice() {
        let dir = TempDir::new().expect("temp dir");
        let settings = settings_in(&dir);
        // Unnormalized content proves the file is not rewritten
        let original = "1 A B 1\n";
        fs::write(&settings.wallet_file, original).expect("seed");

        let output = execute(&settings, "9").expect("not found is not an error");
        assert!(output.contains("Card not found!"));
        assert_eq!(fs::read_to_string(&settings.wallet_file).expect("read"), original);
    }

    #[test]
    fn test_remove_json_reports_found_flag() {
        let dir = TempDir::new().expect("temp dir");
        let settings = Settings {
            output_format: OutputFormat::Json,
            ..settings_in(&dir)
        };

        let output = execute(&settings, "9").expect("remove");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["found"], false);
    }
}

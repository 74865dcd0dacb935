//! End-to-end wallet scenarios against a real wallet file.

use std::fs;
use tempfile::TempDir;
use wallet_cli::commands::add_card::AddCardRequest;
use wallet_cli::commands::{execute_add_card, execute_remove_card, execute_view_cards};
use wallet_cli::config::{Overrides, WalletCliConfig};
use wallet_cli::config_file::ConfigFile;
use wallet_cli::{
    BalancePolicy, CardStore, NewCard, OutputFormat, Settings, StoreError, MAX_CARDS,
};

fn settings(dir: &TempDir) -> Settings {
    Settings {
        wallet_file: dir.path().join("wallet.txt"),
        output_format: OutputFormat::Human,
        balance_policy: BalancePolicy::Lenient,
    }
}

fn add(settings: &Settings, id: &str, balance: &str) -> anyhow::Result<String> {
    execute_add_card(
        settings,
        &AddCardRequest {
            id,
            first_name: "Jane",
            last_name: "Doe",
            balance,
        },
    )
}

#[test]
fn test_empty_wallet_then_add_view_remove() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);

    let store = CardStore::new(&settings.wallet_file);
    assert!(store.load().unwrap().is_empty());
    assert!(execute_view_cards(&settings).unwrap().contains("No cards found."));

    add(&settings, "123456", "500").unwrap();
    let view = execute_view_cards(&settings).unwrap();
    assert!(view.contains("123456"));
    assert!(view.contains("Jane"));
    assert!(view.contains("Doe"));
    assert!(view.contains("500.00"));

    let removed = execute_remove_card(&settings, "123456").unwrap();
    assert!(removed.contains("Card removed successfully!"));
    assert!(execute_view_cards(&settings).unwrap().contains("No cards found."));
}

#[test]
fn test_remove_unknown_id_keeps_file_bytes() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);
    add(&settings, "1", "10").unwrap();
    add(&settings, "2", "20").unwrap();
    let before = fs::read(&settings.wallet_file).unwrap();

    let output = execute_remove_card(&settings, "3").unwrap();
    assert!(output.contains("Card not found!"));
    assert_eq!(fs::read(&settings.wallet_file).unwrap(), before);
}

#[test]
fn test_capacity_via_file() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);
    let store = CardStore::new(&settings.wallet_file);

    let mut wallet = store.load().unwrap();
    for n in 0..MAX_CARDS {
        let id = (1000 + n).to_string();
        wallet
            .add(
                NewCard {
                    id: &id,
                    first_name: "A",
                    last_name: "B",
                    balance: "1",
                },
                BalancePolicy::Lenient,
            )
            .unwrap();
    }
    store.save(wallet.cards()).unwrap();

    let err = add(&settings, "99999", "1").unwrap_err();
    assert!(err.to_string().contains("Maximum number of cards reached"));
    assert_eq!(store.load().unwrap().len(), MAX_CARDS);

    let mut wallet = store.load().unwrap();
    let err = wallet
        .add(
            NewCard {
                id: "99999",
                first_name: "A",
                last_name: "B",
                balance: "1",
            },
            BalancePolicy::Lenient,
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { .. }));
}

#[test]
fn test_long_names_are_truncated_on_disk() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);
    let long_name = "n".repeat(70);

    execute_add_card(
        &settings,
        &AddCardRequest {
            id: "77",
            first_name: &long_name,
            last_name: "Doe",
            balance: "1.5",
        },
    )
    .unwrap();

    let contents = fs::read_to_string(&settings.wallet_file).unwrap();
    assert_eq!(contents, format!("77 {} Doe 1.50\n", "n".repeat(49)));
}

#[test]
fn test_strict_policy_rejects_non_numeric_balance() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        balance_policy: BalancePolicy::Strict,
        ..settings(&dir)
    };

    let err = add(&settings, "5", "five").unwrap_err();
    assert!(err.to_string().contains("Balance is not a valid number"));
    assert!(!settings.wallet_file.exists());

    let lenient = Settings {
        balance_policy: BalancePolicy::Lenient,
        ..settings
    };
    add(&lenient, "5", "five").unwrap();
    assert_eq!(
        fs::read_to_string(&lenient.wallet_file).unwrap(),
        "5 Jane Doe 0.00\n"
    );
}

#[test]
fn test_csv_view_lists_cards_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);
    add(&settings, "30", "3").unwrap();
    add(&settings, "10", "1").unwrap();

    let csv_settings = Settings {
        output_format: OutputFormat::Csv,
        ..settings
    };
    let csv = execute_view_cards(&csv_settings).unwrap();
    assert_eq!(
        csv,
        "id,first_name,last_name,balance\n30,Jane,Doe,3.00\n10,Jane,Doe,1.00"
    );
}

#[test]
fn test_broken_config_file_falls_back_to_default_wallet() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "garbage = [").unwrap();
    let wallet_file = dir.path().join("wallet.txt");
    fs::write(&wallet_file, "1 A B 5.00\n").unwrap();

    let config_file = ConfigFile::load_or_default(&config_path);
    let overrides = Overrides {
        wallet_file: Some(wallet_file.as_path()),
        ..Overrides::default()
    };
    let settings =
        Settings::resolve(&overrides, &WalletCliConfig::default(), &config_file).unwrap();

    let view = execute_view_cards(&settings).unwrap();
    assert!(view.contains("5.00"));
}

//! Add card command implementation

use crate::config::{OutputFormat, Settings};
use crate::errors::enhance_store_error;
use crate::store::{CardStore, NewCard};
use crate::utils::colors::Theme;
use anyhow::Result;
use tracing::info;

/// Request to add a card, as typed on the command line
pub struct AddCardRequest<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub balance: &'a str,
}

/// Execute the add command
///
/// Loads the wallet, appends the card and rewrites the wallet file.
///
/// # Errors
/// Returns error if the card is rejected (bad number, bad name, bad balance
/// under strict parsing, duplicate number, full wallet) or the wallet file
/// cannot be read or written
pub fn execute(settings: &Settings, request: &AddCardRequest<'_>) -> Result<String> {
    info!(
        "Adding card {} to {}",
        request.id,
        settings.wallet_file.display()
    );

    let store = CardStore::new(&settings.wallet_file);
    let mut wallet = store.load().map_err(enhance_store_error)?;

    let card = wallet
        .add(
            NewCard {
                id: request.id,
                first_name: request.first_name,
                last_name: request.last_name,
                balance: request.balance,
            },
            settings.balance_policy,
        )
        .map_err(enhance_store_error)?
        .clone();

    store.save(wallet.cards()).map_err(enhance_store_error)?;
    info!("Wallet now holds {} cards", wallet.len());

    match settings.output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "success": true,
            "message": "Card added successfully!",
            "card": {
                "id": card.id,
                "first_name": card.first_name,
                "last_name": card.last_name,
                "balance": card.rounded_balance(),
            },
        }))?),
        OutputFormat::Human | OutputFormat::Csv => {
            Ok(Theme::success("Card added successfully!").to_string())
        }
    }
}

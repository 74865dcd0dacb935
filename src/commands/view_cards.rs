//! View cards command implementation

use crate::config::{OutputFormat, Settings};
use crate::errors::enhance_store_error;
use crate::store::CardStore;
use crate::utils::formatting::{format_cards_csv, format_cards_human, format_cards_json};
use anyhow::Result;
use tracing::info;

/// Execute the view command
///
/// # Errors
/// Returns error if the wallet file exists but cannot be read, or if output
/// serialization fails
pub fn execute(settings: &Settings) -> Result<String> {
    let store = CardStore::new(&settings.wallet_file);
    let wallet = store.load().map_err(enhance_store_error)?;
    info!("Listing {} cards", wallet.len());

    match settings.output_format {
        OutputFormat::Human => format_cards_human(wallet.cards()),
        OutputFormat::Json => format_cards_json(wallet.cards()),
        OutputFormat::Csv => format_cards_csv(wallet.cards()),
    }
}

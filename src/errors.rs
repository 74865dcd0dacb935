//! Error types and actionable recovery suggestions
//!
//! [`StoreError`] is the typed failure of the card store. The command layer
//! turns it into an `anyhow::Error` through [`enhance_store_error`], which
//! appends guidance on how to fix the problem.

use anyhow::anyhow;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures raised by the card store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Card number is empty or contains something other than digits
    #[error("Card number must contain only digits: '{id}'")]
    InvalidIdFormat { id: String },

    /// Name cannot be stored as a single field of the wallet file
    #[error("{field} must be a single word without spaces: '{value}'")]
    InvalidNameFormat { field: &'static str, value: String },

    /// Balance text is not a number (strict parsing only)
    #[error("Balance is not a valid number: '{input}'")]
    InvalidBalanceFormat { input: String },

    /// Card number already present in the wallet
    #[error("Card number already exists: {id}")]
    DuplicateId { id: String },

    /// Wallet is full
    #[error("Maximum number of cards reached ({capacity})")]
    CapacityExceeded { capacity: usize },

    /// No card with this number
    #[error("Card not found: {id}")]
    NotFound { id: String },

    /// Wallet file exists but could not be read
    #[error("Could not read wallet file {}: {source}", .path.display())]
    PersistenceReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Wallet file could not be opened or written
    #[error("Could not open wallet file for writing {}: {source}", .path.display())]
    PersistenceWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convert a store error into a user-facing error with recovery steps
#[must_use]
pub fn enhance_store_error(error: StoreError) -> anyhow::Error {
    match &error {
        StoreError::InvalidIdFormat { .. } => anyhow!(
            "{error}\n\n\
             Card numbers may only contain the digits 0-9.\n\n\
             Example: card-wallet add 4111111111111111 Jane Doe 100.00"
        ),
        StoreError::InvalidNameFormat { .. } => anyhow!(
            "{error}\n\n\
             Each name is stored as one word. Join multi-part names, e.g. Mary-Ann."
        ),
        StoreError::InvalidBalanceFormat { .. } => anyhow!(
            "{error}\n\n\
             Strict balance parsing is enabled. Use a plain number such as 250 or 99.95,\n\
             or switch with --balance-parsing lenient"
        ),
        StoreError::DuplicateId { id } => anyhow!(
            "{error}\n\n\
             To fix this:\n  \
             • List existing cards with: card-wallet view\n  \
             • Remove the old card first: card-wallet remove {id}"
        ),
        StoreError::CapacityExceeded { .. } => anyhow!(
            "{error}\n\n\
             Remove a card you no longer need with: card-wallet remove <id>"
        ),
        StoreError::NotFound { .. } => anyhow!("{error}"),
        StoreError::PersistenceReadFailure { path, .. }
        | StoreError::PersistenceWriteFailure { path, .. } => {
            let hint = persistence_hint(path);
            anyhow!("{error}\n\n{hint}")
        }
    }
}

fn persistence_hint(path: &Path) -> String {
    format!(
        "Check:\n  \
         • The file and its directory are accessible: {}\n  \
         • You have read and write permission on it\n  \
         • Or point to another wallet with --file <PATH> or WALLET_FILE",
        path.display()
    )
}

//! Card wallet library
//!
//! Exposes the card store and the CLI commands for testing and library use.

#![forbid(unsafe_code)]

pub mod card;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_file;
pub mod errors;
pub mod store;
pub mod utils;

// Re-export for easy access
pub use card::{BalancePolicy, Card};
pub use config::{OutputFormat, Settings};
pub use errors::StoreError;
pub use store::{CardStore, NewCard, Wallet, MAX_CARDS};

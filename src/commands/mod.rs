//! Command implementations for the wallet CLI
//!
//! Each command lives in its own file and returns the text to print.

pub mod add_card;
pub mod completions;
pub mod config_file_ops;
pub mod remove_card;
pub mod view_cards;

// Re-export command execution functions for easy access
pub use add_card::execute as execute_add_card;
pub use completions::execute as execute_completions;
pub use remove_card::execute as execute_remove_card;
pub use view_cards::execute as execute_view_cards;

//! Utility modules for the wallet CLI
//!
//! This module contains shared utilities used across multiple commands.

pub mod colors;
pub mod formatting;

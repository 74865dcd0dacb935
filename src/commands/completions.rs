//! Shell completion script generation

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::{generate, Shell};

/// Execute the completions command
///
/// Returns the completion script for `shell`, ready to be redirected into
/// the shell's completion directory, e.g.
/// `card-wallet completions bash > ~/.local/share/bash-completion/completions/card-wallet`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8
pub fn execute(shell: Shell, mut cmd: Command) -> Result<String> {
    let bin_name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, bin_name, &mut script);

    String::from_utf8(script).context("Completion script is not valid UTF-8")
}

//! Color theme for wallet CLI output
//!
//! Respects the `NO_COLOR` environment variable, the `--no-color` flag and
//! disables colors when stdout is not a terminal.

use colored::{ColoredString, Colorize};
use std::sync::OnceLock;

/// Global color state, decided once per process
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

fn detect_colors(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Initialize color support based on environment and CLI flags
pub fn init_colors(no_color_flag: bool) {
    let enabled = *COLOR_ENABLED.get_or_init(|| detect_colors(no_color_flag));

    if !enabled {
        colored::control::set_override(false);
    }
}

/// Check if colors are enabled
#[must_use]
pub fn colors_enabled() -> bool {
    *COLOR_ENABLED.get_or_init(|| detect_colors(false))
}

/// Color theme for CLI output
pub struct Theme;

impl Theme {
    /// Success message color (green)
    #[must_use]
    pub fn success(text: &str) -> ColoredString {
        if colors_enabled() {
            text.green().bold()
        } else {
            text.normal()
        }
    }

    /// Error message color (red)
    #[must_use]
    pub fn error(text: &str) -> ColoredString {
        if colors_enabled() {
            text.red().bold()
        } else {
            text.normal()
        }
    }

    /// Warning and notice color (yellow)
    #[must_use]
    pub fn warning(text: &str) -> ColoredString {
        if colors_enabled() {
            text.yellow()
        } else {
            text.normal()
        }
    }

    /// Headings (blue)
    #[must_use]
    pub fn info(text: &str) -> ColoredString {
        if colors_enabled() {
            text.blue()
        } else {
            text.normal()
        }
    }

    /// Highlight important text (cyan)
    #[must_use]
    pub fn highlight(text: &str) -> ColoredString {
        if colors_enabled() {
            text.cyan().bold()
        } else {
            text.normal()
        }
    }

    /// Table header color (yellow, bold)
    #[must_use]
    pub fn header(text: &str) -> ColoredString {
        if colors_enabled() {
            text.yellow().bold()
        } else {
            text.normal()
        }
    }

    /// Dim text for secondary information (dark gray)
    #[must_use]
    pub fn dim(text: &str) -> ColoredString {
        if colors_enabled() {
            text.bright_black()
        } else {
            text.normal()
        }
    }

    /// Monetary amounts: green when non-negative, red otherwise
    #[must_use]
    pub fn amount(text: &str, negative: bool) -> ColoredString {
        if !colors_enabled() {
            text.normal()
        } else if negative {
            text.red()
        } else {
            text.green()
        }
    }

    /// Format a value with color (magenta for values)
    #[must_use]
    pub fn value(text: &str) -> ColoredString {
        if colors_enabled() {
            text.magenta()
        } else {
            text.normal()
        }
    }
}

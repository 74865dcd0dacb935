//! Card record model and its on-disk line codec
//!
//! A card occupies exactly one line of the wallet file:
//!
//! ```text
//! <id> <first_name> <last_name> <balance>
//! ```
//!
//! Fields are separated by a single space and the balance is always written
//! with two decimal places.

use crate::errors::StoreError;
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters kept from a card number
pub const MAX_ID_LEN: usize = 19;

/// Maximum number of characters kept from a first or last name
pub const MAX_NAME_LEN: usize = 49;

/// A single wallet card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Card number, digits only
    pub id: String,

    /// Holder first name
    pub first_name: String,

    /// Holder last name
    pub last_name: String,

    /// Current balance
    pub balance: f64,
}

impl Card {
    /// Build a card, clamping every text field to its maximum length
    #[must_use]
    pub fn new(id: &str, first_name: &str, last_name: &str, balance: f64) -> Self {
        Self {
            id: clamp(id, MAX_ID_LEN).to_string(),
            first_name: clamp(first_name, MAX_NAME_LEN).to_string(),
            last_name: clamp(last_name, MAX_NAME_LEN).to_string(),
            balance,
        }
    }

    /// Holder name as "First Last"
    #[must_use]
    pub fn holder(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Balance rounded to the two decimals that get persisted
    #[must_use]
    pub fn rounded_balance(&self) -> f64 {
        (self.balance * 100.0).round() / 100.0
    }
}

/// Renders the card as a wallet file line (without the trailing newline).
///
/// Text fields are clamped here as well, so a card built by hand can never
/// produce an over-long field on disk.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.2}",
            clamp(&self.id, MAX_ID_LEN),
            clamp(&self.first_name, MAX_NAME_LEN),
            clamp(&self.last_name, MAX_NAME_LEN),
            self.balance
        )
    }
}

/// Error produced when a wallet file line is not a well-formed card
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCardError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid balance '{0}'")]
    Balance(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [id, first_name, last_name, balance] = fields.as_slice() else {
            return Err(ParseCardError::FieldCount(fields.len()));
        };

        let balance = balance
            .parse::<f64>()
            .map_err(|_| ParseCardError::Balance((*balance).to_string()))?;

        // Stored data is trusted as-is
        Ok(Self {
            id: (*id).to_string(),
            first_name: (*first_name).to_string(),
            last_name: (*last_name).to_string(),
            balance,
        })
    }
}

/// How user-supplied balance text is turned into a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BalancePolicy {
    /// Use the longest numeric prefix (decimal, hex, inf or nan), else zero
    #[default]
    Lenient,

    /// Reject anything that is not a finite number
    Strict,
}

impl BalancePolicy {
    /// Parse a balance according to this policy
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBalanceFormat`] under the strict policy
    /// when the input is not a finite number. The lenient policy never fails.
    pub fn parse(self, input: &str) -> Result<f64, StoreError> {
        match self {
            Self::Lenient => Ok(leading_number(input)),
            Self::Strict => input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| StoreError::InvalidBalanceFormat {
                    input: input.to_string(),
                }),
        }
    }

    /// Name used in config files and environment variables
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for BalancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Truncate `value` to at most `max_chars` characters
#[must_use]
pub fn clamp(value: &str, max_chars: usize) -> &str {
    value
        .char_indices()
        .nth(max_chars)
        .map_or(value, |(byte_index, _)| &value[..byte_index])
}

/// Parse the longest numeric prefix of `input`, or zero
///
/// Accepts decimal (`12.5e3`), hexadecimal (`0x1.8p1`), `inf`/`infinity`
/// and `nan`, each with an optional sign, like C `strtod`.
fn leading_number(input: &str) -> f64 {
    let text = input.trim_start();
    let (sign, body) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    special_value(body)
        .or_else(|| hex_prefix(body))
        .or_else(|| decimal_prefix(body))
        .map_or(0.0, |magnitude| sign * magnitude)
}

fn special_value(body: &str) -> Option<f64> {
    let starts_with = |word: &str| {
        body.get(..word.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word))
    };

    if starts_with("inf") {
        Some(f64::INFINITY)
    } else if starts_with("nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

fn hex_digit(bytes: &[u8], index: usize) -> Option<u32> {
    bytes
        .get(index)
        .and_then(|b| char::from(*b).to_digit(16))
}

fn hex_prefix(body: &str) -> Option<f64> {
    let digits = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))?;
    let bytes = digits.as_bytes();

    let mut value = 0.0_f64;
    let mut end = 0;
    let mut seen_digit = false;
    while let Some(digit) = hex_digit(bytes, end) {
        value = value.mul_add(16.0, f64::from(digit));
        seen_digit = true;
        end += 1;
    }

    if bytes.get(end) == Some(&b'.') {
        end += 1;
        let mut scale = 1.0 / 16.0;
        while let Some(digit) = hex_digit(bytes, end) {
            value = f64::from(digit).mul_add(scale, value);
            scale /= 16.0;
            seen_digit = true;
            end += 1;
        }
    }

    // "0x" alone reads as the decimal 0
    if !seen_digit {
        return None;
    }

    if matches!(bytes.get(end), Some(b'p' | b'P')) {
        let exponent = &digits[end + 1..];
        let sign_len = usize::from(matches!(exponent.as_bytes().first(), Some(b'+' | b'-')));
        let digit_len = exponent.as_bytes()[sign_len..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digit_len > 0 {
            if let Ok(power) = exponent[..sign_len + digit_len].parse::<i32>() {
                value *= 2.0_f64.powi(power);
            }
        }
    }

    Some(value)
}

fn decimal_prefix(body: &str) -> Option<f64> {
    let bytes = body.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let int_digits = digits_from(0);
    let mut end = int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    body[..end].parse().ok()
}

//! Output formatting for the card list

use crate::card::Card;
use crate::utils::colors::Theme;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

/// Message shown for an empty wallet
pub const NO_CARDS_MESSAGE: &str = "No cards found.";

/// Format cards as the fixed-width table shown by `view`
///
/// # Errors
///
/// Returns an error only if writing to the output buffer fails
pub fn format_cards_human(cards: &[Card]) -> Result<String> {
    let mut output = String::new();

    if cards.is_empty() {
        write!(&mut output, "{}", Theme::warning(NO_CARDS_MESSAGE))?;
        return Ok(output);
    }

    writeln!(&mut output)?;
    writeln!(&mut output, "{}", Theme::info("Your cards:"))?;
    writeln!(
        &mut output,
        "{}",
        Theme::header("Number              Name                    Balance")
    )?;
    writeln!(&mut output, "{}", Theme::dim(&"-".repeat(48)))?;

    for (index, card) in cards.iter().enumerate() {
        // Pad before coloring so escape codes do not skew the columns
        write!(
            &mut output,
            "{} {} {} {}",
            Theme::highlight(&format!("{:<18}", card.id)),
            format_args!("{:<12}", card.first_name),
            format_args!("{:<12}", card.last_name),
            Theme::amount(&format!("{:.2}", card.balance), card.balance < 0.0)
        )?;
        if index + 1 < cards.len() {
            writeln!(&mut output)?;
        }
    }

    Ok(output)
}

#[derive(Serialize)]
struct CardRow<'a> {
    id: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    balance: String,
}

impl<'a> From<&'a Card> for CardRow<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            id: &card.id,
            first_name: &card.first_name,
            last_name: &card.last_name,
            balance: format!("{:.2}", card.balance),
        }
    }
}

/// Format cards for JSON output
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn format_cards_json(cards: &[Card]) -> Result<String> {
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "cards": cards.iter().map(|card| serde_json::json!({
            "id": card.id,
            "first_name": card.first_name,
            "last_name": card.last_name,
            "balance": card.rounded_balance(),
            "balance_display": format!("{:.2}", card.balance),
        })).collect::<Vec<_>>(),
        "count": cards.len(),
    }))?;
    Ok(json)
}

/// Format cards as CSV with a header row
///
/// # Errors
///
/// Returns an error if CSV serialization fails
pub fn format_cards_csv(cards: &[Card]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if cards.is_empty() {
        wtr.write_record(["id", "first_name", "last_name", "balance"])?;
    }
    for card in cards {
        wtr.serialize(CardRow::from(card))?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Card> {
        vec![
            Card::new("123456", "Jane", "Doe", 500.0),
            Card::new("42", "John", "Smith", -3.5),
        ]
    }

    #[test]
    fn test_human_empty() {
        let output = format_cards_human(&[]).expect("format");
        assert!(output.contains(NO_CARDS_MESSAGE));
    }

    #[test]
    fn test_human_table_rows() {
        let output = format_cards_human(&sample()).expect("format");
        assert!(output.contains("Your cards:"));
        assert!(output.contains("123456"));
        assert!(output.contains("Jane         Doe"));
        assert!(output.contains("500.00"));
        assert!(output.contains("-3.50"));
    }

    #[test]
    fn test_json_output() {
        let output = format_cards_json(&sample()).expect("format");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value["count"], 2);
        assert_eq!(value["cards"][0]["id"], "123456");
        assert_eq!(value["cards"][0]["balance_display"], "500.00");
        assert_eq!(value["cards"][1]["balance"], -3.5);
    }

    #[test]
    fn test_csv_output() {
        let output = format_cards_csv(&sample()).expect("format");
        assert_eq!(
            output,
            "id,first_name,last_name,balance\n123456,Jane,Doe,500.00\n42,John,Smith,-3.50"
        );
    }

    #[test]
    fn test_csv_empty_has_header() {
        let output = format_cards_csv(&[]).expect("format");
        assert_eq!(output, "id,first_name,last_name,balance");
    }
}

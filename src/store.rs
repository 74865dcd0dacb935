//! File-backed card store
//!
//! Every invocation loads the whole wallet file into a [`Wallet`], mutates
//! it in memory and, when something changed, rewrites the file in full.
//! There is no locking: two processes racing on the same file end with
//! whichever wrote last.

use crate::card::{clamp, BalancePolicy, Card, MAX_ID_LEN};
use crate::errors::StoreError;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Maximum number of cards a wallet can hold
pub const MAX_CARDS: usize = 100;

/// Wallet file used when nothing else is configured
pub const DEFAULT_WALLET_FILE: &str = "wallet.txt";

/// Card data supplied by the user for a new card
#[derive(Debug, Clone, Copy)]
pub struct NewCard<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub balance: &'a str,
}

/// In-memory, ordered set of cards with unique numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wallet {
    cards: Vec<Card>,
}

impl Wallet {
    /// Create an empty wallet
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// All cards in insertion order
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find a card by number
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Validate and append a new card
    ///
    /// Checks run in this order: card number format, name format, balance
    /// (per `policy`), duplicate number, capacity. The wallet is untouched
    /// when any check fails.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of the first failing check
    pub fn add(
        &mut self,
        new_card: NewCard<'_>,
        policy: BalancePolicy,
    ) -> Result<&Card, StoreError> {
        validate_id(new_card.id)?;
        validate_name("First name", new_card.first_name)?;
        validate_name("Last name", new_card.last_name)?;
        let balance = policy.parse(new_card.balance)?;

        // Compare on the stored form so two long numbers sharing a prefix collide
        let id = clamp(new_card.id, MAX_ID_LEN);
        if self.get(id).is_some() {
            return Err(StoreError::DuplicateId { id: id.to_string() });
        }

        if self.cards.len() >= MAX_CARDS {
            return Err(StoreError::CapacityExceeded {
                capacity: MAX_CARDS,
            });
        }

        let card = Card::new(id, new_card.first_name, new_card.last_name, balance);
        debug!("Adding card {} for {}", card.id, card.holder());
        self.cards.push(card);
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Remove the card with this number, returning it
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no card matches; the wallet is
    /// left unchanged in that case
    pub fn take(&mut self, id: &str) -> Result<Card, StoreError> {
        let index = self
            .cards
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(self.cards.remove(index))
    }

    /// Remove the card with this number, reporting whether it existed
    pub fn remove(&mut self, id: &str) -> bool {
        self.take(id).is_ok()
    }
}

/// Card storage backed by a plain text file
#[derive(Debug, Clone)]
pub struct CardStore {
    path: PathBuf,
}

impl CardStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing wallet file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every card from the wallet file
    ///
    /// A missing file is an empty wallet. Bytes that are not UTF-8 are read
    /// as U+FFFD, so the next save writes them back replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PersistenceReadFailure`] if the file exists but
    /// cannot be read
    pub fn load(&self) -> Result<Wallet, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!("Wallet file {} does not exist yet", self.path.display());
                return Ok(Wallet::new());
            }
            Err(source) => {
                return Err(StoreError::PersistenceReadFailure {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let contents = String::from_utf8_lossy(&bytes);
        if matches!(contents, Cow::Owned(_)) {
            warn!("Wallet file {} is not valid UTF-8", self.path.display());
        }

        let cards = parse_cards(&contents);
        info!("Loaded {} cards from {}", cards.len(), self.path.display());
        Ok(Wallet { cards })
    }

    /// Rewrite the wallet file with exactly these cards
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PersistenceWriteFailure`] if the file cannot be
    /// created, written or flushed. The previous contents may already be
    /// truncated at that point.
    pub fn save(&self, cards: &[Card]) -> Result<(), StoreError> {
        let write_failure = |source| StoreError::PersistenceWriteFailure {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_failure)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(render_cards(cards).as_bytes())
            .map_err(write_failure)?;
        writer.flush().map_err(write_failure)?;

        info!("Saved {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }
}

/// Parse wallet file contents
///
/// Reading stops at the first malformed line or once [`MAX_CARDS`] cards
/// are read. Blank lines are skipped.
#[must_use]
pub fn parse_cards(contents: &str) -> Vec<Card> {
    let mut cards = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if cards.len() >= MAX_CARDS {
            warn!(
                "Ignoring wallet entries from line {} on, capacity of {MAX_CARDS} reached",
                index + 1
            );
            break;
        }
        match line.parse::<Card>() {
            Ok(card) => cards.push(card),
            Err(err) => {
                warn!("Stopped reading wallet at line {}: {err}", index + 1);
                break;
            }
        }
    }

    cards
}

/// Serialize cards into wallet file contents, one line per card
#[must_use]
pub fn render_cards(cards: &[Card]) -> String {
    let mut contents = String::new();
    for card in cards {
        // Writing to a String cannot fail
        let _ = writeln!(contents, "{card}");
    }
    contents
}

fn validate_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::InvalidIdFormat { id: id.to_string() });
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(StoreError::InvalidNameFormat {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

//! A single entry in a card's append-only review history.

use super::Quality;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a card (SQLite rowid in the flashcards table).
pub type CardId = i64;

/// One review event for one card.
///
/// The review log is append-only: every review inserts a new record and
/// never touches earlier ones. A card's current scheduling state is the
/// most recent record by `reviewed_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub card_id: CardId,
    pub reviewed_at: DateTime<Utc>,
    /// Easiness factor, >= 1.3. New cards start at 2.5.
    pub ease_factor: f64,
    /// Days until the card is due again, >= 1.
    pub interval_days: i64,
    /// Consecutive correct reviews since the last failure.
    pub repetitions: i64,
    /// The rating that produced this record.
    pub quality: Quality,
}

impl ReviewRecord {
    /// The moment this card becomes due again.
    pub fn due_at(&self) -> DateTime<Utc> {
        self.reviewed_at + Duration::days(self.interval_days)
    }
}

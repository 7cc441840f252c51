//! Review scheduling over an injected record store.
//!
//! The scheduler owns two operations: recording a review (read the card's
//! latest state, apply SM-2, append a new history row) and selecting the
//! cards that are due at a given moment. It never touches the clock; every
//! operation takes `now` from the caller.

pub mod sm2;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CardId, Quality, ReviewRecord};
use sm2::SchedulingState;

/// Storage collaborator consumed by the scheduler.
///
/// The review log behind this trait is append-only: `append_review` must
/// never overwrite an existing row, and `fetch_latest_review` must order by
/// review time (with a stable tiebreak) so the current state of a card is
/// well-defined.
pub trait ReviewStore {
    /// The most recent review of the card, if it has ever been reviewed.
    fn fetch_latest_review(&self, card_id: CardId) -> Result<Option<ReviewRecord>>;

    /// Appends one review to the card's history.
    fn append_review(&self, record: &ReviewRecord) -> Result<()>;

    /// Ids of every card, optionally restricted to one deck.
    fn fetch_all_cards(&self, deck_name: Option<&str>) -> Result<Vec<CardId>>;
}

impl<S: ReviewStore + ?Sized> ReviewStore for &S {
    fn fetch_latest_review(&self, card_id: CardId) -> Result<Option<ReviewRecord>> {
        (**self).fetch_latest_review(card_id)
    }

    fn append_review(&self, record: &ReviewRecord) -> Result<()> {
        (**self).append_review(record)
    }

    fn fetch_all_cards(&self, deck_name: Option<&str>) -> Result<Vec<CardId>> {
        (**self).fetch_all_cards(deck_name)
    }
}

/// Decides review intervals and due cards for a record store.
pub struct ReviewScheduler<S> {
    store: S,
}

impl<S: ReviewStore> ReviewScheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records one review of a card and returns the appended record.
    ///
    /// Reads the card's latest history row (a card without one is treated
    /// as new), applies the SM-2 transition, and appends the result stamped
    /// with `now`. Storage errors propagate untouched; a failed append is
    /// never retried here since a duplicate row would corrupt the history.
    pub fn record_review(
        &self,
        card_id: CardId,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord> {
        let prior = self
            .store
            .fetch_latest_review(card_id)?
            .as_ref()
            .map(SchedulingState::from)
            .unwrap_or_default();

        let next = sm2::next_state(&prior, quality);
        let record = ReviewRecord {
            card_id,
            reviewed_at: now,
            ease_factor: next.ease_factor,
            interval_days: next.interval_days,
            repetitions: next.repetitions,
            quality,
        };

        self.store.append_review(&record)?;
        tracing::debug!(
            card_id,
            quality = quality.value(),
            interval_days = record.interval_days,
            "review recorded"
        );
        Ok(record)
    }

    /// Filters `candidates` down to the cards due at `now`.
    ///
    /// A card with no history is due immediately. Otherwise it is due once
    /// `now` reaches its last review time plus the interval. The result is
    /// ordered by due time, never-reviewed cards first; candidates sharing
    /// a due time keep their input order.
    pub fn due_cards(&self, candidates: &[CardId], now: DateTime<Utc>) -> Result<Vec<CardId>> {
        let mut due: Vec<(Option<DateTime<Utc>>, CardId)> = Vec::new();

        for &card_id in candidates {
            let due_at = self
                .store
                .fetch_latest_review(card_id)?
                .map(|record| record.due_at());
            match due_at {
                Some(at) if now < at => {}
                _ => due.push((due_at, card_id)),
            }
        }

        // None sorts before Some, so never-reviewed cards lead
        due.sort_by_key(|&(due_at, _)| due_at);
        Ok(due.into_iter().map(|(_, card_id)| card_id).collect())
    }

    /// Due cards of one deck (or of all decks), in due order.
    pub fn due_cards_in_deck(
        &self,
        deck_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<CardId>> {
        let candidates = self.store.fetch_all_cards(deck_name)?;
        self.due_cards(&candidates, now)
    }
}

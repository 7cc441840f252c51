//! Study session management for spaced repetition practice.
//! Drives multi-round review of due cards through the scheduler.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CardId, Flashcard, Quality, ReviewRecord};
use crate::scheduler::{ReviewScheduler, ReviewStore};

struct SessionCard {
    card_id: CardId,
    flashcard: Flashcard,
    passed: bool,
}

/// Tallies handed back when a session ends, shaped for
/// [`Database::record_daily_stats`](crate::database::Database::record_daily_stats).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub deck_name: String,
    /// Grades recorded, counting repeats across rounds.
    pub cards_studied: i64,
    pub correct_answers: i64,
    pub rounds: usize,
}

/// One sitting over a set of due cards.
///
/// Cards graded below 3 come back in a later round; the session is complete
/// once every card of the current round passed. Grades go through the
/// scheduler, so each one also appends to the card's review history.
pub struct StudySession {
    deck_name: String,
    cards: Vec<SessionCard>,
    current_round: Vec<usize>,
    position: usize,
    round_number: usize,
    reviews_recorded: i64,
    correct_answers: i64,
}

impl StudySession {
    /// Starts a session over `cards`, typically the due cards of one deck.
    pub fn new(deck_name: impl Into<String>, cards: Vec<(CardId, Flashcard)>) -> Self {
        let cards: Vec<SessionCard> = cards
            .into_iter()
            .map(|(card_id, flashcard)| SessionCard {
                card_id,
                flashcard,
                passed: false,
            })
            .collect();
        let current_round = (0..cards.len()).collect();

        Self {
            deck_name: deck_name.into(),
            cards,
            current_round,
            position: 0,
            round_number: 1,
            reviews_recorded: 0,
            correct_answers: 0,
        }
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    /// The card currently shown, if the session is not complete.
    pub fn current_card(&self) -> Option<(CardId, &Flashcard)> {
        if self.is_completed() {
            return None;
        }
        self.current_round
            .get(self.position)
            .and_then(|&idx| self.cards.get(idx))
            .map(|card| (card.card_id, &card.flashcard))
    }

    /// Grades the current card, recording the review through the scheduler.
    ///
    /// The card is marked passed when the grade counts as correct; failed
    /// cards repeat in the next round. Returns the appended record, or
    /// `None` when the session is already complete.
    pub fn grade_current<S: ReviewStore>(
        &mut self,
        scheduler: &ReviewScheduler<S>,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewRecord>> {
        if self.is_completed() {
            return Ok(None);
        }
        let Some(&idx) = self.current_round.get(self.position) else {
            return Ok(None);
        };

        let card = &mut self.cards[idx];
        let record = scheduler.record_review(card.card_id, quality, now)?;
        card.passed = quality.is_correct();

        self.reviews_recorded += 1;
        if quality.is_correct() {
            self.correct_answers += 1;
        }
        Ok(Some(record))
    }

    /// Moves to the next card, or into the next round at the end of one.
    pub fn advance(&mut self) {
        if self.current_round.is_empty() {
            return;
        }
        if self.position + 1 < self.current_round.len() {
            self.position += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Collects the failed cards of the finished round into a new one.
    /// An empty collection means every card passed and the session is done.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| !self.cards[idx].passed)
            .collect();

        if failed.is_empty() {
            return;
        }

        self.current_round = failed;
        self.position = 0;
        self.round_number += 1;
    }

    pub fn passed_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.cards[idx].passed)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.passed_count()
    }

    /// True once every card of the session has passed (or there were none).
    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty() || self.passed_count() == self.total_count()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            deck_name: self.deck_name.clone(),
            cards_studied: self.reviews_recorded,
            correct_answers: self.correct_answers,
            rounds: self.round_number,
        }
    }
}

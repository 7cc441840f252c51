//! SM-2 (SuperMemo 2) spaced repetition state transition.
//!
//! Each review moves a card through three coarse phases:
//! - Quality 0-2: the card was forgotten, repetitions and interval reset
//! - Quality 3-5: the interval ladder grows (1 day → 6 days → EF multiplier)
//! - The easiness factor adjusts after every review and never drops below 1.3

use crate::models::{Quality, ReviewRecord};

/// Easiness factor assigned to cards that have never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lower bound on the easiness factor.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The scheduling portion of a card's review state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: i64,
}

impl Default for SchedulingState {
    /// State of a card with no review history.
    fn default() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 1,
            repetitions: 0,
        }
    }
}

impl From<&ReviewRecord> for SchedulingState {
    fn from(record: &ReviewRecord) -> Self {
        Self {
            ease_factor: record.ease_factor,
            interval_days: record.interval_days,
            repetitions: record.repetitions,
        }
    }
}

/// Applies one review to a card's scheduling state.
///
/// The new interval is derived from the easiness factor in effect when the
/// review started; the easiness update below does not feed back into it.
/// Fractional day products are truncated toward zero, not rounded.
pub fn next_state(prior: &SchedulingState, quality: Quality) -> SchedulingState {
    let (interval_days, repetitions) = if quality.is_correct() {
        let interval = match prior.repetitions {
            0 => 1,
            1 => 6,
            _ => (prior.interval_days as f64 * prior.ease_factor) as i64,
        };
        (interval, prior.repetitions + 1)
    } else {
        // Forgotten: the card starts its ladder over
        (1, 0)
    };

    let q = quality.value() as f64;
    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let ease_factor = (prior.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

    SchedulingState {
        ease_factor,
        interval_days,
        repetitions,
    }
}

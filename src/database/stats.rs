//! Daily study statistics per deck.

use chrono::NaiveDate;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Database;

/// Study activity of one deck on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub cards_studied: i64,
    pub correct_answers: i64,
    pub study_time_seconds: i64,
}

/// Aggregated study activity over a period, newest day first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySummary {
    pub cards_studied: i64,
    pub correct_answers: i64,
    pub study_time_seconds: i64,
    /// Correct answers over cards studied; 0.0 when nothing was studied.
    pub accuracy_rate: f64,
    pub daily: Vec<DailyStats>,
}

impl Database {
    /// Adds a day's study activity to the running totals for a deck.
    ///
    /// Repeated calls for the same (deck, date) accumulate rather than
    /// overwrite, so several sessions on one day add up.
    pub fn record_daily_stats(
        &self,
        deck_name: &str,
        date: NaiveDate,
        cards_studied: i64,
        correct_answers: i64,
        study_time_seconds: i64,
    ) -> Result<()> {
        self.conn().execute(
            "INSERT INTO statistics \
             (deck_name, date, cards_studied, correct_answers, study_time_seconds) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(deck_name, date) DO UPDATE SET \
             cards_studied = cards_studied + excluded.cards_studied, \
             correct_answers = correct_answers + excluded.correct_answers, \
             study_time_seconds = study_time_seconds + excluded.study_time_seconds",
            params![
                deck_name,
                date.to_string(),
                cards_studied,
                correct_answers,
                study_time_seconds
            ],
        )?;
        Ok(())
    }

    /// Study statistics since `since` (inclusive), for one deck or all.
    pub fn study_statistics(
        &self,
        deck_name: Option<&str>,
        since: NaiveDate,
    ) -> Result<StudySummary> {
        let mut stmt = self.conn().prepare(
            "SELECT date, SUM(cards_studied), SUM(correct_answers), SUM(study_time_seconds) \
             FROM statistics \
             WHERE date >= ?1 AND (?2 IS NULL OR deck_name = ?2) \
             GROUP BY date ORDER BY date DESC",
        )?;

        let daily = stmt
            .query_map(params![since.to_string(), deck_name], |row| {
                let date: String = row.get(0)?;
                let date = date.parse::<NaiveDate>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(DailyStats {
                    date,
                    cards_studied: row.get(1)?,
                    correct_answers: row.get(2)?,
                    study_time_seconds: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let cards_studied: i64 = daily.iter().map(|d| d.cards_studied).sum();
        let correct_answers: i64 = daily.iter().map(|d| d.correct_answers).sum();
        let study_time_seconds: i64 = daily.iter().map(|d| d.study_time_seconds).sum();
        let accuracy_rate = if cards_studied > 0 {
            correct_answers as f64 / cards_studied as f64
        } else {
            0.0
        };

        Ok(StudySummary {
            cards_studied,
            correct_answers,
            study_time_seconds,
            accuracy_rate,
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_empty_statistics() {
        let db = Database::open_in_memory().unwrap();
        let summary = db.study_statistics(None, d(1)).unwrap();
        assert_eq!(summary.cards_studied, 0);
        assert_eq!(summary.accuracy_rate, 0.0);
        assert!(summary.daily.is_empty());
    }

    #[test]
    fn test_same_day_sessions_accumulate() {
        let db = Database::open_in_memory().unwrap();
        db.record_daily_stats("Spanish", d(1), 10, 7, 300).unwrap();
        db.record_daily_stats("Spanish", d(1), 5, 5, 120).unwrap();

        let summary = db.study_statistics(Some("Spanish"), d(1)).unwrap();
        assert_eq!(summary.daily.len(), 1);
        assert_eq!(summary.cards_studied, 15);
        assert_eq!(summary.correct_answers, 12);
        assert_eq!(summary.study_time_seconds, 420);
        assert!((summary.accuracy_rate - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_window_and_deck_filters() {
        let db = Database::open_in_memory().unwrap();
        db.record_daily_stats("Spanish", d(1), 4, 2, 60).unwrap();
        db.record_daily_stats("Spanish", d(10), 6, 6, 90).unwrap();
        db.record_daily_stats("Capitals", d(10), 8, 4, 80).unwrap();

        // Window cuts off the day-1 row
        let recent = db.study_statistics(Some("Spanish"), d(5)).unwrap();
        assert_eq!(recent.cards_studied, 6);

        // No deck filter merges both decks per day
        let all = db.study_statistics(None, d(5)).unwrap();
        assert_eq!(all.daily.len(), 1);
        assert_eq!(all.cards_studied, 14);
    }

    #[test]
    fn test_daily_breakdown_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.record_daily_stats("Spanish", d(2), 1, 1, 10).unwrap();
        db.record_daily_stats("Spanish", d(4), 2, 2, 20).unwrap();
        db.record_daily_stats("Spanish", d(3), 3, 3, 30).unwrap();

        let summary = db.study_statistics(Some("Spanish"), d(1)).unwrap();
        let dates: Vec<NaiveDate> = summary.daily.iter().map(|x| x.date).collect();
        assert_eq!(dates, vec![d(4), d(3), d(2)]);
    }
}

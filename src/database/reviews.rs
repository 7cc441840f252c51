//! Append-only review history.
//!
//! Every review inserts one row into review_log; nothing here updates or
//! deletes rows. The latest row per card carries the card's current
//! scheduling state.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};

use crate::error::Result;
use crate::models::{CardId, Quality, ReviewRecord};

use super::Database;

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ReviewRecord> {
    let reviewed_at: String = row.get(1)?;
    let reviewed_at = DateTime::parse_from_rfc3339(&reviewed_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let quality = Quality::new(row.get(5)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Integer, Box::new(e)))?;

    Ok(ReviewRecord {
        card_id: row.get(0)?,
        reviewed_at,
        ease_factor: row.get(2)?,
        interval_days: row.get(3)?,
        repetitions: row.get(4)?,
        quality,
    })
}

const RECORD_COLUMNS: &str =
    "card_id, reviewed_at, ease_factor, interval_days, repetitions, quality";

impl Database {
    /// Appends one review to the log.
    pub fn insert_review(&self, record: &ReviewRecord) -> Result<()> {
        self.conn().execute(
            "INSERT INTO review_log \
             (card_id, reviewed_at, ease_factor, interval_days, repetitions, quality) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.card_id,
                record.reviewed_at.to_rfc3339(),
                record.ease_factor,
                record.interval_days,
                record.repetitions,
                record.quality.value(),
            ],
        )?;
        Ok(())
    }

    /// The most recent review of a card.
    ///
    /// Rows sharing a timestamp are broken by insertion order, so the state
    /// read here is always the one written last.
    pub fn latest_review(&self, card_id: CardId) -> Result<Option<ReviewRecord>> {
        let record = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM review_log \
                     WHERE card_id = ?1 ORDER BY reviewed_at DESC, id DESC LIMIT 1"
                ),
                params![card_id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Full review history of a card, oldest first.
    pub fn review_history(&self, card_id: CardId) -> Result<Vec<ReviewRecord>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM review_log \
             WHERE card_id = ?1 ORDER BY reviewed_at, id"
        ))?;
        let records = stmt
            .query_map(params![card_id], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Number of logged reviews for a card.
    pub fn review_count(&self, card_id: CardId) -> Result<i64> {
        let count = self.conn().query_row(
            "SELECT COUNT(*) FROM review_log WHERE card_id = ?1",
            params![card_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

//! Table creation for the DoroLexus database.

use rusqlite::Connection;

/// Creates all tables and indexes if they do not exist yet.
///
/// The review_log table is append-only: rows are inserted by
/// `Database::insert_review` and only ever removed when their card is
/// deleted. Statistics accumulate per (deck, day).
pub(super) fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS decks (
            name TEXT PRIMARY KEY,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_name TEXT NOT NULL
                REFERENCES decks(name) ON DELETE CASCADE ON UPDATE CASCADE,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            UNIQUE(deck_name, front)
        );

        CREATE TABLE IF NOT EXISTS review_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            card_id INTEGER NOT NULL
                REFERENCES flashcards(id) ON DELETE CASCADE,
            reviewed_at TEXT NOT NULL,
            ease_factor REAL NOT NULL,
            interval_days INTEGER NOT NULL,
            repetitions INTEGER NOT NULL,
            quality INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_review_log_card
            ON review_log(card_id, reviewed_at);

        CREATE TABLE IF NOT EXISTS statistics (
            deck_name TEXT NOT NULL,
            date TEXT NOT NULL,
            cards_studied INTEGER NOT NULL DEFAULT 0,
            correct_answers INTEGER NOT NULL DEFAULT 0,
            study_time_seconds INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (deck_name, date)
        );
        "#,
    )
}

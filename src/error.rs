//! Error types for the DoroLexus core.

use thiserror::Error;

/// All errors surfaced by the scheduling and persistence layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Review quality rating outside the 0-5 scale
    #[error("quality rating {0} is out of range (expected 0-5)")]
    QualityOutOfRange(u8),

    /// Deck with this name already exists
    #[error("deck '{0}' already exists")]
    DeckExists(String),

    /// No deck with this name
    #[error("no deck named '{0}'")]
    DeckNotFound(String),

    /// Card with this front already exists in the deck
    #[error("deck '{deck}' already has a card '{front}'")]
    CardExists { deck: String, front: String },

    /// No card with this id
    #[error("no card with id {0}")]
    CardNotFound(i64),

    /// Storage error from SQLite
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error (deck import/export)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for DoroLexus operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_out_of_range_message() {
        let err = Error::QualityOutOfRange(7);
        assert_eq!(err.to_string(), "quality rating 7 is out of range (expected 0-5)");
    }

    #[test]
    fn test_card_exists_message() {
        let err = Error::CardExists {
            deck: "Spanish".to_string(),
            front: "hola".to_string(),
        };
        assert_eq!(err.to_string(), "deck 'Spanish' already has a card 'hola'");
    }
}

//! Deck is a named set of flashcards
use super::Flashcard;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub flashcards: Vec<Flashcard>,
}

impl Deck {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            flashcards: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }
}

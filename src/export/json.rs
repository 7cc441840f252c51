//! JSON import/export for flashcard decks.
//! Decks round-trip through files as {name, description, flashcards}.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::models::Deck;

/// Writes a deck to a JSON file at `path`, overwriting any existing file.
pub fn export_deck(deck: &Deck, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, deck)?;
    tracing::info!(deck = %deck.name, path = %path.display(), "deck exported");
    Ok(())
}

/// Reads a deck back from a JSON file.
pub fn import_deck(path: &Path) -> Result<Deck> {
    let file = File::open(path)?;
    let deck: Deck = serde_json::from_reader(BufReader::new(file))?;
    tracing::info!(deck = %deck.name, path = %path.display(), "deck imported");
    Ok(deck)
}

//! Deck and flashcard CRUD.

use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use crate::error::{Error, Result};
use crate::models::{CardId, Deck, Flashcard};

use super::Database;

impl Database {
    /// Creates a new deck. Fails if a deck with this name already exists.
    pub fn create_deck(&self, name: &str, description: &str) -> Result<()> {
        let inserted = self.conn().execute(
            "INSERT OR IGNORE INTO decks (name, description, created_at) VALUES (?1, ?2, ?3)",
            params![name, description, Utc::now().to_rfc3339()],
        )?;
        if inserted == 0 {
            return Err(Error::DeckExists(name.to_string()));
        }
        Ok(())
    }

    /// Renames a deck and replaces its description.
    ///
    /// Card rows follow the rename through the foreign key cascade.
    pub fn update_deck(&self, name: &str, new_name: &str, description: &str) -> Result<()> {
        if new_name != name && self.deck_exists(new_name)? {
            return Err(Error::DeckExists(new_name.to_string()));
        }
        let updated = self.conn().execute(
            "UPDATE decks SET name = ?1, description = ?2 WHERE name = ?3",
            params![new_name, description, name],
        )?;
        if updated == 0 {
            return Err(Error::DeckNotFound(name.to_string()));
        }
        Ok(())
    }

    /// Deletes a deck with all its cards and their review history.
    pub fn delete_deck(&self, name: &str) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM decks WHERE name = ?1", params![name])?;
        if deleted == 0 {
            return Err(Error::DeckNotFound(name.to_string()));
        }
        Ok(())
    }

    pub fn deck_exists(&self, name: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn()
            .query_row(
                "SELECT 1 FROM decks WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All deck names, oldest deck first.
    pub fn deck_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT name FROM decks ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Adds a card to a deck and returns its id.
    ///
    /// Fails if the deck does not exist or already has a card with this front.
    pub fn add_card(&self, deck_name: &str, front: &str, back: &str) -> Result<CardId> {
        if !self.deck_exists(deck_name)? {
            return Err(Error::DeckNotFound(deck_name.to_string()));
        }

        let inserted = self.conn().execute(
            "INSERT OR IGNORE INTO flashcards (deck_name, front, back) VALUES (?1, ?2, ?3)",
            params![deck_name, front, back],
        )?;
        if inserted == 0 {
            return Err(Error::CardExists {
                deck: deck_name.to_string(),
                front: front.to_string(),
            });
        }
        Ok(self.conn().last_insert_rowid())
    }

    /// Replaces both sides of a card.
    pub fn update_card(&self, card_id: CardId, front: &str, back: &str) -> Result<()> {
        let updated = self.conn().execute(
            "UPDATE flashcards SET front = ?1, back = ?2 WHERE id = ?3",
            params![front, back, card_id],
        )?;
        if updated == 0 {
            return Err(Error::CardNotFound(card_id));
        }
        Ok(())
    }

    /// Deletes a card and its review history.
    pub fn delete_card(&self, card_id: CardId) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM flashcards WHERE id = ?1", params![card_id])?;
        if deleted == 0 {
            return Err(Error::CardNotFound(card_id));
        }
        Ok(())
    }

    /// All cards of a deck as (id, card) pairs, in insertion order.
    pub fn cards_in_deck(&self, deck_name: &str) -> Result<Vec<(CardId, Flashcard)>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, front, back FROM flashcards WHERE deck_name = ?1 ORDER BY id",
        )?;
        let cards = stmt
            .query_map(params![deck_name], |row| {
                Ok((
                    row.get(0)?,
                    Flashcard {
                        front: row.get(1)?,
                        back: row.get(2)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// Ids of every card, optionally restricted to one deck.
    pub fn card_ids(&self, deck_name: Option<&str>) -> Result<Vec<CardId>> {
        let ids = match deck_name {
            Some(deck) => {
                let mut stmt = self
                    .conn()
                    .prepare("SELECT id FROM flashcards WHERE deck_name = ?1 ORDER BY id")?;
                let ids = stmt
                    .query_map(params![deck], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<CardId>>>()?;
                ids
            }
            None => {
                let mut stmt = self.conn().prepare("SELECT id FROM flashcards ORDER BY id")?;
                let ids = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<CardId>>>()?;
                ids
            }
        };
        Ok(ids)
    }

    /// Loads one deck with its cards.
    pub fn load_deck(&self, name: &str) -> Result<Deck> {
        let description: String = self
            .conn()
            .query_row(
                "SELECT description FROM decks WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::DeckNotFound(name.to_string()))?;

        let flashcards = self
            .cards_in_deck(name)?
            .into_iter()
            .map(|(_, card)| card)
            .collect();

        Ok(Deck {
            name: name.to_string(),
            description,
            flashcards,
        })
    }

    /// Loads every deck with its cards.
    pub fn load_all_decks(&self) -> Result<Vec<Deck>> {
        self.deck_names()?
            .iter()
            .map(|name| self.load_deck(name))
            .collect()
    }

    /// Stores a deck and its cards, e.g. one parsed from a JSON file.
    pub fn import_deck(&self, deck: &Deck) -> Result<()> {
        self.create_deck(&deck.name, &deck.description)?;
        for card in &deck.flashcards {
            self.add_card(&deck.name, &card.front, &card.back)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_and_list_decks() {
        let db = db();
        db.create_deck("Spanish", "vocabulary").unwrap();
        db.create_deck("Capitals", "").unwrap();

        assert_eq!(db.deck_names().unwrap(), vec!["Spanish", "Capitals"]);
    }

    #[test]
    fn test_duplicate_deck_rejected() {
        let db = db();
        db.create_deck("Spanish", "").unwrap();
        assert!(matches!(
            db.create_deck("Spanish", "again"),
            Err(Error::DeckExists(name)) if name == "Spanish"
        ));
    }

    #[test]
    fn test_update_deck_renames_and_moves_cards() {
        let db = db();
        db.create_deck("Spansh", "").unwrap();
        db.add_card("Spansh", "hola", "hello").unwrap();

        db.update_deck("Spansh", "Spanish", "fixed typo").unwrap();

        let deck = db.load_deck("Spanish").unwrap();
        assert_eq!(deck.description, "fixed typo");
        assert_eq!(deck.flashcards.len(), 1);
        assert!(matches!(
            db.load_deck("Spansh"),
            Err(Error::DeckNotFound(_))
        ));
    }

    #[test]
    fn test_rename_onto_existing_deck_rejected() {
        let db = db();
        db.create_deck("A", "").unwrap();
        db.create_deck("B", "").unwrap();
        assert!(matches!(db.update_deck("A", "B", ""), Err(Error::DeckExists(_))));
    }

    #[test]
    fn test_add_card_requires_deck() {
        let db = db();
        assert!(matches!(
            db.add_card("Nope", "front", "back"),
            Err(Error::DeckNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_front_in_deck_rejected() {
        let db = db();
        db.create_deck("Spanish", "").unwrap();
        db.add_card("Spanish", "hola", "hello").unwrap();
        assert!(matches!(
            db.add_card("Spanish", "hola", "hi"),
            Err(Error::CardExists { .. })
        ));
        // Same front in another deck is fine
        db.create_deck("Greetings", "").unwrap();
        db.add_card("Greetings", "hola", "hello").unwrap();
    }

    #[test]
    fn test_update_and_delete_card() {
        let db = db();
        db.create_deck("Spanish", "").unwrap();
        let id = db.add_card("Spanish", "hola", "helo").unwrap();

        db.update_card(id, "hola", "hello").unwrap();
        let cards = db.cards_in_deck("Spanish").unwrap();
        assert_eq!(cards[0].1.back, "hello");

        db.delete_card(id).unwrap();
        assert!(db.cards_in_deck("Spanish").unwrap().is_empty());
        assert!(matches!(db.delete_card(id), Err(Error::CardNotFound(_))));
    }

    #[test]
    fn test_delete_deck_cascades_to_cards() {
        let db = db();
        db.create_deck("Spanish", "").unwrap();
        db.add_card("Spanish", "hola", "hello").unwrap();
        db.add_card("Spanish", "adios", "goodbye").unwrap();

        db.delete_deck("Spanish").unwrap();
        assert!(db.card_ids(None).unwrap().is_empty());
    }

    #[test]
    fn test_card_ids_scoped_by_deck() {
        let db = db();
        db.create_deck("A", "").unwrap();
        db.create_deck("B", "").unwrap();
        let a1 = db.add_card("A", "x", "1").unwrap();
        let b1 = db.add_card("B", "y", "2").unwrap();
        let a2 = db.add_card("A", "z", "3").unwrap();

        assert_eq!(db.card_ids(Some("A")).unwrap(), vec![a1, a2]);
        assert_eq!(db.card_ids(None).unwrap(), vec![a1, b1, a2]);
    }

    #[test]
    fn test_load_all_decks_in_creation_order() {
        let db = db();
        db.create_deck("First", "").unwrap();
        db.create_deck("Second", "").unwrap();
        db.add_card("Second", "hola", "hello").unwrap();

        let decks = db.load_all_decks().unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].name, "First");
        assert!(decks[0].is_empty());
        assert_eq!(decks[1].flashcards, vec![Flashcard::new("hola", "hello")]);
    }

    #[test]
    fn test_import_deck_roundtrip() {
        let db = db();
        let mut deck = Deck::new("Imported", "from a file");
        deck.flashcards.push(Flashcard::new("un", "one"));
        deck.flashcards.push(Flashcard::new("deux", "two"));

        db.import_deck(&deck).unwrap();
        assert_eq!(db.load_deck("Imported").unwrap(), deck);
    }
}

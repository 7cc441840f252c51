pub mod deck;
pub mod flashcard;
pub mod quality;
pub mod review_record;

pub use deck::Deck;
pub use flashcard::Flashcard;
pub use quality::Quality;
pub use review_record::{CardId, ReviewRecord};

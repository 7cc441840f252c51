pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod paths;
pub mod scheduler;
pub mod session;

pub use database::Database;
pub use error::{Error, Result};
pub use models::{CardId, Deck, Flashcard, Quality, ReviewRecord};
pub use scheduler::{ReviewScheduler, ReviewStore};
pub use session::{SessionSummary, StudySession};

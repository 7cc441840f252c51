pub mod json;

pub use json::{export_deck, import_deck};

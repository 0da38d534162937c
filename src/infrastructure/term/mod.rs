pub mod key_notation;
pub mod terminal_database;

pub use key_notation::KeyNotation;
pub use terminal_database::VtKeyDatabase;

pub mod key_notation_port;
pub mod key_source_port;
pub mod terminal_db_port;

pub use key_notation_port::KeyNotationPort;
pub use key_source_port::KeySource;
pub use terminal_db_port::TerminalKeyDbPort;

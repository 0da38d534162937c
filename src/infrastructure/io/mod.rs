pub mod fd_key_source;

pub use fd_key_source::FdKeySource;

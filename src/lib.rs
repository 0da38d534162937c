//! Key user input engine for a terminal debugger front-end.
//!
//! Translates the raw byte stream of a terminal descriptor into logical
//! keys in two cascaded stages: terminal escape sequences collapse into
//! symbolic keys, then user-defined macros rewrite the result. Both stages
//! run the same incremental longest-match matcher over sorted mapping sets,
//! with a pushback buffer covering the read-one-too-far that overlapping
//! triggers force.

pub mod domain;
pub mod infrastructure;
pub mod interface_adapter;
pub mod shared;
pub mod usecase;

pub use domain::model::{Mapping, MappingSet, MatchState};
pub use domain::primitive::{KeyCode, KeySequence};
pub use interface_adapter::adapter::create_manager;
pub use shared::error::KuiError;
pub use usecase::{KuiContext, KuiManager};

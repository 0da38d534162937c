pub mod mapping;
pub mod mapping_set;

pub use mapping::Mapping;
pub use mapping_set::{MappingSet, MatchState};

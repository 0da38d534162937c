use crate::domain::model::MappingSet;
use crate::shared::error::KuiError;

/// Terminal-key database port.
///
/// Supplies the pre-built mapping set that translates terminal escape
/// sequences into symbolic keys. The engine consumes the set opaquely; where
/// the sequences come from (a built-in table, terminfo, ...) is an
/// infrastructure concern.
pub trait TerminalKeyDbPort {
    fn terminal_mappings(&self) -> Result<MappingSet, KuiError>;
}

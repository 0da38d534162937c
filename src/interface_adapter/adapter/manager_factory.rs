use std::os::unix::io::RawFd;

use crate::infrastructure::io::FdKeySource;
use crate::infrastructure::term::{KeyNotation, VtKeyDatabase};
use crate::interface_adapter::port::TerminalKeyDbPort;
use crate::shared::error::KuiError;
use crate::usecase::kui_manager::KuiManager;

/// Wires the concrete infrastructure into a ready-to-use cascade reading
/// from `fd`: descriptor polling below, the built-in terminal-key database
/// in the terminal stage, the standard key notation for user macros.
pub fn create_manager(fd: RawFd) -> Result<KuiManager<FdKeySource, KeyNotation>, KuiError> {
    let terminal_maps = VtKeyDatabase.terminal_mappings()?;
    Ok(KuiManager::new(
        FdKeySource::new(fd),
        terminal_maps,
        KeyNotation,
    ))
}

// =============================================================================
// Tests
// =============================================================================

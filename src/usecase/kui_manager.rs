use crate::domain::model::{Mapping, MappingSet};
use crate::domain::primitive::KeyCode;
use crate::interface_adapter::port::{KeyNotationPort, KeySource};
use crate::shared::error::KuiError;
use crate::usecase::kui_context::KuiContext;

/// Escape-sequence disambiguation window for the terminal stage.
pub const TERMINAL_TIMEOUT_MS: u32 = 40;

/// Macro disambiguation window for the user stage.
pub const USER_TIMEOUT_MS: u32 = 1000;

/// Index of the manager-owned user macro set inside the user stage.
const USER_MACROS: usize = 0;

/// Key source that pulls from a downstream stage.
///
/// The user stage reads through this wrapper: a key already buffered in the
/// terminal stage is returned outright; otherwise the terminal stage is
/// asked for a key only once its own source reports data within the window.
/// That keeps the idle-timeout semantic intact across the stack.
struct ChainedSource<S: KeySource> {
    inner: KuiContext<S>,
}

impl<S: KeySource> KeySource for ChainedSource<S> {
    fn next_key(&mut self, timeout_ms: u32) -> Result<Option<KeyCode>, KuiError> {
        if self.inner.can_get_key() {
            return self.inner.get_key();
        }
        if self.inner.data_ready(timeout_ms)? {
            return self.inner.get_key();
        }
        Ok(None)
    }

    fn data_ready(&mut self, timeout_ms: u32) -> Result<bool, KuiError> {
        Ok(self.inner.can_get_key() || self.inner.data_ready(timeout_ms)?)
    }
}

/// The two-stage cascade.
///
/// A terminal stage decodes escape sequences read from the raw source with
/// a short timeout; a user stage applies user macros to the decoded keys
/// with a long timeout. The user stage owns the terminal stage through its
/// source, so the whole pipeline is a single value.
pub struct KuiManager<S: KeySource, N: KeyNotationPort> {
    user: KuiContext<ChainedSource<S>>,
    notation: N,
}

impl<S: KeySource, N: KeyNotationPort> KuiManager<S, N> {
    /// Assemble the cascade with the default timeouts.
    pub fn new(terminal_source: S, terminal_maps: MappingSet, notation: N) -> Self {
        Self::with_timeouts(
            terminal_source,
            terminal_maps,
            notation,
            TERMINAL_TIMEOUT_MS,
            USER_TIMEOUT_MS,
        )
    }

    pub fn with_timeouts(
        terminal_source: S,
        terminal_maps: MappingSet,
        notation: N,
        terminal_timeout_ms: u32,
        user_timeout_ms: u32,
    ) -> Self {
        let mut terminal = KuiContext::new(terminal_source, terminal_timeout_ms);
        terminal.add_map_set(terminal_maps);

        let mut user = KuiContext::new(ChainedSource { inner: terminal }, user_timeout_ms);
        // The manager's own macro set sits first so sets added later
        // override it on ties.
        user.add_map_set(MappingSet::new());

        Self { user, notation }
    }

    /// Register a user macro from its textual notation.
    pub fn register_user_map(
        &mut self,
        trigger_text: &str,
        replacement_text: &str,
    ) -> Result<(), KuiError> {
        let trigger = self.notation.decode(trigger_text)?;
        let replacement = self.notation.decode(replacement_text)?;
        let mapping = Mapping::with_notation(trigger_text, replacement_text, trigger, replacement);
        self.user.map_sets_mut()[USER_MACROS].register(mapping);
        Ok(())
    }

    /// Remove a user macro by its textual notation. Absence is the distinct
    /// `MappingNotFound` error.
    pub fn deregister_user_map(&mut self, trigger_text: &str) -> Result<(), KuiError> {
        let trigger = self.notation.decode(trigger_text)?;
        self.user.map_sets_mut()[USER_MACROS].deregister(trigger.keys())
    }

    /// Hand a whole mapping set to the user stage. Later sets win ties.
    pub fn add_map_set(&mut self, set: MappingSet) {
        self.user.add_map_set(set);
    }

    /// The user stage's mapping sets, manager-owned macro set first.
    pub fn map_sets(&self) -> &[MappingSet] {
        self.user.map_sets()
    }

    /// Whether a key can be delivered without reading the descriptor.
    pub fn can_get_key(&self) -> bool {
        self.user.can_get_key()
    }

    /// Deliver the next logical key, or `Ok(None)` after an idle window.
    pub fn get_key(&mut self) -> Result<Option<KeyCode>, KuiError> {
        self.user.get_key()
    }
}

// =============================================================================
// Tests
// =============================================================================

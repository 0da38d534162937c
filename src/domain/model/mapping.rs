use crate::domain::primitive::KeySequence;

/// A single key mapping: when the user types `trigger`, the engine produces
/// `replacement` instead.
///
/// Both sides are decoded key sequences. The original notation strings are
/// kept purely for diagnostics (error messages, listings); matching never
/// looks at them.
#[derive(Debug, Clone)]
pub struct Mapping {
    trigger_text: String,
    replacement_text: String,
    trigger: KeySequence,
    replacement: KeySequence,
}

impl Mapping {
    /// Build a mapping from decoded sequences, rendering the diagnostic
    /// notation from the sequences themselves.
    pub fn new(trigger: KeySequence, replacement: KeySequence) -> Self {
        Self {
            trigger_text: trigger.to_string(),
            replacement_text: replacement.to_string(),
            trigger,
            replacement,
        }
    }

    /// Build a mapping that remembers the notation it was decoded from.
    pub fn with_notation(
        trigger_text: impl Into<String>,
        replacement_text: impl Into<String>,
        trigger: KeySequence,
        replacement: KeySequence,
    ) -> Self {
        Self {
            trigger_text: trigger_text.into(),
            replacement_text: replacement_text.into(),
            trigger,
            replacement,
        }
    }

    pub fn trigger(&self) -> &KeySequence {
        &self.trigger
    }

    pub fn replacement(&self) -> &KeySequence {
        &self.replacement
    }

    pub fn trigger_text(&self) -> &str {
        &self.trigger_text
    }

    pub fn replacement_text(&self) -> &str {
        &self.replacement_text
    }
}

// =============================================================================
// Tests
// =============================================================================

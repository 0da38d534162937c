use std::fmt;

use crate::domain::primitive::KeyCode;
use crate::shared::error::KuiError;

/// A finite, non-empty sequence of key codes.
///
/// Sequences are the currency of the whole engine: mapping triggers, mapping
/// replacements, and decoded notation are all `KeySequence`s. The derived
/// `Ord` is total lexicographic order on the key codes, under which a strict
/// prefix sorts before any of its extensions; the matcher's sorted storage
/// relies on that property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySequence(Vec<KeyCode>);

impl KeySequence {
    /// Wrap a list of key codes. An empty list is rejected.
    pub fn new(keys: Vec<KeyCode>) -> Result<Self, KuiError> {
        if keys.is_empty() {
            return Err(KuiError::EmptySequence);
        }
        Ok(Self(keys))
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this sequence begins with `prefix`.
    pub fn starts_with(&self, prefix: &[KeyCode]) -> bool {
        self.0.len() >= prefix.len() && self.0[..prefix.len()] == *prefix
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

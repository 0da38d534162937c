use crate::domain::primitive::KeySequence;
use crate::shared::error::KuiError;

/// Key-syntax decoder port.
///
/// Turns user-facing notation such as `a<Esc>b<C-x>` into decoded key
/// sequences. The engine depends only on the result shape; the concrete
/// syntax lives in infrastructure.
pub trait KeyNotationPort {
    /// Decode `text` into a key sequence. Empty or malformed text is an
    /// error, never a silent empty sequence.
    fn decode(&self, text: &str) -> Result<KeySequence, KuiError>;
}

use crate::domain::primitive::KeyCode;
use crate::shared::error::KuiError;

/// Raw-key source port.
///
/// Defines the boundary between an input stage and whatever feeds it: the
/// terminal descriptor at the bottom of the cascade, or the previous stage
/// anywhere above it. Concrete implementations live in infrastructure
/// (descriptor polling) and in the cascade wiring (stage chaining).
pub trait KeySource {
    /// Pull the next key, waiting at most `timeout_ms` milliseconds.
    ///
    /// `Ok(Some(key))` is a key, `Ok(None)` means nothing arrived within
    /// the window (idle, which is not an error), `Err` is a hard upstream
    /// failure.
    fn next_key(&mut self, timeout_ms: u32) -> Result<Option<KeyCode>, KuiError>;

    /// Probe whether `next_key` would deliver without exhausting its
    /// timeout, waiting at most `timeout_ms` for the answer.
    fn data_ready(&mut self, timeout_ms: u32) -> Result<bool, KuiError>;
}

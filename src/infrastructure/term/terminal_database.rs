use crate::domain::model::{Mapping, MappingSet};
use crate::domain::primitive::{KeyCode, KeySequence};
use crate::interface_adapter::port::TerminalKeyDbPort;
use crate::shared::error::KuiError;

const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

/// Byte sequences emitted by VT100/xterm/linux-console terminals, paired
/// with the symbolic key each decodes to. The lone ESC entry is what lets
/// the matcher's idle cut-off distinguish a pressed Escape key from the
/// start of a longer sequence.
const SEQUENCES: &[(&[u8], KeyCode)] = &[
    (&[ESC], KeyCode::ESC),
    // Cursor keys, CSI and SS3 variants.
    (&[ESC, b'[', b'A'], KeyCode::UP),
    (&[ESC, b'[', b'B'], KeyCode::DOWN),
    (&[ESC, b'[', b'C'], KeyCode::RIGHT),
    (&[ESC, b'[', b'D'], KeyCode::LEFT),
    (&[ESC, b'O', b'A'], KeyCode::UP),
    (&[ESC, b'O', b'B'], KeyCode::DOWN),
    (&[ESC, b'O', b'C'], KeyCode::RIGHT),
    (&[ESC, b'O', b'D'], KeyCode::LEFT),
    // Home / End variants.
    (&[ESC, b'[', b'H'], KeyCode::HOME),
    (&[ESC, b'O', b'H'], KeyCode::HOME),
    (&[ESC, b'[', b'1', b'~'], KeyCode::HOME),
    (&[ESC, b'[', b'7', b'~'], KeyCode::HOME),
    (&[ESC, b'[', b'F'], KeyCode::END),
    (&[ESC, b'O', b'F'], KeyCode::END),
    (&[ESC, b'[', b'4', b'~'], KeyCode::END),
    (&[ESC, b'[', b'8', b'~'], KeyCode::END),
    // Editing pad.
    (&[ESC, b'[', b'2', b'~'], KeyCode::INSERT),
    (&[ESC, b'[', b'3', b'~'], KeyCode::DELETE),
    (&[ESC, b'[', b'5', b'~'], KeyCode::PAGE_UP),
    (&[ESC, b'[', b'6', b'~'], KeyCode::PAGE_DOWN),
    // F1-F4, SS3 variant.
    (&[ESC, b'O', b'P'], KeyCode::F1),
    (&[ESC, b'O', b'Q'], KeyCode::F2),
    (&[ESC, b'O', b'R'], KeyCode::F3),
    (&[ESC, b'O', b'S'], KeyCode::F4),
    // F1-F5, linux console variant.
    (&[ESC, b'[', b'[', b'A'], KeyCode::F1),
    (&[ESC, b'[', b'[', b'B'], KeyCode::F2),
    (&[ESC, b'[', b'[', b'C'], KeyCode::F3),
    (&[ESC, b'[', b'[', b'D'], KeyCode::F4),
    (&[ESC, b'[', b'[', b'E'], KeyCode::F5),
    // Function keys, CSI tilde codes.
    (&[ESC, b'[', b'1', b'1', b'~'], KeyCode::F1),
    (&[ESC, b'[', b'1', b'2', b'~'], KeyCode::F2),
    (&[ESC, b'[', b'1', b'3', b'~'], KeyCode::F3),
    (&[ESC, b'[', b'1', b'4', b'~'], KeyCode::F4),
    (&[ESC, b'[', b'1', b'5', b'~'], KeyCode::F5),
    (&[ESC, b'[', b'1', b'7', b'~'], KeyCode::F6),
    (&[ESC, b'[', b'1', b'8', b'~'], KeyCode::F7),
    (&[ESC, b'[', b'1', b'9', b'~'], KeyCode::F8),
    (&[ESC, b'[', b'2', b'0', b'~'], KeyCode::F9),
    (&[ESC, b'[', b'2', b'1', b'~'], KeyCode::F10),
    (&[ESC, b'[', b'2', b'3', b'~'], KeyCode::F11),
    (&[ESC, b'[', b'2', b'4', b'~'], KeyCode::F12),
    // DEL byte.
    (&[DEL], KeyCode::BACKSPACE),
];

/// Built-in terminal-key database.
///
/// Materializes the sequence table above as a mapping set for the terminal
/// stage of the cascade.
pub struct VtKeyDatabase;

impl TerminalKeyDbPort for VtKeyDatabase {
    fn terminal_mappings(&self) -> Result<MappingSet, KuiError> {
        let mut set = MappingSet::new();
        for &(sequence, key) in SEQUENCES {
            let trigger =
                KeySequence::new(sequence.iter().map(|&b| KeyCode::from_byte(b)).collect())?;
            let replacement = KeySequence::new(vec![key])?;
            set.register(Mapping::new(trigger, replacement));
        }
        Ok(set)
    }
}

// =============================================================================
// Tests
// =============================================================================

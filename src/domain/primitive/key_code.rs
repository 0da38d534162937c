use std::fmt;

/// A single logical key: either a raw terminal byte or a symbolic key.
///
/// The code space is split by [`KeyCode::SYMBOLIC_BASE`]:
/// - `1..=255` are raw bytes exactly as read from the descriptor,
/// - `256..` are symbolic keys produced by terminal-sequence decoding
///   (arrows, function keys, ...).
///
/// Zero is never constructed; sequences carry their own length instead of a
/// terminator. Ordering is plain integer ordering, so every raw byte sorts
/// before every symbolic key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(u32);

impl KeyCode {
    /// First code reserved for symbolic keys.
    pub const SYMBOLIC_BASE: u32 = 256;

    pub const ESC: KeyCode = KeyCode(256);
    pub const UP: KeyCode = KeyCode(257);
    pub const DOWN: KeyCode = KeyCode(258);
    pub const LEFT: KeyCode = KeyCode(259);
    pub const RIGHT: KeyCode = KeyCode(260);
    pub const HOME: KeyCode = KeyCode(261);
    pub const END: KeyCode = KeyCode(262);
    pub const PAGE_UP: KeyCode = KeyCode(263);
    pub const PAGE_DOWN: KeyCode = KeyCode(264);
    pub const INSERT: KeyCode = KeyCode(265);
    pub const DELETE: KeyCode = KeyCode(266);
    pub const BACKSPACE: KeyCode = KeyCode(267);
    pub const F1: KeyCode = KeyCode(268);
    pub const F2: KeyCode = KeyCode(269);
    pub const F3: KeyCode = KeyCode(270);
    pub const F4: KeyCode = KeyCode(271);
    pub const F5: KeyCode = KeyCode(272);
    pub const F6: KeyCode = KeyCode(273);
    pub const F7: KeyCode = KeyCode(274);
    pub const F8: KeyCode = KeyCode(275);
    pub const F9: KeyCode = KeyCode(276);
    pub const F10: KeyCode = KeyCode(277);
    pub const F11: KeyCode = KeyCode(278);
    pub const F12: KeyCode = KeyCode(279);

    /// Wrap a raw byte. The zero byte is not a key; callers filter it out
    /// before constructing (the descriptor reader reports it as idle).
    pub fn from_byte(byte: u8) -> Self {
        debug_assert!(byte != 0, "the zero byte is not a key code");
        Self(byte as u32)
    }

    /// The function key `F1`..`F12`, or `None` outside that range.
    pub fn function(n: u8) -> Option<Self> {
        match n {
            1..=12 => Some(Self(Self::F1.0 + (n as u32 - 1))),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_byte(self) -> bool {
        self.0 < Self::SYMBOLIC_BASE
    }

    pub fn is_symbolic(self) -> bool {
        self.0 >= Self::SYMBOLIC_BASE
    }

    /// The raw byte value, or `None` for symbolic keys.
    pub fn as_byte(self) -> Option<u8> {
        if self.is_byte() {
            Some(self.0 as u8)
        } else {
            None
        }
    }

    /// Canonical name of a symbolic key, or `None` for raw bytes.
    pub fn symbolic_name(self) -> Option<&'static str> {
        let name = match self {
            Self::ESC => "Esc",
            Self::UP => "Up",
            Self::DOWN => "Down",
            Self::LEFT => "Left",
            Self::RIGHT => "Right",
            Self::HOME => "Home",
            Self::END => "End",
            Self::PAGE_UP => "PageUp",
            Self::PAGE_DOWN => "PageDown",
            Self::INSERT => "Insert",
            Self::DELETE => "Del",
            Self::BACKSPACE => "BS",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            _ => return None,
        };
        Some(name)
    }
}

/// Diagnostic rendering: printable bytes as themselves, control bytes in
/// `<C-x>` form, symbolic keys by name.
impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.symbolic_name() {
            return write!(f, "<{name}>");
        }
        match self.0 as u8 {
            b'\t' => write!(f, "<Tab>"),
            b'\r' => write!(f, "<CR>"),
            b'\n' => write!(f, "<NL>"),
            b @ 0x01..=0x1A => write!(f, "<C-{}>", (b'a' + b - 1) as char),
            b @ 0x20..=0x7E => write!(f, "{}", b as char),
            b => write!(f, "<0x{b:02x}>"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

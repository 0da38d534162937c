use crate::domain::primitive::{KeyCode, KeySequence};
use crate::interface_adapter::port::KeyNotationPort;
use crate::shared::error::KuiError;

/// Decoder for the textual key syntax.
///
/// Plain characters stand for themselves (non-ASCII contributes its UTF-8
/// bytes). Angle-bracket tokens are case-insensitive and name either a
/// symbolic key (`<Esc>`, `<Up>`, `<F1>`, ...), a control chord
/// (`<C-a>`..`<C-z>`), or one of a few byte aliases (`<Tab>`, `<CR>`,
/// `<Space>`, `<LT>` for a literal `<`).
pub struct KeyNotation;

impl KeyNotationPort for KeyNotation {
    fn decode(&self, text: &str) -> Result<KeySequence, KuiError> {
        decode(text)
    }
}

fn decode(text: &str) -> Result<KeySequence, KuiError> {
    if text.is_empty() {
        return Err(invalid(text, "notation is empty"));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut keys: Vec<KeyCode> = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '<' => {
                let Some(len) = chars[i + 1..].iter().position(|&c| c == '>') else {
                    return Err(invalid(text, "unterminated '<' token"));
                };
                let token: String = chars[i + 1..i + 1 + len].iter().collect();
                keys.push(decode_token(text, &token)?);
                i += len + 2;
            }
            '\0' => return Err(invalid(text, "NUL is not a key")),
            c => {
                push_char(&mut keys, c);
                i += 1;
            }
        }
    }

    KeySequence::new(keys)
}

fn decode_token(text: &str, token: &str) -> Result<KeyCode, KuiError> {
    let lower = token.to_ascii_lowercase();

    if let Some(chord) = lower.strip_prefix("c-") {
        let mut it = chord.chars();
        return match (it.next(), it.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {
                Ok(KeyCode::from_byte(c as u8 - b'a' + 1))
            }
            _ => Err(invalid(text, &format!("unknown control chord '<{token}>'"))),
        };
    }

    if let Some(key) = named_key(&lower) {
        return Ok(key);
    }

    if let Some(key) = lower
        .strip_prefix('f')
        .and_then(|digits| digits.parse::<u8>().ok())
        .and_then(KeyCode::function)
    {
        return Ok(key);
    }

    Err(invalid(text, &format!("unknown key name '<{token}>'")))
}

fn named_key(lower: &str) -> Option<KeyCode> {
    let key = match lower {
        "esc" | "escape" => KeyCode::ESC,
        "up" => KeyCode::UP,
        "down" => KeyCode::DOWN,
        "left" => KeyCode::LEFT,
        "right" => KeyCode::RIGHT,
        "home" => KeyCode::HOME,
        "end" => KeyCode::END,
        "pageup" | "pgup" => KeyCode::PAGE_UP,
        "pagedown" | "pgdown" => KeyCode::PAGE_DOWN,
        "insert" | "ins" => KeyCode::INSERT,
        "del" | "delete" => KeyCode::DELETE,
        "bs" | "backspace" => KeyCode::BACKSPACE,
        "tab" => KeyCode::from_byte(b'\t'),
        "cr" | "enter" | "return" => KeyCode::from_byte(b'\r'),
        "space" => KeyCode::from_byte(b' '),
        "lt" => KeyCode::from_byte(b'<'),
        _ => return None,
    };
    Some(key)
}

/// Append a literal character as its UTF-8 bytes.
fn push_char(keys: &mut Vec<KeyCode>, c: char) {
    let mut buf = [0u8; 4];
    for &byte in c.encode_utf8(&mut buf).as_bytes() {
        keys.push(KeyCode::from_byte(byte));
    }
}

fn invalid(text: &str, reason: &str) -> KuiError {
    KuiError::InvalidNotation {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

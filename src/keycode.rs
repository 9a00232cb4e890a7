//! HID usage codes
//!
//! Keyboard usages come from the HID Usage Tables, page 0x07, and consumer
//! usages from page 0x0C. Both are thin newtypes so boards can name usages the
//! constants below do not cover.

/// A keyboard page usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

#[allow(missing_docs)]
impl KeyCode {
    pub const A: KeyCode = KeyCode(0x04);
    pub const B: KeyCode = KeyCode(0x05);
    pub const C: KeyCode = KeyCode(0x06);
    pub const D: KeyCode = KeyCode(0x07);
    pub const E: KeyCode = KeyCode(0x08);
    pub const F: KeyCode = KeyCode(0x09);
    pub const S: KeyCode = KeyCode(0x16);
    pub const V: KeyCode = KeyCode(0x19);
    pub const X: KeyCode = KeyCode(0x1B);
    pub const Z: KeyCode = KeyCode(0x1D);
    pub const ONE: KeyCode = KeyCode(0x1E);
    pub const ZERO: KeyCode = KeyCode(0x27);
    pub const ENTER: KeyCode = KeyCode(0x28);
    pub const ESCAPE: KeyCode = KeyCode(0x29);
    pub const BACKSPACE: KeyCode = KeyCode(0x2A);
    pub const TAB: KeyCode = KeyCode(0x2B);
    pub const SPACE: KeyCode = KeyCode(0x2C);
    pub const MINUS: KeyCode = KeyCode(0x2D);
    pub const EQUALS: KeyCode = KeyCode(0x2E);
    pub const LEFT_BRACKET: KeyCode = KeyCode(0x2F);
    pub const RIGHT_BRACKET: KeyCode = KeyCode(0x30);
    pub const BACKSLASH: KeyCode = KeyCode(0x31);
    pub const SEMICOLON: KeyCode = KeyCode(0x33);
    pub const QUOTE: KeyCode = KeyCode(0x34);
    pub const GRAVE_ACCENT: KeyCode = KeyCode(0x35);
    pub const COMMA: KeyCode = KeyCode(0x36);
    pub const PERIOD: KeyCode = KeyCode(0x37);
    pub const FORWARD_SLASH: KeyCode = KeyCode(0x38);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x39);
    pub const F1: KeyCode = KeyCode(0x3A);
    pub const F12: KeyCode = KeyCode(0x45);
    pub const PRINT_SCREEN: KeyCode = KeyCode(0x46);
    pub const INSERT: KeyCode = KeyCode(0x49);
    pub const HOME: KeyCode = KeyCode(0x4A);
    pub const PAGE_UP: KeyCode = KeyCode(0x4B);
    pub const DELETE: KeyCode = KeyCode(0x4C);
    pub const END: KeyCode = KeyCode(0x4D);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x4E);
    pub const RIGHT_ARROW: KeyCode = KeyCode(0x4F);
    pub const LEFT_ARROW: KeyCode = KeyCode(0x50);
    pub const DOWN_ARROW: KeyCode = KeyCode(0x51);
    pub const UP_ARROW: KeyCode = KeyCode(0x52);
    pub const KEYPAD_NUMLOCK: KeyCode = KeyCode(0x53);
    pub const KEYPAD_FORWARD_SLASH: KeyCode = KeyCode(0x54);
    pub const KEYPAD_ASTERISK: KeyCode = KeyCode(0x55);
    pub const KEYPAD_MINUS: KeyCode = KeyCode(0x56);
    pub const KEYPAD_PLUS: KeyCode = KeyCode(0x57);
    pub const KEYPAD_ENTER: KeyCode = KeyCode(0x58);
    pub const KEYPAD_ONE: KeyCode = KeyCode(0x59);
    pub const KEYPAD_TWO: KeyCode = KeyCode(0x5A);
    pub const KEYPAD_THREE: KeyCode = KeyCode(0x5B);
    pub const KEYPAD_FOUR: KeyCode = KeyCode(0x5C);
    pub const KEYPAD_FIVE: KeyCode = KeyCode(0x5D);
    pub const KEYPAD_SIX: KeyCode = KeyCode(0x5E);
    pub const KEYPAD_SEVEN: KeyCode = KeyCode(0x5F);
    pub const KEYPAD_EIGHT: KeyCode = KeyCode(0x60);
    pub const KEYPAD_NINE: KeyCode = KeyCode(0x61);
    pub const KEYPAD_ZERO: KeyCode = KeyCode(0x62);
    pub const KEYPAD_PERIOD: KeyCode = KeyCode(0x63);
    pub const APPLICATION: KeyCode = KeyCode(0x65);
    pub const CONTROL: KeyCode = KeyCode(0xE0);
    pub const SHIFT: KeyCode = KeyCode(0xE1);
    pub const ALT: KeyCode = KeyCode(0xE2);
    pub const WINDOWS: KeyCode = KeyCode(0xE3);
    pub const RIGHT_CONTROL: KeyCode = KeyCode(0xE4);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(0xE5);
    pub const RIGHT_ALT: KeyCode = KeyCode(0xE6);
    pub const RIGHT_GUI: KeyCode = KeyCode(0xE7);

    /// `F1`..`F12`; `None` outside that range.
    pub const fn function(n: u8) -> Option<KeyCode> {
        if n >= 1 && n <= 12 {
            Some(KeyCode(Self::F1.0 + n - 1))
        } else {
            None
        }
    }

    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::CONTROL.0 && self.0 <= Self::RIGHT_GUI.0
    }

    /// Bit this modifier occupies in the report's modifier byte.
    pub const fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self.0 - Self::CONTROL.0))
        } else {
            None
        }
    }

    /// Map a character to the key that types it on a US layout, and whether
    /// shift has to be held for it.
    pub fn from_ascii(c: char) -> Option<(KeyCode, bool)> {
        let code = match c {
            'a'..='z' => return Some((KeyCode(Self::A.0 + (c as u8 - b'a')), false)),
            'A'..='Z' => return Some((KeyCode(Self::A.0 + (c as u8 - b'A')), true)),
            '1'..='9' => return Some((KeyCode(Self::ONE.0 + (c as u8 - b'1')), false)),
            '0' => (Self::ZERO, false),
            '\n' => (Self::ENTER, false),
            '\t' => (Self::TAB, false),
            ' ' => (Self::SPACE, false),
            '\x08' => (Self::BACKSPACE, false),
            '\x1b' => (Self::ESCAPE, false),
            '-' => (Self::MINUS, false),
            '_' => (Self::MINUS, true),
            '=' => (Self::EQUALS, false),
            '+' => (Self::EQUALS, true),
            '[' => (Self::LEFT_BRACKET, false),
            '{' => (Self::LEFT_BRACKET, true),
            ']' => (Self::RIGHT_BRACKET, false),
            '}' => (Self::RIGHT_BRACKET, true),
            '\\' => (Self::BACKSLASH, false),
            '|' => (Self::BACKSLASH, true),
            ';' => (Self::SEMICOLON, false),
            ':' => (Self::SEMICOLON, true),
            '\'' => (Self::QUOTE, false),
            '"' => (Self::QUOTE, true),
            '`' => (Self::GRAVE_ACCENT, false),
            '~' => (Self::GRAVE_ACCENT, true),
            ',' => (Self::COMMA, false),
            '<' => (Self::COMMA, true),
            '.' => (Self::PERIOD, false),
            '>' => (Self::PERIOD, true),
            '/' => (Self::FORWARD_SLASH, false),
            '?' => (Self::FORWARD_SLASH, true),
            '!' => (Self::ONE, true),
            '@' => (KeyCode(0x1F), true),
            '#' => (KeyCode(0x20), true),
            '$' => (KeyCode(0x21), true),
            '%' => (KeyCode(0x22), true),
            '^' => (KeyCode(0x23), true),
            '&' => (KeyCode(0x24), true),
            '*' => (KeyCode(0x25), true),
            '(' => (KeyCode(0x26), true),
            ')' => (Self::ZERO, true),
            _ => return None,
        };
        Some(code)
    }
}

/// A consumer page usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerCode(pub u16);

#[allow(missing_docs)]
impl ConsumerCode {
    pub const BRIGHTNESS_UP: ConsumerCode = ConsumerCode(0x6F);
    pub const BRIGHTNESS_DOWN: ConsumerCode = ConsumerCode(0x70);
    pub const RECORD: ConsumerCode = ConsumerCode(0xB2);
    pub const FAST_FORWARD: ConsumerCode = ConsumerCode(0xB3);
    pub const REWIND: ConsumerCode = ConsumerCode(0xB4);
    pub const SCAN_NEXT_TRACK: ConsumerCode = ConsumerCode(0xB5);
    pub const SCAN_PREVIOUS_TRACK: ConsumerCode = ConsumerCode(0xB6);
    pub const STOP: ConsumerCode = ConsumerCode(0xB7);
    pub const EJECT: ConsumerCode = ConsumerCode(0xB8);
    pub const PLAY_PAUSE: ConsumerCode = ConsumerCode(0xCD);
    pub const MUTE: ConsumerCode = ConsumerCode(0xE2);
    pub const VOLUME_INCREMENT: ConsumerCode = ConsumerCode(0xE9);
    pub const VOLUME_DECREMENT: ConsumerCode = ConsumerCode(0xEA);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_follow_usage_order() {
        assert_eq!(KeyCode::from_ascii('a'), Some((KeyCode::A, false)));
        assert_eq!(KeyCode::from_ascii('z'), Some((KeyCode::Z, false)));
        assert_eq!(KeyCode::from_ascii('S'), Some((KeyCode::S, true)));
        assert_eq!(KeyCode::from_ascii('1'), Some((KeyCode::ONE, false)));
        assert_eq!(KeyCode::from_ascii('0'), Some((KeyCode::ZERO, false)));
        assert_eq!(KeyCode::from_ascii('!'), Some((KeyCode::ONE, true)));
        assert_eq!(KeyCode::from_ascii('é'), None);
    }

    #[test]
    fn modifiers_map_to_report_bits() {
        assert_eq!(KeyCode::CONTROL.modifier_bit(), Some(0b0000_0001));
        assert_eq!(KeyCode::SHIFT.modifier_bit(), Some(0b0000_0010));
        assert_eq!(KeyCode::WINDOWS.modifier_bit(), Some(0b0000_1000));
        assert_eq!(KeyCode::RIGHT_GUI.modifier_bit(), Some(0b1000_0000));
        assert_eq!(KeyCode::ESCAPE.modifier_bit(), None);
    }

    #[test]
    fn function_keys() {
        assert_eq!(KeyCode::function(1), Some(KeyCode::F1));
        assert_eq!(KeyCode::function(12), Some(KeyCode::F12));
        assert_eq!(KeyCode::function(13), None);
        assert_eq!(KeyCode::function(0), None);
    }
}

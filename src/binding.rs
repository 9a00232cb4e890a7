//! Key bindings and layers
//!
//! A [`Layer`] is a named set of up to twelve [`KeyBinding`]s, one per key
//! slot. Bindings are built once at startup and never change shape; the only
//! thing allowed to vary is state an [`Action`] keeps for itself, such as the
//! current color of a [`ColorToggle`].

use core::cell::Cell;

use crate::config::KEY_COUNT;
use crate::error::Error;
use crate::keycode::{ConsumerCode, KeyCode};
use crate::sink::DeckSink;
use crate::types::Rgb;

/// Modifiers plus keys a single [`Action::SendKeys`] chord can hold.
pub const MAX_CHORD: usize = 8;

/// Keys pressed together by one action.
pub type Chord = heapless::Vec<KeyCode, MAX_CHORD>;

/// What a key does when pressed.
pub enum Action {
    /// Press the keys together, then release them
    SendKeys(Chord),
    /// Tap a consumer control usage
    SendConsumer(ConsumerCode),
    /// Type a string
    SendText(&'static str),
    /// Flip the key's color, then tap a consumer usage
    Toggle(ColorToggle),
    /// Anything else
    Custom(fn(&mut dyn DeckSink)),
}

impl Action {
    /// Single key or chord. Codes past [`MAX_CHORD`] are ignored.
    pub fn keys(codes: &[KeyCode]) -> Self {
        let mut chord = Chord::new();
        for code in codes {
            if chord.push(*code).is_err() {
                warn!("Chord longer than {} keys truncated", MAX_CHORD);
                break;
            }
        }
        Action::SendKeys(chord)
    }

    pub fn key(code: KeyCode) -> Self {
        Self::keys(&[code])
    }

    pub fn consumer(code: ConsumerCode) -> Self {
        Action::SendConsumer(code)
    }

    pub fn text(text: &'static str) -> Self {
        Action::SendText(text)
    }

    /// Run the action for the key at `slot`.
    pub fn invoke(&self, slot: usize, sink: &mut dyn DeckSink) {
        match self {
            Action::SendKeys(chord) => sink.send_key(chord),
            Action::SendConsumer(code) => sink.send_consumer_code(*code),
            Action::SendText(text) => sink.send_text(text),
            Action::Toggle(toggle) => toggle.fire(slot, sink),
            Action::Custom(f) => f(sink),
        }
    }
}

/// Two-color state owned by one binding, e.g. a play/pause key that shows
/// whether media is playing.
pub struct ColorToggle {
    colors: [Rgb; 2],
    lit: Cell<usize>,
    code: ConsumerCode,
}

impl ColorToggle {
    /// Starts on `first`; the first press switches to `second`.
    pub fn new(first: Rgb, second: Rgb, code: ConsumerCode) -> Self {
        Self {
            colors: [first, second],
            lit: Cell::new(0),
            code,
        }
    }

    /// Color the key currently shows.
    pub fn current(&self) -> Rgb {
        self.colors[self.lit.get()]
    }

    fn fire(&self, slot: usize, sink: &mut dyn DeckSink) {
        self.lit.set(1 - self.lit.get());
        sink.set_slot_color(slot, self.current());
        sink.send_consumer_code(self.code);
    }
}

/// Label, color and action for one key of one layer.
pub struct KeyBinding {
    slot: usize,
    label: &'static str,
    color: Rgb,
    action: Option<Action>,
}

impl KeyBinding {
    /// Bind key `key`, numbered 1 to 12 as printed on the keypad.
    pub fn new(key: u8, label: &'static str, color: Rgb, action: Option<Action>) -> Result<Self, Error> {
        if key == 0 {
            return Err(Error::InvalidSlot(key));
        }
        Self::at_slot(usize::from(key - 1), label, color, action).map_err(|_| Error::InvalidSlot(key))
    }

    /// Bind the zero-based `slot`.
    pub fn at_slot(slot: usize, label: &'static str, color: Rgb, action: Option<Action>) -> Result<Self, Error> {
        if slot >= KEY_COUNT {
            return Err(Error::InvalidSlot(u8::try_from(slot).unwrap_or(u8::MAX)));
        }
        Ok(Self {
            slot,
            label,
            color,
            action,
        })
    }

    /// A white key with an action, the common case.
    pub fn with_action(key: u8, label: &'static str, action: Action) -> Result<Self, Error> {
        Self::new(key, label, Rgb::WHITE, Some(action))
    }

    /// A labelled key that does nothing.
    pub fn blank(key: u8, label: &'static str, color: Rgb) -> Result<Self, Error> {
        Self::new(key, label, color, None)
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }
}

/// A named set of key bindings.
pub struct Layer {
    name: &'static str,
    bindings: [Option<KeyBinding>; KEY_COUNT],
}

impl Layer {
    /// When two bindings share a slot the first one is kept.
    pub fn new(name: &'static str, bindings: impl IntoIterator<Item = KeyBinding>) -> Self {
        let mut slots: [Option<KeyBinding>; KEY_COUNT] = Default::default();
        for binding in bindings {
            let slot = binding.slot;
            if slots[slot].is_some() {
                warn!("Layer {}: key slot {} bound twice, keeping the first", name, slot);
                continue;
            }
            slots[slot] = Some(binding);
        }
        Self {
            name,
            bindings: slots,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn binding(&self, slot: usize) -> Option<&KeyBinding> {
        self.bindings.get(slot).and_then(Option::as_ref)
    }

    /// Bindings in slot order.
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter().flatten()
    }
}

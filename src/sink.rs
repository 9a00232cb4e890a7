//! Capability interface between the switchboard and the hardware
//!
//! The switchboard never touches a peripheral directly: it reads input through
//! [`InputSource`] and drives the keypad through [`DeckSink`]. Key actions get
//! the same `DeckSink` handle, so a binding can type, light its own key, or
//! both.

use crate::keycode::{ConsumerCode, KeyCode};
use crate::types::{KeyEvent, Rgb};

/// Debounced input from the keys and the encoder.
pub trait InputSource {
    /// Oldest pending key transition, at most one per call.
    fn read_key_event(&mut self) -> Option<KeyEvent>;

    /// Encoder position in detents. Only differences between reads matter.
    fn read_encoder_position(&mut self) -> i32;

    /// true once for every press edge of the encoder switch.
    fn read_encoder_button_pressed(&mut self) -> bool;

    /// Drop key events that have not been read yet.
    fn reset_keys(&mut self) {}
}

/// USB keyboard and consumer control output.
pub trait HidSink {
    /// Press every code together, then release them.
    fn send_key(&mut self, codes: &[KeyCode]);

    /// Press and release a consumer control usage.
    fn send_consumer_code(&mut self, code: ConsumerCode);

    /// Type `text` on a US layout. Characters without a key are skipped.
    fn send_text(&mut self, text: &str);

    /// Release every held key and consumer usage.
    fn release_all(&mut self);
}

/// Per-key RGB lighting. Writes stay invisible until [`LightSink::flush_lights`].
pub trait LightSink {
    fn set_slot_color(&mut self, slot: usize, color: Rgb);

    /// Global brightness, `0.0..=1.0`.
    fn set_brightness(&mut self, brightness: f32);

    fn flush_lights(&mut self);
}

/// Line-oriented text display. Writes stay invisible until
/// [`DisplaySink::flush_display`].
pub trait DisplaySink {
    /// Replace line `row`; row 0 is the title.
    fn set_display_line(&mut self, row: usize, text: &str);

    fn flush_display(&mut self);
}

/// Everything a key action and the switchboard may drive.
pub trait DeckSink: HidSink + LightSink + DisplaySink {
    /// Silence the speaker.
    fn stop_tone(&mut self) {}
}

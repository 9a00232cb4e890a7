//! MacroPad input scanner
//!
//! Bundles the key matrix, the encoder and its switch behind
//! [`InputSource`]. The main loop calls [`MacroPadInput::scan`] once per tick
//! before handing the scanner to the switchboard.

use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::buttons::DirectKeys;
use crate::config::KEY_COUNT;
use crate::encoder::{EncoderSwitch, RotaryEncoder};
use crate::sink::InputSource;
use crate::types::KeyEvent;

pub struct MacroPadInput<K, A, B, S>
where
    K: InputPin,
    A: InputPin,
    B: InputPin,
    S: InputPin,
{
    keys: DirectKeys<K, KEY_COUNT>,
    encoder: RotaryEncoder<A, B>,
    switch: EncoderSwitch<S>,
}

impl<K, A, B, S> MacroPadInput<K, A, B, S>
where
    K: InputPin,
    A: InputPin,
    B: InputPin,
    S: InputPin,
{
    pub fn new(keys: DirectKeys<K, KEY_COUNT>, encoder: RotaryEncoder<A, B>, switch: EncoderSwitch<S>) -> Self {
        Self { keys, encoder, switch }
    }

    /// Sample every input once.
    pub fn scan(&mut self, now: Instant) {
        self.keys.scan(now);
        self.encoder.update();
        self.switch.update(now);
    }

    pub fn keys(&self) -> &DirectKeys<K, KEY_COUNT> {
        &self.keys
    }
}

impl<K, A, B, S> InputSource for MacroPadInput<K, A, B, S>
where
    K: InputPin,
    A: InputPin,
    B: InputPin,
    S: InputPin,
{
    fn read_key_event(&mut self) -> Option<KeyEvent> {
        self.keys.next_event()
    }

    fn read_encoder_position(&mut self) -> i32 {
        self.encoder.position()
    }

    fn read_encoder_button_pressed(&mut self) -> bool {
        self.switch.take_pressed()
    }

    fn reset_keys(&mut self) {
        self.keys.clear_events();
    }
}

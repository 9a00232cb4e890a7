//! Rotary encoder and its push switch
//!
//! Quadrature decoding uses the transition lookup table popularised by QMK:
//! every valid Gray-code step adds or removes one pulse, and a full detent is
//! [`ENCODER_PULSES_PER_DETENT`] pulses. Glitches (both lines changing at once)
//! map to zero and are ignored.

use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::buttons::ButtonDebouncer;
use crate::config::ENCODER_PULSES_PER_DETENT;

/// Indexed by `new_b new_a old_b old_a`, with "low" read as 1.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

pub struct RotaryEncoder<A: InputPin, B: InputPin> {
    pin_a: A,
    pin_b: B,
    state: u8,
    pulses: i32,
    position: i32,
    reverse: bool,
}

impl<A: InputPin, B: InputPin> RotaryEncoder<A, B> {
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self {
            pin_a,
            pin_b,
            state: 0,
            pulses: 0,
            position: 0,
            reverse: false,
        }
    }

    /// Count the other way round.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sample both lines. Returns the number of detents moved, -1, 0 or 1.
    pub fn update(&mut self) -> i32 {
        let (a_is_low, b_is_low) = match (self.pin_a.is_low(), self.pin_b.is_low()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                warn!("Encoder pin read failed");
                return 0;
            }
        };

        let mut s = self.state & 0b11;
        if a_is_low {
            s |= 0b0100;
        }
        if b_is_low {
            s |= 0b1000;
        }
        self.state = s >> 2;

        let pulse = i32::from(TRANSITIONS[usize::from(s)]);
        self.pulses += if self.reverse { -pulse } else { pulse };

        let step = if self.pulses >= ENCODER_PULSES_PER_DETENT {
            1
        } else if self.pulses <= -ENCODER_PULSES_PER_DETENT {
            -1
        } else {
            0
        };

        if step != 0 {
            self.pulses -= step * ENCODER_PULSES_PER_DETENT;
            self.position = self.position.wrapping_add(step);
            debug!("Encoder position {}", self.position);
        }
        step
    }

    /// Detents turned since power-on, clockwise positive.
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn pins_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.pin_a, &mut self.pin_b)
    }
}

/// Debounced encoder push switch, active low. Reports each press edge once.
pub struct EncoderSwitch<P: InputPin> {
    pin: P,
    debouncer: ButtonDebouncer<1>,
    pressed_edge: bool,
}

impl<P: InputPin> EncoderSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self::with_debouncer(pin, ButtonDebouncer::new())
    }

    pub fn with_debouncer(pin: P, debouncer: ButtonDebouncer<1>) -> Self {
        Self {
            pin,
            debouncer,
            pressed_edge: false,
        }
    }

    pub fn update(&mut self, now: Instant) {
        let raw = match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("Encoder switch read failed");
                false
            }
        };

        if self.debouncer.update(0, raw, now) && self.debouncer.get_state(0) {
            debug!("Encoder switch pressed");
            self.pressed_edge = true;
        }
    }

    /// true if a press edge arrived since the last call.
    pub fn take_pressed(&mut self) -> bool {
        core::mem::take(&mut self.pressed_edge)
    }

    pub fn is_held(&self) -> bool {
        self.debouncer.get_state(0)
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

//! Layers the stock firmware ships with
//!
//! Key numbers below are the ones printed on the keypad, 1 to 12, laid out
//! three per row:
//!
//! ```text
//!  1  2  3
//!  4  5  6
//!  7  8  9
//! 10 11 12
//! ```

use crate::binding::{Action, ColorToggle, KeyBinding, Layer};
use crate::error::Error;
use crate::keycode::{ConsumerCode, KeyCode};
use crate::types::Rgb;

/// Media keys, virtual desktop navigation and a screenshot key.
pub fn primary_layer() -> Result<Layer, Error> {
    let bindings = [
        KeyBinding::new(1, "ESC", Rgb::BLACK, Some(Action::key(KeyCode::ESCAPE)))?,
        KeyBinding::blank(2, "", Rgb::BLACK)?,
        KeyBinding::new(3, "NUMLK", Rgb::BLACK, Some(Action::key(KeyCode::KEYPAD_NUMLOCK)))?,
        //
        KeyBinding::new(
            4,
            "|<<",
            Rgb::ORANGE,
            Some(Action::consumer(ConsumerCode::SCAN_PREVIOUS_TRACK)),
        )?,
        KeyBinding::new(
            5,
            ">||",
            Rgb::RED,
            Some(Action::Toggle(ColorToggle::new(
                Rgb::RED,
                Rgb::BLUE,
                ConsumerCode::PLAY_PAUSE,
            ))),
        )?,
        KeyBinding::new(
            6,
            ">>|",
            Rgb::ORANGE,
            Some(Action::consumer(ConsumerCode::SCAN_NEXT_TRACK)),
        )?,
        //
        KeyBinding::blank(7, "", Rgb::BLACK)?,
        KeyBinding::blank(8, "", Rgb::BLACK)?,
        KeyBinding::blank(9, "", Rgb::BLACK)?,
        //
        KeyBinding::new(
            10,
            "VD L",
            Rgb::DIM_WHITE,
            Some(Action::keys(&[KeyCode::CONTROL, KeyCode::WINDOWS, KeyCode::LEFT_ARROW])),
        )?,
        KeyBinding::new(
            11,
            "SS",
            Rgb::DIM_WHITE,
            Some(Action::keys(&[KeyCode::WINDOWS, KeyCode::SHIFT, KeyCode::S])),
        )?,
        KeyBinding::new(
            12,
            "VD R",
            Rgb::DIM_WHITE,
            Some(Action::keys(&[KeyCode::CONTROL, KeyCode::WINDOWS, KeyCode::RIGHT_ARROW])),
        )?,
    ];

    Ok(Layer::new("Layer 0 - Primary", bindings))
}

/// A number pad with delete and enter on the bottom row.
pub fn numpad_layer() -> Result<Layer, Error> {
    let bindings = [
        KeyBinding::with_action(1, "KP 7", Action::key(KeyCode::KEYPAD_SEVEN))?,
        KeyBinding::with_action(2, "KP 8", Action::key(KeyCode::KEYPAD_EIGHT))?,
        KeyBinding::with_action(3, "KP 9", Action::key(KeyCode::KEYPAD_NINE))?,
        //
        KeyBinding::with_action(4, "KP 4", Action::key(KeyCode::KEYPAD_FOUR))?,
        KeyBinding::with_action(5, "KP 5", Action::key(KeyCode::KEYPAD_FIVE))?,
        KeyBinding::with_action(6, "KP 6", Action::key(KeyCode::KEYPAD_SIX))?,
        //
        KeyBinding::with_action(7, "KP 1", Action::key(KeyCode::KEYPAD_ONE))?,
        KeyBinding::with_action(8, "KP 2", Action::key(KeyCode::KEYPAD_TWO))?,
        KeyBinding::with_action(9, "KP 3", Action::key(KeyCode::KEYPAD_THREE))?,
        //
        KeyBinding::new(10, "DELETE", Rgb::RED, Some(Action::key(KeyCode::BACKSPACE)))?,
        KeyBinding::with_action(11, "KP 0", Action::key(KeyCode::KEYPAD_ZERO))?,
        KeyBinding::new(12, "ENTER", Rgb::GREEN, Some(Action::key(KeyCode::KEYPAD_ENTER)))?,
    ];

    Ok(Layer::new("Layer 1 - Numpad", bindings))
}

/// The stock layers in switching order.
pub fn default_layers() -> Result<[Layer; 2], Error> {
    Ok([primary_layer()?, numpad_layer()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_layers_bind_every_key() {
        let [primary, numpad] = default_layers().unwrap();
        assert_eq!(primary.bindings().count(), 12);
        assert_eq!(numpad.bindings().count(), 12);
        assert_eq!(primary.name(), "Layer 0 - Primary");
        assert_eq!(numpad.binding(9).map(KeyBinding::label), Some("DELETE"));
        assert_eq!(numpad.binding(11).map(KeyBinding::color), Some(Rgb::GREEN));
    }

    #[test]
    fn blank_media_keys_have_no_action() {
        let primary = primary_layer().unwrap();
        for slot in [1, 6, 7, 8] {
            assert!(primary.binding(slot).and_then(KeyBinding::action).is_none());
        }
    }
}

//! MacroDeck - layered macro keypad firmware for the Adafruit MacroPad RP2040
//!
//! Twelve keys, a rotary encoder with a push switch, one NeoPixel per key and
//! a 128x64 OLED. Keys are organised in layers; the encoder either steps the
//! LED brightness or walks through the layers, and a press on the encoder
//! flips between the two.
//!
//! ## Architecture
//! - **Switchboard**: owns the layers and turns input into actions
//! - **Capabilities**: input and output go through the traits in [`sink`]
//! - **Hardware**: the `rp2040` feature adds board init, USB HID and the
//!   NeoPixel driver, driven from one Embassy polling loop

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub mod binding;
pub mod buttons;
pub mod config;
pub mod display;
pub mod encoder;
pub mod error;
pub mod hid;
pub mod input;
pub mod keycode;
pub mod layers;
pub mod lights;
pub mod macropad;
pub mod sink;
pub mod supervisor;
pub mod switchboard;
pub mod types;

#[cfg(feature = "rp2040")]
pub mod channels;
#[cfg(feature = "rp2040")]
pub mod hardware;
#[cfg(feature = "rp2040")]
pub mod usb;

pub use binding::{Action, ColorToggle, KeyBinding, Layer};
pub use config::SwitchboardConfig;
pub use error::Error;
pub use switchboard::Switchboard;

// Interrupt bindings shared by the USB driver and the NeoPixel PIO
#[cfg(feature = "rp2040")]
embassy_rp::bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<embassy_rp::peripherals::USB>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<embassy_rp::peripherals::PIO0>;
});

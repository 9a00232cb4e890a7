//! Common types and data structures used across the MacroDeck firmware
//!
//! This module contains shared types that are passed between the input
//! scanner, the layer switchboard and the output sinks.

/// 24-bit RGB color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const RED: Rgb = Rgb(0xFF0000);
    pub const GREEN: Rgb = Rgb(0x00FF00);
    pub const BLUE: Rgb = Rgb(0x0000FF);
    pub const ORANGE: Rgb = Rgb(0xE3690B);
    pub const PURPLE: Rgb = Rgb(0x8000FF);
    pub const PINK: Rgb = Rgb(0xFF00EA);
    pub const DIM_WHITE: Rgb = Rgb(0x2E2E2E);

    /// Build a color from a hex value; bits above 24 are dropped.
    pub const fn new(hex: u32) -> Self {
        Self(hex & 0xFF_FFFF)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Rgb::new(hex)
    }
}

/// A debounced key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Zero-based key index, `0..KEY_COUNT`
    pub slot: usize,
    /// true on press, false on release
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn pressed(slot: usize) -> Self {
        Self { slot, pressed: true }
    }

    pub const fn released(slot: usize) -> Self {
        Self {
            slot,
            pressed: false,
        }
    }
}

/// What turning the encoder does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderMode {
    /// Rotation steps the LED brightness (power-on mode)
    #[default]
    AdjustBrightness,
    /// Rotation moves to the previous/next layer
    SwitchLayer,
}

impl EncoderMode {
    pub fn toggled(self) -> Self {
        match self {
            EncoderMode::AdjustBrightness => EncoderMode::SwitchLayer,
            EncoderMode::SwitchLayer => EncoderMode::AdjustBrightness,
        }
    }
}

/// Application version information
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn as_string(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Current application version
pub const APP_VERSION: AppVersion = AppVersion::new(0, 1, 0);

//! Errors raised while configuring the keypad
//!
//! Everything that can go wrong at runtime (overshooting the last layer,
//! brightness at its limit, pressing an unbound key) is a defined no-op, so
//! only setup mistakes show up here.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// `start` was called before any layer was added.
    NoLayersConfigured,
    /// A key binding named a key outside the keypad.
    InvalidSlot(u8),
    /// The switchboard is already holding as many layers as it can.
    TooManyLayers,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoLayersConfigured => write!(
                f,
                "no layers were configured; add at least one before starting"
            ),
            Error::InvalidSlot(slot) => write!(f, "key {} is not on the keypad", slot),
            Error::TooManyLayers => write!(f, "layer capacity exhausted"),
        }
    }
}

impl core::error::Error for Error {}

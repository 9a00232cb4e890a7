//! Direct-wired key scanning
//!
//! Every MacroPad key has its own GPIO pulled up, so a pressed key reads low.
//! Scans are debounced per key and each settled transition is queued as a
//! [`KeyEvent`] until the switchboard drains it, one per tick.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;
use heapless::Deque;

use crate::config::{BUTTON_DEBOUNCE_MS, KEY_EVENT_QUEUE_SIZE};
use crate::types::KeyEvent;

// ===================================================================
// Button Debouncing State
// ===================================================================

pub struct ButtonDebouncer<const N: usize> {
    buttons: [ButtonDebounceState; N],
    settle: Duration,
}

#[derive(Clone, Copy)]
struct ButtonDebounceState {
    current: bool,
    raw: bool,
    last_change: Instant,
}

impl<const N: usize> ButtonDebouncer<N> {
    pub fn new() -> Self {
        Self::with_settle_time(Duration::from_millis(BUTTON_DEBOUNCE_MS))
    }

    pub fn with_settle_time(settle: Duration) -> Self {
        Self {
            buttons: [ButtonDebounceState {
                current: false,
                raw: false,
                last_change: Instant::MIN,
            }; N],
            settle,
        }
    }

    /// Feed a raw sample taken at `now`. Returns true when the debounced
    /// state of `key` changed.
    pub fn update(&mut self, key: usize, raw_state: bool, now: Instant) -> bool {
        let Some(state) = self.buttons.get_mut(key) else {
            return false;
        };

        if raw_state != state.raw {
            state.raw = raw_state;
            state.last_change = now;
        }

        if now.saturating_duration_since(state.last_change) >= self.settle {
            let changed = state.current != state.raw;
            state.current = state.raw;
            changed
        } else {
            false
        }
    }

    pub fn get_state(&self, key: usize) -> bool {
        self.buttons.get(key).is_some_and(|b| b.current)
    }
}

impl<const N: usize> Default for ButtonDebouncer<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ===================================================================
// Direct Key Scanning
// ===================================================================

/// `N` keys, one active-low pin each.
pub struct DirectKeys<P: InputPin, const N: usize> {
    pins: [P; N],
    debouncer: ButtonDebouncer<N>,
    events: Deque<KeyEvent, KEY_EVENT_QUEUE_SIZE>,
}

impl<P: InputPin, const N: usize> DirectKeys<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self::with_debouncer(pins, ButtonDebouncer::new())
    }

    pub fn with_debouncer(pins: [P; N], debouncer: ButtonDebouncer<N>) -> Self {
        Self {
            pins,
            debouncer,
            events: Deque::new(),
        }
    }

    /// Sample every key once and queue settled transitions.
    pub fn scan(&mut self, now: Instant) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            // A pin that cannot be read counts as released
            let raw = match pin.is_low() {
                Ok(low) => low,
                Err(_) => {
                    warn!("Key {} pin read failed", i);
                    false
                }
            };

            if self.debouncer.update(i, raw, now) {
                let pressed = self.debouncer.get_state(i);
                debug!("Key {} {}", i, if pressed { "pressed" } else { "released" });
                let event = KeyEvent { slot: i, pressed };
                if self.events.push_back(event).is_err() {
                    warn!("Key event queue full, dropping key {} event", i);
                }
            }
        }
    }

    /// Oldest queued transition.
    pub fn next_event(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Forget queued transitions. Debounced key state is kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn is_pressed(&self, key: usize) -> bool {
        self.debouncer.get_state(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn state_changes_after_settle_time() {
        let mut debouncer: ButtonDebouncer<1> = ButtonDebouncer::new();
        assert!(!debouncer.update(0, true, at(100)));
        assert!(!debouncer.update(0, true, at(100 + BUTTON_DEBOUNCE_MS - 1)));
        assert!(debouncer.update(0, true, at(100 + BUTTON_DEBOUNCE_MS)));
        assert!(debouncer.get_state(0));
        // Reported once
        assert!(!debouncer.update(0, true, at(200)));
    }

    #[test]
    fn bounce_restarts_settle_time() {
        let mut debouncer: ButtonDebouncer<1> = ButtonDebouncer::new();
        debouncer.update(0, true, at(100));
        debouncer.update(0, false, at(110));
        debouncer.update(0, true, at(115));
        assert!(!debouncer.update(0, true, at(125)));
        assert!(debouncer.update(0, true, at(135)));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut debouncer: ButtonDebouncer<2> = ButtonDebouncer::new();
        assert!(!debouncer.update(5, true, at(1000)));
        assert!(!debouncer.get_state(5));
    }
}

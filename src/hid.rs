//! HID report building
//!
//! Key actions speak in key codes and text; the USB task speaks in reports.
//! [`Reporter`] sits between them, turning each action into the press and
//! release reports the host needs and handing them to a [`ReportQueue`].

use heapless::Deque;

use crate::keycode::{ConsumerCode, KeyCode};
use crate::sink::HidSink;

/// Keys a boot keyboard report can hold besides modifiers.
pub const KEYBOARD_ROLLOVER: usize = 6;

/// One report for the USB task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    /// Boot keyboard report: modifier bits and up to six usages
    Keyboard {
        modifier: u8,
        keycodes: [u8; KEYBOARD_ROLLOVER],
    },
    /// Consumer control usage, 0 releases
    Consumer(u16),
}

impl HidReport {
    pub const KEYBOARD_RELEASE: HidReport = HidReport::Keyboard {
        modifier: 0,
        keycodes: [0; KEYBOARD_ROLLOVER],
    };
    pub const CONSUMER_RELEASE: HidReport = HidReport::Consumer(0);

    /// Build a keyboard report holding every code in `codes`.
    ///
    /// Modifiers go to the modifier byte. Keys past the sixth are dropped.
    pub fn keyboard(codes: &[KeyCode]) -> Self {
        let mut modifier = 0u8;
        let mut keycodes = [0u8; KEYBOARD_ROLLOVER];
        let mut used = 0;

        for code in codes {
            if let Some(bit) = code.modifier_bit() {
                modifier |= bit;
            } else if keycodes[..used].contains(&code.0) {
                continue;
            } else if used < KEYBOARD_ROLLOVER {
                keycodes[used] = code.0;
                used += 1;
            } else {
                warn!("Keyboard report full, dropping key 0x{:02X}", code.0);
            }
        }

        HidReport::Keyboard { modifier, keycodes }
    }

    pub fn consumer(code: ConsumerCode) -> Self {
        HidReport::Consumer(code.0)
    }
}

/// Destination for built reports.
pub trait ReportQueue {
    /// Queue a report; returns false if it had to be dropped.
    fn push_report(&mut self, report: HidReport) -> bool;
}

impl<const N: usize> ReportQueue for Deque<HidReport, N> {
    fn push_report(&mut self, report: HidReport) -> bool {
        self.push_back(report).is_ok()
    }
}

/// [`HidSink`] that expands actions into press/release report pairs.
pub struct Reporter<Q: ReportQueue> {
    queue: Q,
    dropped: u32,
}

impl<Q: ReportQueue> Reporter<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue, dropped: 0 }
    }

    /// Reports that did not fit in the queue since power-on.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    fn push(&mut self, report: HidReport) {
        if !self.queue.push_report(report) {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("HID report queue full, report dropped");
        }
    }

    fn tap(&mut self, press: HidReport, release: HidReport) {
        self.push(press);
        self.push(release);
    }
}

impl<Q: ReportQueue> HidSink for Reporter<Q> {
    fn send_key(&mut self, codes: &[KeyCode]) {
        trace!("Sending {} key code(s)", codes.len());
        self.tap(HidReport::keyboard(codes), HidReport::KEYBOARD_RELEASE);
    }

    fn send_consumer_code(&mut self, code: ConsumerCode) {
        trace!("Sending consumer code 0x{:04X}", code.0);
        self.tap(HidReport::consumer(code), HidReport::CONSUMER_RELEASE);
    }

    fn send_text(&mut self, text: &str) {
        for c in text.chars() {
            match KeyCode::from_ascii(c) {
                Some((code, true)) => self.tap(
                    HidReport::keyboard(&[KeyCode::SHIFT, code]),
                    HidReport::KEYBOARD_RELEASE,
                ),
                Some((code, false)) => {
                    self.tap(HidReport::keyboard(&[code]), HidReport::KEYBOARD_RELEASE)
                }
                None => warn!("No key types U+{:04X}, skipped", c as u32),
            }
        }
    }

    fn release_all(&mut self) {
        self.push(HidReport::KEYBOARD_RELEASE);
        self.push(HidReport::CONSUMER_RELEASE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> Reporter<Deque<HidReport, 32>> {
        Reporter::new(Deque::new())
    }

    fn drain(r: &mut Reporter<Deque<HidReport, 32>>) -> heapless::Vec<HidReport, 32> {
        let mut out = heapless::Vec::new();
        while let Some(report) = r.queue_mut().pop_front() {
            out.push(report).unwrap();
        }
        out
    }

    #[test]
    fn chord_puts_modifiers_in_modifier_byte() {
        let report = HidReport::keyboard(&[KeyCode::CONTROL, KeyCode::WINDOWS, KeyCode::LEFT_ARROW]);
        assert_eq!(
            report,
            HidReport::Keyboard {
                modifier: 0b0000_1001,
                keycodes: [0x50, 0, 0, 0, 0, 0],
            }
        );
    }

    #[test]
    fn chord_drops_keys_past_rollover() {
        let codes = [
            KeyCode::A,
            KeyCode::B,
            KeyCode::C,
            KeyCode::D,
            KeyCode::E,
            KeyCode::F,
            KeyCode::S,
        ];
        let HidReport::Keyboard { keycodes, .. } = HidReport::keyboard(&codes) else {
            panic!("expected keyboard report");
        };
        assert_eq!(keycodes, [0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
    }

    #[test]
    fn send_key_presses_then_releases() {
        let mut r = reporter();
        r.send_key(&[KeyCode::ESCAPE]);
        assert_eq!(
            drain(&mut r).as_slice(),
            &[
                HidReport::Keyboard {
                    modifier: 0,
                    keycodes: [0x29, 0, 0, 0, 0, 0]
                },
                HidReport::KEYBOARD_RELEASE,
            ]
        );
    }

    #[test]
    fn consumer_code_is_released() {
        let mut r = reporter();
        r.send_consumer_code(ConsumerCode::PLAY_PAUSE);
        assert_eq!(
            drain(&mut r).as_slice(),
            &[HidReport::Consumer(0xCD), HidReport::CONSUMER_RELEASE]
        );
    }

    #[test]
    fn text_holds_shift_for_uppercase() {
        let mut r = reporter();
        r.send_text("Hi");
        let reports = drain(&mut r);
        assert_eq!(reports.len(), 4);
        assert_eq!(
            reports[0],
            HidReport::Keyboard {
                modifier: 0b0000_0010,
                keycodes: [0x0B, 0, 0, 0, 0, 0]
            }
        );
        assert_eq!(
            reports[2],
            HidReport::Keyboard {
                modifier: 0,
                keycodes: [0x0C, 0, 0, 0, 0, 0]
            }
        );
    }

    #[test]
    fn full_queue_counts_drops() {
        let mut r: Reporter<Deque<HidReport, 2>> = Reporter::new(Deque::new());
        r.send_text("abc");
        assert_eq!(r.queue().len(), 2);
        assert_eq!(r.dropped(), 4);
    }
}

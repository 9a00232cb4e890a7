//! The MacroPad as a [`DeckSink`]
//!
//! Key presses become HID reports, colors go to a [`PixelBuffer`] and text
//! goes to the OLED through [`TextLines`]. Nothing reaches the hardware until
//! the switchboard flushes at the end of a tick.

use embedded_hal::digital::OutputPin;

use crate::config::KEY_COUNT;
use crate::display::{LineRenderer, TextLines};
use crate::hid::{ReportQueue, Reporter};
use crate::keycode::{ConsumerCode, KeyCode};
use crate::lights::PixelBuffer;
use crate::sink::{DeckSink, DisplaySink, HidSink, LightSink};
use crate::types::Rgb;

pub struct MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    hid: Reporter<Q>,
    pixels: PixelBuffer<KEY_COUNT>,
    text: TextLines,
    renderer: R,
    speaker_enable: SPK,
}

impl<Q, R, SPK> MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    pub fn new(queue: Q, renderer: R, speaker_enable: SPK, brightness: f32) -> Self {
        Self {
            hid: Reporter::new(queue),
            pixels: PixelBuffer::new(brightness),
            text: TextLines::new(),
            renderer,
            speaker_enable,
        }
    }

    /// Latched key colors for the LED driver, scaled by brightness.
    pub fn take_frame(&mut self) -> Option<[Rgb; KEY_COUNT]> {
        self.pixels.take_frame()
    }

    pub fn pixels(&self) -> &PixelBuffer<KEY_COUNT> {
        &self.pixels
    }

    pub fn text(&self) -> &TextLines {
        &self.text
    }

    pub fn reporter(&self) -> &Reporter<Q> {
        &self.hid
    }

    pub fn reporter_mut(&mut self) -> &mut Reporter<Q> {
        &mut self.hid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn speaker_enable_mut(&mut self) -> &mut SPK {
        &mut self.speaker_enable
    }
}

impl<Q, R, SPK> HidSink for MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    fn send_key(&mut self, codes: &[KeyCode]) {
        self.hid.send_key(codes);
    }

    fn send_consumer_code(&mut self, code: ConsumerCode) {
        self.hid.send_consumer_code(code);
    }

    fn send_text(&mut self, text: &str) {
        self.hid.send_text(text);
    }

    fn release_all(&mut self) {
        self.hid.release_all();
    }
}

impl<Q, R, SPK> LightSink for MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    fn set_slot_color(&mut self, slot: usize, color: Rgb) {
        self.pixels.set(slot, color);
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.pixels.set_brightness(brightness);
    }

    fn flush_lights(&mut self) {
        self.pixels.flush();
    }
}

impl<Q, R, SPK> DisplaySink for MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    fn set_display_line(&mut self, row: usize, text: &str) {
        self.text.set(row, text);
    }

    fn flush_display(&mut self) {
        if let Some(lines) = self.text.take_dirty() {
            trace!("Redrawing display");
            if self.renderer.render(lines).is_err() {
                warn!("Display refresh failed");
            }
        }
    }
}

impl<Q, R, SPK> DeckSink for MacroPadSink<Q, R, SPK>
where
    Q: ReportQueue,
    R: LineRenderer,
    SPK: OutputPin,
{
    fn stop_tone(&mut self) {
        if self.speaker_enable.set_low().is_err() {
            warn!("Failed to disable speaker");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::HidReport;
    use crate::switchboard::Line;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
    use heapless::Deque;

    #[derive(Default)]
    struct CountingRenderer {
        renders: usize,
        last_title: std::string::String,
    }

    impl LineRenderer for CountingRenderer {
        type Error = ();

        fn render(&mut self, lines: &[Line]) -> Result<(), ()> {
            self.renders += 1;
            self.last_title = lines[0].as_str().into();
            Ok(())
        }
    }

    type TestSink = MacroPadSink<Deque<HidReport, 16>, CountingRenderer, PinMock>;

    fn sink(speaker: &[Transaction]) -> TestSink {
        MacroPadSink::new(Deque::new(), CountingRenderer::default(), PinMock::new(speaker), 1.0)
    }

    #[test]
    fn display_redraws_only_after_changes() {
        let mut sink = sink(&[]);
        sink.set_display_line(0, "Layer 0");
        sink.flush_display();
        sink.flush_display();
        assert_eq!(sink.renderer().renders, 1);
        assert_eq!(sink.renderer().last_title, "Layer 0");

        sink.set_display_line(0, "Layer 1");
        sink.flush_display();
        assert_eq!(sink.renderer().renders, 2);
        sink.speaker_enable_mut().done();
    }

    #[test]
    fn colors_reach_frame_on_flush() {
        let mut sink = sink(&[]);
        let _ = sink.take_frame();

        sink.set_slot_color(4, Rgb::GREEN);
        assert!(sink.take_frame().is_none());
        sink.flush_lights();
        let frame = sink.take_frame().unwrap();
        assert_eq!(frame[4], Rgb::GREEN);
        sink.speaker_enable_mut().done();
    }

    #[test]
    fn keys_become_reports() {
        let mut sink = sink(&[]);
        sink.send_key(&[KeyCode::ESCAPE]);
        let queue = sink.reporter().queue();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.back(), Some(&HidReport::KEYBOARD_RELEASE));
        sink.speaker_enable_mut().done();
    }

    #[test]
    fn stop_tone_disables_speaker() {
        let mut sink = sink(&[Transaction::set(State::Low)]);
        sink.stop_tone();
        sink.speaker_enable_mut().done();
    }
}

#![allow(dead_code)]

use std::collections::VecDeque;

use macrodeck::config::{DISPLAY_LINES, KEY_COUNT};
use macrodeck::keycode::{ConsumerCode, KeyCode};
use macrodeck::sink::{DeckSink, DisplaySink, HidSink, InputSource, LightSink};
use macrodeck::types::{KeyEvent, Rgb};

// Init logger for tests
#[ctor::ctor]
fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Everything a sink was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    SendKey(Vec<KeyCode>),
    SendConsumer(ConsumerCode),
    SendText(String),
    ReleaseAll,
    StopTone,
    SlotColor(usize, Rgb),
    Brightness(f32),
    FlushLights,
    Line(usize, String),
    FlushDisplay,
}

/// A sink that remembers every call and keeps the current screen and colors.
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    pub colors: [Rgb; KEY_COUNT],
    pub lines: [String; DISPLAY_LINES],
    pub brightness: Option<f32>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            colors: [Rgb::BLACK; KEY_COUNT],
            lines: Default::default(),
            brightness: None,
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn hid_calls(&self) -> Vec<SinkCall> {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    SinkCall::SendKey(_) | SinkCall::SendConsumer(_) | SinkCall::SendText(_)
                )
            })
            .cloned()
            .collect()
    }

    pub fn count(&self, wanted: &SinkCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn line_writes(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Line(row, _) => Some(*row),
                _ => None,
            })
            .collect()
    }
}

impl HidSink for RecordingSink {
    fn send_key(&mut self, codes: &[KeyCode]) {
        self.calls.push(SinkCall::SendKey(codes.to_vec()));
    }

    fn send_consumer_code(&mut self, code: ConsumerCode) {
        self.calls.push(SinkCall::SendConsumer(code));
    }

    fn send_text(&mut self, text: &str) {
        self.calls.push(SinkCall::SendText(text.to_string()));
    }

    fn release_all(&mut self) {
        self.calls.push(SinkCall::ReleaseAll);
    }
}

impl LightSink for RecordingSink {
    fn set_slot_color(&mut self, slot: usize, color: Rgb) {
        self.colors[slot] = color;
        self.calls.push(SinkCall::SlotColor(slot, color));
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = Some(brightness);
        self.calls.push(SinkCall::Brightness(brightness));
    }

    fn flush_lights(&mut self) {
        self.calls.push(SinkCall::FlushLights);
    }
}

impl DisplaySink for RecordingSink {
    fn set_display_line(&mut self, row: usize, text: &str) {
        self.lines[row] = text.to_string();
        self.calls.push(SinkCall::Line(row, text.to_string()));
    }

    fn flush_display(&mut self) {
        self.calls.push(SinkCall::FlushDisplay);
    }
}

impl DeckSink for RecordingSink {
    fn stop_tone(&mut self) {
        self.calls.push(SinkCall::StopTone);
    }
}

/// Scripted input: queued key events, a settable encoder and button.
#[derive(Default)]
pub struct FakeInput {
    pub events: VecDeque<KeyEvent>,
    pub position: i32,
    pub button: bool,
    pub resets: usize,
}

impl FakeInput {
    pub fn press(&mut self, slot: usize) {
        self.events.push_back(KeyEvent::pressed(slot));
    }

    pub fn release(&mut self, slot: usize) {
        self.events.push_back(KeyEvent::released(slot));
    }

    pub fn turn(&mut self, detents: i32) {
        self.position += detents;
    }

    pub fn click(&mut self) {
        self.button = true;
    }
}

impl InputSource for FakeInput {
    fn read_key_event(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    fn read_encoder_position(&mut self) -> i32 {
        self.position
    }

    fn read_encoder_button_pressed(&mut self) -> bool {
        std::mem::take(&mut self.button)
    }

    fn reset_keys(&mut self) {
        self.resets += 1;
        self.events.clear();
    }
}

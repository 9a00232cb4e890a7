pub mod common;

use std::convert::Infallible;

use common::FakeInput;
use embedded_hal::digital::{ErrorType, OutputPin};
use heapless::Deque;
use macrodeck::config::{SwitchboardConfig, KEY_COUNT};
use macrodeck::display::LineRenderer;
use macrodeck::hid::HidReport;
use macrodeck::keycode::{ConsumerCode, KeyCode};
use macrodeck::layers::default_layers;
use macrodeck::macropad::MacroPadSink;
use macrodeck::switchboard::Line;
use macrodeck::types::Rgb;
use macrodeck::Switchboard;

#[derive(Default)]
struct ScreenCapture {
    frames: Vec<Vec<String>>,
}

impl LineRenderer for ScreenCapture {
    type Error = Infallible;

    fn render(&mut self, lines: &[Line]) -> Result<(), Infallible> {
        self.frames.push(lines.iter().map(|l| l.as_str().to_string()).collect());
        Ok(())
    }
}

#[derive(Default)]
struct SpeakerEnable {
    high: bool,
    writes: usize,
}

impl ErrorType for SpeakerEnable {
    type Error = Infallible;
}

impl OutputPin for SpeakerEnable {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

type Sink = MacroPadSink<Deque<HidReport, 64>, ScreenCapture, SpeakerEnable>;

fn start() -> (Switchboard, FakeInput, Sink) {
    let config = SwitchboardConfig::default();
    let mut board: Switchboard = Switchboard::new(config);
    for layer in default_layers().unwrap() {
        board.add_layer(layer).unwrap();
    }
    let mut input = FakeInput::default();
    let mut sink = MacroPadSink::new(
        Deque::new(),
        ScreenCapture::default(),
        SpeakerEnable::default(),
        config.default_brightness,
    );
    board.start(&mut input, &mut sink).unwrap();
    (board, input, sink)
}

fn drain(sink: &mut Sink) -> Vec<HidReport> {
    let mut reports = Vec::new();
    while let Some(report) = sink.reporter_mut().queue_mut().pop_front() {
        reports.push(report);
    }
    reports
}

#[test]
fn first_tick_draws_the_primary_layer() {
    let (mut board, mut input, mut sink) = start();
    assert!(sink.renderer().frames.is_empty());

    board.tick(&mut input, &mut sink);
    let frames = &sink.renderer().frames;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0][0], " Layer 0 - Primary  ");
    assert_eq!(frames[0][3], "   X      X      X   ");

    // Nothing changed, nothing redrawn
    board.tick(&mut input, &mut sink);
    assert_eq!(sink.renderer().frames.len(), 1);
}

#[test]
fn key_colors_reach_the_pixels_scaled() {
    let (mut board, mut input, mut sink) = start();
    board.tick(&mut input, &mut sink);

    let frame = sink.take_frame().unwrap();
    // ORANGE 0xE3690B at half brightness
    assert_eq!(frame[3], Rgb::from_rgb(0x72, 0x35, 0x06));
    assert_eq!(frame[0], Rgb::BLACK);
    assert!(sink.take_frame().is_none());

    for _ in 0..10 {
        input.turn(1);
        board.tick(&mut input, &mut sink);
    }
    let frame = sink.take_frame().unwrap();
    assert_eq!(frame[3], Rgb::ORANGE);
    assert_eq!(sink.pixels().scale(), 255);
}

#[test]
fn escape_becomes_press_and_release_reports() {
    let (mut board, mut input, mut sink) = start();

    // Activation releases everything first
    assert_eq!(
        drain(&mut sink),
        vec![HidReport::KEYBOARD_RELEASE, HidReport::CONSUMER_RELEASE]
    );
    assert_eq!(sink.speaker_enable_mut().writes, 1);

    input.press(0);
    board.tick(&mut input, &mut sink);
    let mut keycodes = [0; 6];
    keycodes[0] = KeyCode::ESCAPE.0;
    assert_eq!(
        drain(&mut sink),
        vec![
            HidReport::Keyboard { modifier: 0, keycodes },
            HidReport::KEYBOARD_RELEASE
        ]
    );

    input.release(0);
    board.tick(&mut input, &mut sink);
    assert!(drain(&mut sink).is_empty());
}

#[test]
fn chord_modifiers_land_in_modifier_byte() {
    let (mut board, mut input, mut sink) = start();
    drain(&mut sink);

    // SS: Windows + Shift + S
    input.press(10);
    board.tick(&mut input, &mut sink);
    let reports = drain(&mut sink);
    let HidReport::Keyboard { modifier, keycodes } = reports[0] else {
        panic!("expected a keyboard report, got {:?}", reports[0]);
    };
    assert_eq!(modifier, 0b0000_1010);
    assert_eq!(keycodes[0], KeyCode::S.0);
    assert_eq!(reports[1], HidReport::KEYBOARD_RELEASE);
}

#[test]
fn play_pause_sends_consumer_usage_and_flips_color() {
    let (mut board, mut input, mut sink) = start();
    drain(&mut sink);
    board.tick(&mut input, &mut sink);
    let _ = sink.take_frame();

    input.press(4);
    board.tick(&mut input, &mut sink);
    assert_eq!(
        drain(&mut sink),
        vec![
            HidReport::Consumer(ConsumerCode::PLAY_PAUSE.0),
            HidReport::CONSUMER_RELEASE
        ]
    );
    assert_eq!(sink.pixels().get(4), Some(Rgb::BLUE));
    assert!(sink.take_frame().is_some());
}

#[test]
fn layer_switch_redraws_and_silences() {
    let (mut board, mut input, mut sink) = start();
    board.tick(&mut input, &mut sink);
    drain(&mut sink);

    input.click();
    board.tick(&mut input, &mut sink);
    input.turn(1);
    board.tick(&mut input, &mut sink);

    assert_eq!(board.active_layer_index(), 1);
    let frames = &sink.renderer().frames;
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1][0], " Layer 0 - Primary  *");
    assert_eq!(frames[2][0], "  Layer 1 - Numpad  *");
    assert_eq!(
        drain(&mut sink),
        vec![HidReport::KEYBOARD_RELEASE, HidReport::CONSUMER_RELEASE]
    );
    assert!(!sink.speaker_enable_mut().high);

    let frame = sink.take_frame().unwrap();
    assert_eq!(frame.len(), KEY_COUNT);
    assert_eq!(sink.pixels().get(11), Some(Rgb::GREEN));
}

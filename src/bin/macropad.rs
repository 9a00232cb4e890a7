//! MacroDeck - Adafruit MacroPad RP2040 firmware
//!
//! - 12 keys in a 3x4 layout, one NeoPixel each
//! - Rotary encoder: brightness, or layer switching after a press
//! - 128x64 SH1106 OLED showing the layer name and key labels
//! - USB composite HID: boot keyboard and consumer control

#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use panic_halt as _;

use macrodeck::config::{SwitchboardConfig, LOOP_PERIOD_MS};
use macrodeck::hardware::{self, MacroPad};
use macrodeck::layers::default_layers;
use macrodeck::supervisor::{AppSupervisor, Status};
use macrodeck::Switchboard;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let config = SwitchboardConfig::default();

    let mut board: Switchboard = Switchboard::new(config);
    for layer in unwrap!(default_layers()) {
        unwrap!(board.add_layer(layer));
    }

    let mut supervisor = AppSupervisor::new(Instant::now());
    supervisor.print_startup_banner(board.layer_count(), board.brightness());

    let MacroPad {
        mut input,
        mut sink,
        mut pixels,
    } = unwrap!(hardware::init_hardware(&spawner, p, config.default_brightness).await);

    unwrap!(board.start(&mut input, &mut sink));
    info!("MacroDeck initialized successfully");

    loop {
        let now = Instant::now();
        input.scan(now);
        board.tick(&mut input, &mut sink);

        if let Some(frame) = sink.take_frame() {
            pixels.write(&frame).await;
        }

        supervisor.tick(
            now,
            Status {
                active_layer: board.active_layer_index(),
                brightness: board.brightness(),
                dropped_reports: sink.reporter().dropped(),
            },
        );

        Timer::after(Duration::from_millis(LOOP_PERIOD_MS)).await;
    }
}

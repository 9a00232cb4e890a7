//! Hardware initialization for the Adafruit MacroPad RP2040
//!
//! Turns the raw peripherals into the pieces the main loop drives: the input
//! scanner, the [`MacroPadSink`], the NeoPixel chain and the USB driver.

use embassy_executor::{SpawnError, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{PIO0, SPI1};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::usb::Driver;
use embassy_rp::Peripherals;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use smart_leds::RGB8;

use crate::buttons::DirectKeys;
use crate::channels::HID_REPORT_CHANNEL;
use crate::config::*;
use crate::display::Sh1106;
use crate::encoder::{EncoderSwitch, RotaryEncoder};
use crate::hid::HidReport;
use crate::input::MacroPadInput;
use crate::macropad::MacroPadSink;
use crate::types::Rgb;
use crate::usb::usb_task;

pub type KeypadInput = MacroPadInput<Input<'static>, Input<'static>, Input<'static>, Input<'static>>;
pub type OledSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;
pub type Oled = Sh1106<OledSpi, Output<'static>>;
pub type ReportSender = Sender<'static, ThreadModeRawMutex, HidReport, HID_REPORT_QUEUE_SIZE>;
pub type KeypadSink = MacroPadSink<ReportSender, Oled, Output<'static>>;

/// Everything the main loop owns.
pub struct MacroPad {
    pub input: KeypadInput,
    pub sink: KeypadSink,
    pub pixels: NeoPixels,
}

/// The twelve key NeoPixels, driven by PIO0 state machine 0.
pub struct NeoPixels {
    ws2812: PioWs2812<'static, PIO0, 0, KEY_COUNT>,
}

impl NeoPixels {
    pub async fn write(&mut self, frame: &[Rgb; KEY_COUNT]) {
        let colors = frame.map(|c| RGB8::new(c.r(), c.g(), c.b()));
        self.ws2812.write(&colors).await;
    }
}

/// Bring up the board and spawn the USB and status LED tasks.
pub async fn init_hardware(spawner: &Spawner, p: Peripherals, brightness: f32) -> Result<MacroPad, SpawnError> {
    info!("Initializing MacroPad RP2040 hardware");

    let driver = Driver::new(p.USB, crate::Irqs);
    spawner.spawn(usb_task(driver))?;

    let status_led = Output::new(p.PIN_13, Level::Low);
    spawner.spawn(status_task(status_led))?;
    info!("Status LED on GPIO{}", STATUS_LED_PIN);

    // Keys, active low with pull-ups
    let keys = DirectKeys::new([
        Input::new(p.PIN_1, Pull::Up),
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
    ]);
    let encoder = RotaryEncoder::new(Input::new(p.PIN_17, Pull::Up), Input::new(p.PIN_18, Pull::Up));
    let switch = EncoderSwitch::new(Input::new(p.PIN_0, Pull::Up));
    let input = MacroPadInput::new(keys, encoder, switch);
    info!(
        "Keys on GPIO{}-{}, encoder on GPIO{}/{}",
        KEY_PINS[0],
        KEY_PINS[KEY_COUNT - 1],
        ENCODER_A_PIN,
        ENCODER_B_PIN
    );

    // The speaker amp stays off until something plays a tone
    let speaker_enable = Output::new(p.PIN_14, Level::Low);

    let oled = init_display(p.SPI1, p.PIN_26, p.PIN_27, p.PIN_22, p.PIN_24, p.PIN_23).await;

    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, crate::Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_19, &program);
    info!("NeoPixels on GPIO{}", NEOPIXEL_PIN);

    let sink = MacroPadSink::new(HID_REPORT_CHANNEL.sender(), oled, speaker_enable, brightness);

    Ok(MacroPad {
        input,
        sink,
        pixels: NeoPixels { ws2812 },
    })
}

async fn init_display(
    spi1: embassy_rp::Peri<'static, SPI1>,
    sck: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_26>,
    mosi: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_27>,
    cs: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_22>,
    dc: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_24>,
    rst: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_23>,
) -> Oled {
    let mut config = spi::Config::default();
    config.frequency = OLED_SPI_BAUDRATE;
    let spi = Spi::new_blocking_txonly(spi1, sck, mosi, config);

    let cs = Output::new(cs, Level::High);
    let spi = ExclusiveDevice::new_no_delay(spi, cs).unwrap_or_else(|e| match e {});
    let dc = Output::new(dc, Level::Low);

    let mut rst = Output::new(rst, Level::Low);
    Timer::after(Duration::from_millis(10)).await;
    rst.set_high();
    Timer::after(Duration::from_millis(10)).await;
    // Dropping the pin would float the reset line
    core::mem::forget(rst);

    let mut oled = Sh1106::new(spi, dc);
    if oled.init().is_err() {
        warn!("SH1106 init failed, continuing without display");
    }
    oled
}

/// Status LED task implementation
#[embassy_executor::task]
pub async fn status_task(mut status_led: Output<'static>) {
    info!("Status LED task started");

    loop {
        // Heartbeat pattern - short blink every second
        status_led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        status_led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}

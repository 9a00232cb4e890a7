//! USB HID implementation
//!
//! The keypad enumerates as a composite device with two HID interfaces: a
//! boot keyboard and a consumer control (media key) interface. The USB task
//! drains [`HID_REPORT_CHANNEL`] and writes each report to its interface.

use embassy_rp::peripherals;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport, SerializedDescriptor};

use crate::channels::HID_REPORT_CHANNEL;
use crate::config::*;
use crate::hid::HidReport;

type UsbDriver = Driver<'static, peripherals::USB>;

const USB_BUF_SIZE: usize = 256;

// ===================================================================
// USB Configuration
// ===================================================================

fn create_usb_config() -> Config<'static> {
    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some(USB_MANUFACTURER);
    config.product = Some(USB_PRODUCT);
    config.serial_number = Some(USB_SERIAL);
    config.max_power = 100; // 200mA
    config.max_packet_size_0 = 64;
    config.device_release = USB_BCD_DEVICE;

    // Composite device with interface association descriptors
    config.device_class = 0xEF;
    config.device_sub_class = 0x02;
    config.device_protocol = 0x01;
    config.composite_with_iads = true;

    config
}

// ===================================================================
// HID Request Handler
// ===================================================================

struct KeypadHidHandler {
    name: &'static str,
}

impl RequestHandler for KeypadHidHandler {
    fn get_report(&mut self, id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        debug!("{}: Get Report {:?}", self.name, id);
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        // Keyboard LED state, nothing on the keypad shows it
        debug!("{}: Set Report {:?}, len={}", self.name, id, data.len());
        OutResponse::Accepted
    }
}

struct KeypadDeviceHandler;

impl Handler for KeypadDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        info!("USB device {}", if enabled { "enabled" } else { "disabled" });
    }

    fn reset(&mut self) {
        info!("USB bus reset");
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            info!("USB configured, host connected");
        } else {
            info!("USB no longer configured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB {}", if suspended { "suspended" } else { "resumed" });
    }
}

fn hid_config(descriptor: &'static [u8], handler: &'static mut KeypadHidHandler) -> HidConfig<'static> {
    HidConfig {
        report_descriptor: descriptor,
        request_handler: Some(handler),
        poll_ms: USB_POLL_RATE_MS,
        max_packet_size: 8,
    }
}

// ===================================================================
// USB Task Implementation
// ===================================================================

#[embassy_executor::task]
pub async fn usb_task(driver: UsbDriver) {
    info!("USB task started");

    static CONFIG_DESC: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static DEVICE_HANDLER: StaticCell<KeypadDeviceHandler> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        create_usb_config(),
        &mut CONFIG_DESC.init([0; USB_BUF_SIZE])[..],
        &mut BOS_DESC.init([0; 16])[..],
        &mut MSOS_DESC.init([0; 16])[..],
        &mut CONTROL_BUF.init([0; 64])[..],
    );
    builder.handler(DEVICE_HANDLER.init(KeypadDeviceHandler));

    static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
    static KEYBOARD_HANDLER: StaticCell<KeypadHidHandler> = StaticCell::new();
    let mut keyboard: HidWriter<'static, UsbDriver, 8> = HidWriter::new(
        &mut builder,
        KEYBOARD_STATE.init(State::new()),
        hid_config(
            KeyboardReport::desc(),
            KEYBOARD_HANDLER.init(KeypadHidHandler { name: "Keyboard" }),
        ),
    );

    static MEDIA_STATE: StaticCell<State> = StaticCell::new();
    static MEDIA_HANDLER: StaticCell<KeypadHidHandler> = StaticCell::new();
    let mut media: HidWriter<'static, UsbDriver, 8> = HidWriter::new(
        &mut builder,
        MEDIA_STATE.init(State::new()),
        hid_config(
            MediaKeyboardReport::desc(),
            MEDIA_HANDLER.init(KeypadHidHandler { name: "Consumer" }),
        ),
    );

    let mut usb = builder.build();
    info!("USB HID interfaces: boot keyboard, consumer control");

    let usb_fut = usb.run();

    let report_fut = async {
        let receiver = HID_REPORT_CHANNEL.receiver();
        loop {
            let report = receiver.receive().await;
            let result = match report {
                HidReport::Keyboard { modifier, keycodes } => {
                    let report = KeyboardReport {
                        modifier,
                        reserved: 0,
                        leds: 0,
                        keycodes,
                    };
                    keyboard.write_serialize(&report).await
                }
                HidReport::Consumer(usage_id) => media.write_serialize(&MediaKeyboardReport { usage_id }).await,
            };

            match result {
                Ok(()) => trace!("HID report sent: {:?}", report),
                Err(e) => warn!("Failed to send HID report: {:?}", e),
            }
        }
    };

    embassy_futures::join::join(usb_fut, report_fut).await;
}

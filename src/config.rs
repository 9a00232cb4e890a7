//! Hardware and application configuration for MacroDeck
//! RP2040 MacroPad: 12 keys (3x4), rotary encoder, NeoPixels, SH1106 OLED

// ===================================================================
// USB Configuration
// ===================================================================

pub const USB_VID: u16 = 0x239a; // Adafruit VID
pub const USB_PID: u16 = 0x8108; // MacroPad RP2040 PID
pub const USB_MANUFACTURER: &str = "MacroDeck";
pub const USB_PRODUCT: &str = "MacroDeck Keypad";
pub const USB_SERIAL: &str = "MACRODECK001";
pub const USB_BCD_DEVICE: u16 = 0x0100;
pub const USB_POLL_RATE_MS: u8 = 1; // 1ms USB polling (1000Hz)

// ===================================================================
// Keypad Specifications
// ===================================================================

pub const KEY_COUNT: usize = 12; // Number of keys (3x4 layout)
pub const KEY_COLS: usize = 3; // Keys per row
pub const KEY_ROWS: usize = 4; // Number of rows

/// Maximum number of layers the stock firmware can hold.
pub const MAX_LAYERS: usize = 8;

// ===================================================================
// Display Layout
// ===================================================================

pub const DISPLAY_WIDTH: usize = 128;
pub const DISPLAY_HEIGHT: usize = 64;
/// Title line plus one line per key row.
pub const DISPLAY_LINES: usize = KEY_ROWS + 1;
/// Characters the title line shows, not counting the mode marker.
pub const TITLE_WIDTH: usize = 20;
/// Width of the field each key label is centered in.
pub const LABEL_WIDTH: usize = 7;
/// Bytes one display line can hold: three labels of four-byte characters,
/// which also covers the title plus marker.
pub const LINE_CAPACITY: usize = KEY_COLS * LABEL_WIDTH * 4;
const _: () = assert!(TITLE_WIDTH * 4 + 1 <= LINE_CAPACITY);
/// Appended to the title while the encoder switches layers.
pub const SWITCH_LAYER_MARKER: char = '*';
/// Label drawn for unbound or unlabelled keys.
pub const BLANK_LABEL: &str = "X";

// ===================================================================
// GPIO Pin Assignments - Adafruit MacroPad RP2040
// ===================================================================

pub const KEY_PINS: [u8; KEY_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
pub const ENCODER_SWITCH_PIN: u8 = 0;
pub const ENCODER_A_PIN: u8 = 17;
pub const ENCODER_B_PIN: u8 = 18;
pub const NEOPIXEL_PIN: u8 = 19;
pub const SPEAKER_ENABLE_PIN: u8 = 14;
pub const STATUS_LED_PIN: u8 = 13; // Red LED next to the USB port

// SPI OLED Interface
pub const OLED_SCK_PIN: u8 = 26;
pub const OLED_MOSI_PIN: u8 = 27;
pub const OLED_CS_PIN: u8 = 22;
pub const OLED_DC_PIN: u8 = 24;
pub const OLED_RST_PIN: u8 = 23;
pub const OLED_SPI_BAUDRATE: u32 = 8_000_000; // 8MHz SPI clock

// ===================================================================
// Timing
// ===================================================================

pub const BUTTON_DEBOUNCE_MS: u64 = 20; // Key and encoder switch debounce time
pub const LOOP_PERIOD_MS: u64 = 1; // Main polling loop period
/// Quadrature transitions per encoder detent.
pub const ENCODER_PULSES_PER_DETENT: i32 = 4;
/// Pending key events the input scanner buffers between ticks.
pub const KEY_EVENT_QUEUE_SIZE: usize = 16;
/// HID reports buffered between the main loop and the USB task.
pub const HID_REPORT_QUEUE_SIZE: usize = 64;
/// Seconds between supervisor status lines.
pub const STATUS_INTERVAL_SECS: u64 = 60;

// ===================================================================
// Lighting
// ===================================================================

pub const DEFAULT_BRIGHTNESS: f32 = 0.5;
/// Controls the stepping interval of the LED brightness.
pub const DEFAULT_BRIGHTNESS_STEP: f32 = 0.05;

// ===================================================================
// SH1106 Display Commands
// ===================================================================

pub const SH1106_DISPLAY_OFF: u8 = 0xAE;
pub const SH1106_DISPLAY_ON: u8 = 0xAF;
pub const SH1106_SET_CONTRAST: u8 = 0x81;
pub const SH1106_SEGMENT_REMAP: u8 = 0xA1; // Column 127 mapped to SEG0
pub const SH1106_COM_SCAN_DEC: u8 = 0xC8;
pub const SH1106_NORMAL_DISPLAY: u8 = 0xA6;
pub const SH1106_SET_START_LINE: u8 = 0x40;
pub const SH1106_SET_PAGE: u8 = 0xB0;
pub const SH1106_SET_COLUMN_LOW: u8 = 0x00;
pub const SH1106_SET_COLUMN_HIGH: u8 = 0x10;
/// The SH1106 RAM is 132 columns wide; the 128 visible ones start here.
pub const SH1106_COLUMN_OFFSET: u8 = 2;

/// Runtime settings for the layer switchboard.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchboardConfig {
    /// LED brightness applied at start, `0.0..=1.0`.
    pub default_brightness: f32,
    /// Brightness change per encoder detent.
    pub brightness_step: f32,
}

impl Default for SwitchboardConfig {
    fn default() -> Self {
        Self {
            default_brightness: DEFAULT_BRIGHTNESS,
            brightness_step: DEFAULT_BRIGHTNESS_STEP,
        }
    }
}

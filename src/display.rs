//! Display driver for the MacroPad SH1106 OLED
//!
//! The 128x64 monochrome panel shows five lines of text: the layer title and
//! one line per key row. Text goes into [`TextLines`] first and is only drawn
//! when a flush finds it changed. [`Sh1106`] keeps a full framebuffer, draws
//! the lines with embedded-graphics and pushes all eight pages over SPI.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::*;
use crate::switchboard::Line;

/// Vertical distance between text lines, in pixels.
pub const LINE_HEIGHT: i32 = 12;

const PAGES: usize = DISPLAY_HEIGHT / 8;
const FRAME_SIZE: usize = DISPLAY_WIDTH * PAGES;

// ===================================================================
// Text Buffer
// ===================================================================

/// The lines waiting to be drawn.
pub struct TextLines {
    lines: [Line; DISPLAY_LINES],
    dirty: bool,
}

impl TextLines {
    pub fn new() -> Self {
        Self {
            lines: Default::default(),
            dirty: true,
        }
    }

    /// Replace line `row`. Text that does not fit a line is cut off.
    pub fn set(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            warn!("No display line {}", row);
            return;
        };
        if line.as_str() == text {
            return;
        }

        line.clear();
        for c in text.chars() {
            if line.push(c).is_err() {
                debug!("Display line {} truncated", row);
                break;
            }
        }
        self.dirty = true;
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(Line::as_str)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Lines to draw if anything changed since the last call.
    pub fn take_dirty(&mut self) -> Option<&[Line]> {
        if core::mem::take(&mut self.dirty) {
            Some(&self.lines)
        } else {
            None
        }
    }
}

impl Default for TextLines {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that can put lines of text on a screen.
pub trait LineRenderer {
    type Error;

    fn render(&mut self, lines: &[Line]) -> Result<(), Self::Error>;
}

// ===================================================================
// Framebuffer
// ===================================================================

/// 1bpp framebuffer in SH1106 page order: byte `page * 128 + x` holds rows
/// `page * 8 ..= page * 8 + 7` of column `x`, LSB on top.
pub struct FrameBuffer {
    bytes: [u8; FRAME_SIZE],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self { bytes: [0; FRAME_SIZE] }
    }

    pub fn clear_all(&mut self) {
        self.bytes.fill(0);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return;
        }
        let byte = &mut self.bytes[(y / 8) * DISPLAY_WIDTH + x];
        let bit = 1 << (y % 8);
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        self.bytes[(y / 8) * DISPLAY_WIDTH + x] & (1 << (y % 8)) != 0
    }

    pub fn page(&self, page: usize) -> &[u8] {
        &self.bytes[page * DISPLAY_WIDTH..(page + 1) * DISPLAY_WIDTH]
    }

    /// Clear and draw `lines` top to bottom.
    pub fn draw_lines(&mut self, lines: &[Line]) {
        self.clear_all();
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        for (row, line) in lines.iter().enumerate() {
            let origin = Point::new(0, row as i32 * LINE_HEIGHT);
            // Drawing into RAM cannot fail
            let _ = Text::with_baseline(line, origin, style, Baseline::Top).draw(self);
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }
        Ok(())
    }
}

// ===================================================================
// SH1106 Controller
// ===================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    Spi,
    DataCommandPin,
}

#[rustfmt::skip]
const INIT_SEQUENCE: [u8; 21] = [
    SH1106_DISPLAY_OFF,
    0xD5, 0x80, // Clock divide ratio
    0xA8, 0x3F, // Multiplex 1/64
    0xD3, 0x00, // Display offset
    SH1106_SET_START_LINE,
    0xAD, 0x8B, // DC-DC on
    SH1106_SEGMENT_REMAP,
    SH1106_COM_SCAN_DEC,
    0xDA, 0x12, // COM pins alternative
    SH1106_SET_CONTRAST, 0xFF,
    0xD9, 0x1F, // Pre-charge period
    0xDB, 0x40, // VCOMH deselect level
    SH1106_NORMAL_DISPLAY,
];

pub struct Sh1106<SPI, DC> {
    spi: SPI,
    dc: DC,
    frame: FrameBuffer,
}

impl<SPI, DC> Sh1106<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Wrap an SPI device whose chip select is managed by `spi`. The panel
    /// must already be out of reset.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            frame: FrameBuffer::new(),
        }
    }

    /// Configure the panel, clear it and switch it on.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        info!("Initializing SH1106 display ({}x{})", DISPLAY_WIDTH, DISPLAY_HEIGHT);

        self.send_commands(&INIT_SEQUENCE)?;

        self.frame.clear_all();
        self.flush()?;
        self.send_commands(&[SH1106_DISPLAY_ON])?;

        info!("SH1106 initialization complete");
        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Push the whole framebuffer to the panel.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.send_commands(&[
                SH1106_SET_PAGE | page as u8,
                SH1106_SET_COLUMN_LOW | (SH1106_COLUMN_OFFSET & 0x0F),
                SH1106_SET_COLUMN_HIGH | (SH1106_COLUMN_OFFSET >> 4),
            ])?;
            self.dc.set_high().map_err(|_| DisplayError::DataCommandPin)?;
            self.spi
                .write(self.frame.page(page))
                .map_err(|_| DisplayError::Spi)?;
        }
        Ok(())
    }

    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DataCommandPin)?;
        self.spi.write(commands).map_err(|_| DisplayError::Spi)
    }
}

impl<SPI, DC> LineRenderer for Sh1106<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    type Error = DisplayError;

    fn render(&mut self, lines: &[Line]) -> Result<(), DisplayError> {
        self.frame.draw_lines(lines);
        self.flush()
    }
}

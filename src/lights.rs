//! Double-buffered key lighting
//!
//! Colors and brightness written through [`PixelBuffer`] land in a back
//! buffer. [`PixelBuffer::flush`] latches them, and the LED driver picks up the
//! latched frame with [`PixelBuffer::take_frame`], already scaled by
//! brightness. A frame is only handed out when something changed.

use crate::types::Rgb;

pub struct PixelBuffer<const N: usize> {
    back: [Rgb; N],
    back_scale: u8,
    front: [Rgb; N],
    front_scale: u8,
    pending: bool,
}

impl<const N: usize> PixelBuffer<N> {
    pub fn new(brightness: f32) -> Self {
        Self {
            back: [Rgb::BLACK; N],
            back_scale: scale_for(brightness),
            front: [Rgb::BLACK; N],
            front_scale: 0,
            // Push the first frame so the strip starts from a known state
            pending: true,
        }
    }

    pub fn set(&mut self, slot: usize, color: Rgb) {
        match self.back.get_mut(slot) {
            Some(pixel) => *pixel = color,
            None => warn!("No pixel {} to set", slot),
        }
    }

    /// Unscaled color waiting in the back buffer.
    pub fn get(&self, slot: usize) -> Option<Rgb> {
        self.back.get(slot).copied()
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.back_scale = scale_for(brightness);
    }

    /// Brightness as the 0-255 scale factor the frame is multiplied by.
    pub fn scale(&self) -> u8 {
        self.back_scale
    }

    /// Latch the back buffer.
    pub fn flush(&mut self) {
        if self.front != self.back || self.front_scale != self.back_scale {
            self.front = self.back;
            self.front_scale = self.back_scale;
            self.pending = true;
        }
    }

    /// The latched frame scaled by brightness, if it has not been taken yet.
    pub fn take_frame(&mut self) -> Option<[Rgb; N]> {
        if !core::mem::take(&mut self.pending) {
            return None;
        }
        let scale = self.front_scale;
        Some(self.front.map(|c| Rgb::from_rgb(dim(c.r(), scale), dim(c.g(), scale), dim(c.b(), scale))))
    }
}

fn scale_for(brightness: f32) -> u8 {
    if brightness.is_nan() {
        return 0;
    }
    (brightness.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

fn dim(channel: u8, scale: u8) -> u8 {
    ((u16::from(channel) * u16::from(scale) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_invisible_until_flush() {
        let mut pixels: PixelBuffer<3> = PixelBuffer::new(1.0);
        assert_eq!(pixels.take_frame(), Some([Rgb::BLACK; 3]));

        pixels.set(1, Rgb::RED);
        assert_eq!(pixels.take_frame(), None);

        pixels.flush();
        assert_eq!(pixels.take_frame(), Some([Rgb::BLACK, Rgb::RED, Rgb::BLACK]));
        assert_eq!(pixels.take_frame(), None);
    }

    #[test]
    fn unchanged_flush_produces_no_frame() {
        let mut pixels: PixelBuffer<2> = PixelBuffer::new(0.5);
        pixels.flush();
        let _ = pixels.take_frame();
        pixels.flush();
        assert_eq!(pixels.take_frame(), None);
    }

    #[test]
    fn frame_is_scaled_by_brightness() {
        let mut pixels: PixelBuffer<1> = PixelBuffer::new(1.0);
        pixels.set(0, Rgb::new(0xFF8000));
        pixels.set_brightness(0.5);
        pixels.flush();
        assert_eq!(pixels.take_frame(), Some([Rgb::new(0x804000)]));

        pixels.set_brightness(0.0);
        pixels.flush();
        assert_eq!(pixels.take_frame(), Some([Rgb::BLACK]));
    }

    #[test]
    fn out_of_range_pixel_is_ignored() {
        let mut pixels: PixelBuffer<2> = PixelBuffer::new(1.0);
        pixels.set(7, Rgb::WHITE);
        assert_eq!(pixels.get(7), None);
    }
}

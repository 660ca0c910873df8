//! 1-bpp framebuffer render target.
//!
//! Stands in for the panel: the face composes into this buffer and the
//! embedding ships it out however it likes (the simulator dumps it to the
//! console). Out-of-bounds pixels are dropped silently, which the gauge
//! relies on when it slides past the right edge.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, Pixel};

/// Screen width in pixels
pub const WIDTH: u32 = 144;
/// Screen height in pixels
pub const HEIGHT: u32 = 168;

const ROW_BYTES: usize = WIDTH as usize / 8;
const BUF_LEN: usize = ROW_BYTES * HEIGHT as usize;

/// Packed 1-bpp buffer, one bit per pixel, MSB first.
pub struct Framebuffer {
    buf: [u8; BUF_LEN],
}

impl Framebuffer {
    pub fn new() -> Self {
        Self { buf: [0; BUF_LEN] }
    }

    /// Reset every pixel to off.
    pub fn clear(&mut self) {
        self.buf = [0; BUF_LEN];
    }

    /// Read back a single pixel; out-of-bounds reads are off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buf[y as usize * ROW_BYTES + x as usize / 8] >> (7 - x % 8) & 1 == 1
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= WIDTH as i32 || point.y >= HEIGHT as i32 {
                continue;
            }
            let idx = point.y as usize * ROW_BYTES + point.x as usize / 8;
            let mask = 0x80 >> (point.x as usize % 8);
            match color {
                BinaryColor::On => self.buf[idx] |= mask,
                BinaryColor::Off => self.buf[idx] &= !mask,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn set_and_read_back() {
        let mut fb = Framebuffer::new();
        Rectangle::new(Point::new(10, 20), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert!(fb.pixel(10, 20));
        assert!(fb.pixel(11, 21));
        assert!(!fb.pixel(12, 20));

        fb.clear();
        assert!(!fb.pixel(10, 20));
    }

    #[test]
    fn out_of_bounds_pixels_are_dropped() {
        let mut fb = Framebuffer::new();
        // Hangs off the right edge, like the gauge at high battery.
        Rectangle::new(Point::new(140, 0), Size::new(20, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert!(fb.pixel(143, 0));
        assert!(!fb.pixel(0, 0));
    }
}

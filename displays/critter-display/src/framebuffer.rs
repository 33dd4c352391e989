//! RGB565 back buffer
//!
//! Fixed-size, statically allocated pixel storage that `embedded-graphics`
//! primitives can draw into.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Back buffer of `W` x `H` RGB565 pixels
#[derive(Clone)]
pub struct Framebuffer<const W: usize, const H: usize> {
    pixels: [[u16; W]; H],
}

impl<const W: usize, const H: usize> Default for Framebuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Framebuffer<W, H> {
    /// Create a black framebuffer
    pub const fn new() -> Self {
        Self {
            pixels: [[0; W]; H],
        }
    }

    /// Fill every pixel with a raw RGB565 value
    pub fn fill(&mut self, raw: u16) {
        for row in self.pixels.iter_mut() {
            row.fill(raw);
        }
    }

    /// Raw RGB565 value at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Rows of raw pixels, top to bottom
    pub fn rows(&self) -> &[[u16; W]; H] {
        &self.pixels
    }

    /// Count pixels that differ from `raw`
    pub fn count_not(&self, raw: u16) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&p| p != raw)
            .count()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Framebuffer<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for Framebuffer<W, H> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < W && y < H {
                    self.pixels[y][x] = RawU16::from(color).into_inner();
                }
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
    fn test_new_is_black() {
        let fb: Framebuffer<8, 4> = Framebuffer::new();
        assert_eq!(fb.count_not(0), 0);
    }

    #[test]
    fn test_draw_clips() {
        let mut fb: Framebuffer<8, 8> = Framebuffer::new();
        let _ = Rectangle::new(Point::new(6, 6), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut fb);

        assert_eq!(fb.count_not(0), 4);
        assert_eq!(fb.pixel(7, 7), Some(0xFFFF));
        assert_eq!(fb.pixel(8, 8), None);
    }

    #[test]
    fn test_fill() {
        let mut fb: Framebuffer<4, 4> = Framebuffer::new();
        fb.fill(0xF800);
        assert_eq!(fb.pixel(3, 3), Some(0xF800));
        assert_eq!(fb.count_not(0xF800), 0);
    }
}

//! `Renderer` implementation on top of `embedded-graphics`
//!
//! Text uses the 6x10 mono font. Sprites are raw big-endian RGB565
//! bitmaps; a sprite id without a bitmap is drawn as an outlined box so
//! the layout stays visible.

use critter_hal::{Color, DisplayError, Renderer, SpriteId};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::framebuffer::Framebuffer;

/// Character cell width in pixels
pub const CHAR_WIDTH: i32 = 6;
/// Text line height in pixels
pub const LINE_HEIGHT: i32 = 10;
/// Edge length of the placeholder drawn for missing sprites
pub const PLACEHOLDER_SIZE: u32 = 48;

/// Longest line `write_wrapped` will build
const MAX_LINE: usize = 64;

/// Raw RGB565 bitmap
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    /// Width in pixels
    pub width: u32,
    /// Big-endian RGB565 pixel data, row major
    pub data: &'static [u8],
}

/// Destination for finished frames
pub trait Panel<const W: usize, const H: usize> {
    /// Transfer the whole frame to the panel
    fn push_frame(&mut self, frame: &Framebuffer<W, H>) -> Result<(), DisplayError>;
}

/// Renderer drawing into a [`Framebuffer`] and presenting through a [`Panel`]
pub struct GraphicsRenderer<P, const W: usize, const H: usize> {
    frame: Framebuffer<W, H>,
    panel: P,
    cursor: Point,
    color: Rgb565,
    background: Rgb565,
    sprites: &'static [Sprite],
}

fn to_rgb565(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.0))
}

impl<P: Panel<W, H>, const W: usize, const H: usize> GraphicsRenderer<P, W, H> {
    /// Create a renderer with a black background and white text
    pub fn new(panel: P, sprites: &'static [Sprite]) -> Self {
        Self {
            frame: Framebuffer::new(),
            panel,
            cursor: Point::zero(),
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
            sprites,
        }
    }

    /// Change the color used by `clear`
    pub fn set_background(&mut self, color: Color) {
        self.background = to_rgb565(color);
    }

    /// Back buffer contents
    pub fn frame(&self) -> &Framebuffer<W, H> {
        &self.frame
    }

    /// Underlying panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Current cursor position
    pub fn cursor(&self) -> (i16, i16) {
        (self.cursor.x as i16, self.cursor.y as i16)
    }

    fn draw_str(&mut self, text: &str, at: Point) -> Point {
        let style = MonoTextStyle::new(&FONT_6X10, self.color);
        Text::with_baseline(text, at, style, Baseline::Top)
            .draw(&mut self.frame)
            .unwrap_or(at)
    }

    fn flush_line(&mut self, line: &mut String<MAX_LINE>, origin_x: i32) {
        let at = Point::new(origin_x, self.cursor.y);
        self.draw_str(line.as_str(), at);
        line.clear();
        self.cursor = Point::new(origin_x, self.cursor.y + LINE_HEIGHT);
    }
}

impl<P: Panel<W, H>, const W: usize, const H: usize> Renderer for GraphicsRenderer<P, W, H> {
    fn clear(&mut self) {
        self.frame.fill(RawU16::from(self.background).into_inner());
        self.cursor = Point::zero();
    }

    fn move_cursor(&mut self, x: i16, y: i16) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    fn set_color(&mut self, color: Color) {
        self.color = to_rgb565(color);
    }

    fn write_text(&mut self, text: &str) {
        self.cursor = self.draw_str(text, self.cursor);
    }

    fn write_wrapped(&mut self, text: &str) {
        let origin_x = self.cursor.x;
        let width = (W as i32 - origin_x).max(CHAR_WIDTH);
        let cols = ((width / CHAR_WIDTH) as usize).min(MAX_LINE);
        let mut line: String<MAX_LINE> = String::new();

        for (n, paragraph) in text.split('\n').enumerate() {
            if n > 0 {
                self.flush_line(&mut line, origin_x);
            }
            for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
                if !line.is_empty() {
                    if line.len() + 1 + word.len() > cols {
                        self.flush_line(&mut line, origin_x);
                    } else {
                        let _ = line.push(' ');
                    }
                }
                // Words longer than a line are split hard
                for ch in word.chars() {
                    if line.len() >= cols {
                        self.flush_line(&mut line, origin_x);
                    }
                    let _ = line.push(ch);
                }
            }
        }
        if !line.is_empty() {
            self.flush_line(&mut line, origin_x);
        }
    }

    fn draw_sprite(&mut self, sprite: SpriteId) {
        match self.sprites.get(sprite.0 as usize) {
            Some(bitmap) if bitmap.width > 0 => {
                let raw: ImageRaw<Rgb565> = ImageRaw::new(bitmap.data, bitmap.width);
                let _ = Image::new(&raw, self.cursor).draw(&mut self.frame);
            }
            _ => {
                let _ = Rectangle::new(
                    self.cursor,
                    Size::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
                )
                .into_styled(
                    PrimitiveStyleBuilder::new()
                        .stroke_color(self.color)
                        .stroke_width(2)
                        .stroke_alignment(StrokeAlignment::Inside)
                        .build(),
                )
                .draw(&mut self.frame);
            }
        }
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.panel.push_frame(&self.frame)
    }

    fn dimensions(&self) -> (u16, u16) {
        (W as u16, H as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPanel {
        pushes: usize,
        lit: usize,
        fail: bool,
    }

    impl Panel<64, 64> for RecordingPanel {
        fn push_frame(&mut self, frame: &Framebuffer<64, 64>) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.pushes += 1;
            self.lit = frame.count_not(0);
            Ok(())
        }
    }

    fn renderer() -> GraphicsRenderer<RecordingPanel, 64, 64> {
        GraphicsRenderer::new(RecordingPanel::default(), &[])
    }

    #[test]
    fn test_nothing_reaches_panel_before_present() {
        let mut r = renderer();
        r.clear();
        r.write_text("Hi");
        assert_eq!(r.panel().pushes, 0);
        assert!(r.frame().count_not(0) > 0);

        r.present().unwrap();
        assert_eq!(r.panel().pushes, 1);
        assert!(r.panel().lit > 0);
    }

    #[test]
    fn test_write_text_advances_cursor() {
        let mut r = renderer();
        r.move_cursor(2, 4);
        r.write_text("abc");
        assert_eq!(r.cursor(), (2 + 3 * CHAR_WIDTH as i16, 4));
    }

    #[test]
    fn test_write_wrapped_breaks_lines() {
        let mut r = renderer();
        // 64 px wide, 10 columns
        r.write_wrapped("one two three four");
        assert_eq!(r.cursor(), (0, 2 * LINE_HEIGHT as i16));
    }

    #[test]
    fn test_write_wrapped_honors_newline() {
        let mut r = renderer();
        r.write_wrapped("ALL\nDONE");
        assert_eq!(r.cursor(), (0, 2 * LINE_HEIGHT as i16));
    }

    #[test]
    fn test_missing_sprite_draws_placeholder() {
        let mut r = renderer();
        r.clear();
        r.set_color(Color::RED);
        r.draw_sprite(SpriteId(3));
        assert_eq!(r.frame().pixel(0, 0), Some(Color::RED.0));
    }

    #[test]
    fn test_clear_uses_background() {
        let mut r = renderer();
        r.set_background(Color::BLUE);
        r.clear();
        assert_eq!(r.frame().count_not(Color::BLUE.0), 0);
    }

    #[test]
    fn test_present_error_propagates() {
        let mut r = renderer();
        r.panel.fail = true;
        assert_eq!(r.present(), Err(DisplayError::Communication));
    }
}

//! Display primitives
//!
//! The renderer draws into a back buffer; nothing reaches the panel until
//! [`Renderer::present`] is called.

/// 16-bit RGB565 color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);

    /// Build from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Red channel (5 bits)
    pub const fn r5(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Green channel (6 bits)
    pub const fn g6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue channel (5 bits)
    pub const fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

/// Opaque handle to a sprite asset known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpriteId(pub u8);

/// Errors from pushing a frame to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Panel still busy with the previous frame
    Busy,
}

/// Drawing primitives for the badge screen
///
/// Coordinates are in pixels with the origin at the top left.
pub trait Renderer {
    /// Clear the back buffer to the background color
    fn clear(&mut self);

    /// Move the text/sprite cursor
    fn move_cursor(&mut self, x: i16, y: i16);

    /// Set the foreground color for subsequent text
    fn set_color(&mut self, color: Color);

    /// Write a single line of text at the cursor
    ///
    /// The cursor advances horizontally past the text; nothing wraps.
    fn write_text(&mut self, text: &str);

    /// Write text starting at the cursor, wrapping at the right edge
    fn write_wrapped(&mut self, text: &str);

    /// Draw a sprite with its top left corner at the cursor
    fn draw_sprite(&mut self, sprite: SpriteId);

    /// Swap buffers and push the frame to the panel
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Screen size in pixels (width, height)
    fn dimensions(&self) -> (u16, u16);
}

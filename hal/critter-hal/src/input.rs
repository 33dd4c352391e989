//! Button and rotary encoder input
//!
//! Debouncing and edge capture happen below this trait. What the game sees
//! is already edge-triggered.

use critter_protocol::ButtonMask;

/// Latched button and encoder input
pub trait ButtonInput {
    /// Buttons pressed since the previous call
    ///
    /// Reading the latches clears them.
    fn latched_buttons(&mut self) -> ButtonMask;

    /// Encoder detents turned since the previous call on `axis`
    ///
    /// Negative is counter-clockwise. Reading clears the count.
    fn rotary_delta(&mut self, axis: u8) -> i32;
}

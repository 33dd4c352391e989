//! Buttons and rotary encoders
//!
//! The scan tasks debounce the GPIOs and accumulate edges into the
//! statics in `channels`; the frame task drains them through
//! [`LatchedInput`].

use portable_atomic::Ordering;

use critter_hal::ButtonInput;
use critter_protocol::ButtonMask;

use crate::channels::{BUTTON_LATCH, ROTARY};

/// Consecutive identical samples before a button level is accepted
pub const DEBOUNCE_SAMPLES: u8 = 4;

/// `ButtonInput` over the latches filled by the scan tasks
pub struct LatchedInput;

impl ButtonInput for LatchedInput {
    fn latched_buttons(&mut self) -> ButtonMask {
        ButtonMask::from_bits(BUTTON_LATCH.swap(0, Ordering::AcqRel))
    }

    fn rotary_delta(&mut self, axis: u8) -> i32 {
        ROTARY
            .get(axis as usize)
            .map(|count| count.swap(0, Ordering::AcqRel))
            .unwrap_or(0)
    }
}

/// Per-button integrating debouncer
///
/// Bit `n` of every mask is button `n` in `ButtonMask` order.
pub struct Debouncer {
    stable: u16,
    candidate: u16,
    count: u8,
}

impl Debouncer {
    /// All buttons released
    pub const fn new() -> Self {
        Self {
            stable: 0,
            candidate: 0,
            count: 0,
        }
    }

    /// Feed one raw sample (set bit = held down)
    ///
    /// Returns the buttons that became pressed with this sample.
    pub fn update(&mut self, raw: u16) -> u16 {
        if raw != self.candidate {
            self.candidate = raw;
            self.count = 0;
            return 0;
        }
        if self.count < DEBOUNCE_SAMPLES {
            self.count += 1;
            if self.count == DEBOUNCE_SAMPLES {
                let pressed = raw & !self.stable;
                self.stable = raw;
                return pressed;
            }
        }
        0
    }
}

/// Encoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder producing one count per detent
///
/// Clockwise, A falls before B:
/// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> +1 -> Idle.
/// Counter-clockwise mirrors it with B first and yields -1.
pub struct QuadratureDecoder {
    state: State,
    last: (bool, bool),
}

impl QuadratureDecoder {
    /// Start from the current pin levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last: (a, b),
        }
    }

    /// Feed the current pin levels; returns a detent when one completes
    pub fn update(&mut self, a: bool, b: bool) -> Option<i32> {
        if (a, b) == self.last {
            return None;
        }
        self.last = (a, b);

        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // Bounce
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                self.state = State::Idle;
                Some(1)
            }
            State::CcwStep2 => {
                self.state = State::Idle;
                Some(-1)
            }
        }
    }
}

//! Badge buttons as reported by the input collaborator
//!
//! The input collaborator latches presses between polls and reports them as
//! a bitmask; each bit means "pressed since the last poll".

/// Physical buttons on the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    /// Push switch of the left rotary encoder
    EncoderSw,
    /// Push switch of the right rotary encoder
    Encoder2Sw,
}

// Wire format values
const BIT_UP: u16 = 1 << 0;
const BIT_DOWN: u16 = 1 << 1;
const BIT_LEFT: u16 = 1 << 2;
const BIT_RIGHT: u16 = 1 << 3;
const BIT_A: u16 = 1 << 4;
const BIT_B: u16 = 1 << 5;
const BIT_ENCODER_SW: u16 = 1 << 6;
const BIT_ENCODER_2_SW: u16 = 1 << 7;

impl Button {
    /// Every button, in bit order
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::EncoderSw,
        Button::Encoder2Sw,
    ];

    /// Bit of this button in a [`ButtonMask`]
    pub fn bit(self) -> u16 {
        match self {
            Button::Up => BIT_UP,
            Button::Down => BIT_DOWN,
            Button::Left => BIT_LEFT,
            Button::Right => BIT_RIGHT,
            Button::A => BIT_A,
            Button::B => BIT_B,
            Button::EncoderSw => BIT_ENCODER_SW,
            Button::Encoder2Sw => BIT_ENCODER_2_SW,
        }
    }
}

/// Set of latched button presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u16);

impl ButtonMask {
    /// No buttons pressed
    pub const EMPTY: ButtonMask = ButtonMask(0);

    /// Build from raw bits; bits without a button are dropped
    pub fn from_bits(bits: u16) -> Self {
        let known = Button::ALL.iter().fold(0, |acc, b| acc | b.bit());
        Self(bits & known)
    }

    /// Raw bits
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Mask with a single button
    pub fn single(button: Button) -> Self {
        Self(button.bit())
    }

    /// Add a button to the mask
    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    /// Check whether `button` was pressed
    pub fn pressed(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    /// Check whether any of `buttons` was pressed
    pub fn any_of(self, buttons: &[Button]) -> bool {
        buttons.iter().any(|&b| self.pressed(b))
    }

    /// Returns true if nothing was pressed
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Button> for ButtonMask {
    fn from(button: Button) -> Self {
        ButtonMask::single(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u16;
        for button in Button::ALL {
            assert_eq!(seen & button.bit(), 0);
            seen |= button.bit();
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn test_pressed() {
        let mask = ButtonMask::single(Button::A).with(Button::Left);
        assert!(mask.pressed(Button::A));
        assert!(mask.pressed(Button::Left));
        assert!(!mask.pressed(Button::B));
        assert!(mask.any_of(&[Button::B, Button::Left]));
    }

    #[test]
    fn test_unknown_bits_dropped() {
        let mask = ButtonMask::from_bits(0xFF00 | BIT_UP);
        assert_eq!(mask.bits(), BIT_UP);
    }

    #[test]
    fn test_empty() {
        assert!(ButtonMask::EMPTY.is_empty());
        assert!(ButtonMask::default().is_empty());
        assert!(!ButtonMask::from(Button::Encoder2Sw).is_empty());
    }
}

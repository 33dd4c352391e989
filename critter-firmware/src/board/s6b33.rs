//! S6B33B2 132x132 color LCD driver
//!
//! Write-only SPI. The DC line selects command (low) or pixel data (high);
//! commands and their arguments are single bytes, pixels are RGB565 sent
//! MSB first.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use critter_display::{Framebuffer, Panel};
use critter_hal::DisplayError;

/// Panel width in pixels
pub const WIDTH: usize = 132;

/// Panel height in pixels
pub const HEIGHT: usize = 132;

/// S6B33B2 commands
#[allow(dead_code)]
mod cmd {
    pub const OSCILLATION_MODE: u8 = 0x02;
    pub const DRIVER_OUTPUT_MODE: u8 = 0x10;
    pub const DCDC_SELECT: u8 = 0x20;
    pub const BIAS_SET: u8 = 0x22;
    pub const DCDC_CLOCK_DIV: u8 = 0x24;
    pub const DCDC_AMP_ONOFF: u8 = 0x26;
    pub const CONTRAST_CONTROL1: u8 = 0x2A;
    pub const CONTRAST_CONTROL2: u8 = 0x2B;
    pub const STANDBY_OFF: u8 = 0x2C;
    pub const STANDBY_ON: u8 = 0x2D;
    pub const ADDRESSING_MODE: u8 = 0x30;
    pub const ROW_VECTOR_MODE: u8 = 0x32;
    pub const ENTRY_MODE: u8 = 0x40;
    pub const X_ADDR_AREA: u8 = 0x42;
    pub const Y_ADDR_AREA: u8 = 0x43;
    pub const DISPLAY_OFF: u8 = 0x50;
    pub const DISPLAY_ON: u8 = 0x51;
    pub const DISPLAY_PATTERN: u8 = 0x53;
    pub const PARTIAL_DISPLAY_MODE: u8 = 0x55;
}

/// 132 lines, segment direction reversed, BGR swap
const OUTPUT_MODE: u8 = 0x06;
/// Auto-increment along X, wrap to the next line
const ENTRY: u8 = 0x80;
/// 65536 colors
const ADDRESS_MODE: u8 = 0x1D;
/// Diagonal row vector, INC=111
const ROW_VECTOR: u8 = 0x0E;
/// fosc/32 in normal and partial modes
const CLOCK_DIV: u8 = 0x11;
/// ~3.76 V
const CONTRAST: u8 = 0x34;

/// Power-up sequence after the booster is off and standby released.
/// The DC-DC step-up stays at x1.0; higher ratios damage 3.3 V panels.
#[rustfmt::skip]
const POWER_UP: &[u8] = &[
    cmd::OSCILLATION_MODE, 0x01, // internal oscillator
    cmd::DCDC_AMP_ONOFF, 0x01,   // booster 1
    cmd::DCDC_AMP_ONOFF, 0x09,   // + amplifier
    cmd::DCDC_AMP_ONOFF, 0x0B,   // + booster 2
    cmd::DCDC_AMP_ONOFF, 0x0F,   // + booster 3
    cmd::DCDC_SELECT, 0x00,
    cmd::DCDC_CLOCK_DIV, CLOCK_DIV,
    cmd::DRIVER_OUTPUT_MODE, OUTPUT_MODE,
    cmd::ENTRY_MODE, ENTRY,
    cmd::BIAS_SET, 0x00, // 1/4
    cmd::DISPLAY_PATTERN, 0x00,
    cmd::ADDRESSING_MODE, ADDRESS_MODE,
    cmd::ROW_VECTOR_MODE, ROW_VECTOR,
    cmd::X_ADDR_AREA, 0x00, (WIDTH - 1) as u8,
    cmd::Y_ADDR_AREA, 0x00, (HEIGHT - 1) as u8,
    cmd::CONTRAST_CONTROL1, CONTRAST,
    cmd::CONTRAST_CONTROL2, CONTRAST,
    cmd::PARTIAL_DISPLAY_MODE, 0x00,
    cmd::DISPLAY_ON,
];

/// S6B33B2 LCD on a write-only SPI bus
pub struct S6b33<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    line: [u8; WIDTH * 2],
}

impl<SPI, CS, DC, RST> S6b33<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver; call [`S6b33::init`] before the first frame
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            line: [0; WIDTH * 2],
        }
    }

    /// Hardware reset and power-up
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::Communication)?;
        delay.delay_us(1000);
        self.rst.set_high().map_err(|_| DisplayError::Communication)?;
        delay.delay_us(1000);

        // Clocks and booster off before reconfiguring
        self.commands(&[cmd::STANDBY_ON, cmd::DCDC_AMP_ONOFF, 0x00])?;
        delay.delay_ms(2);
        self.commands(&[cmd::STANDBY_OFF])?;
        self.commands(POWER_UP)
    }

    /// Turn the panel output on or off
    #[allow(dead_code)]
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.commands(&[if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }])
    }

    /// Send command bytes
    fn commands(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Communication)?;
        self.transfer(|spi| spi.write(bytes))
    }

    /// Restrict pixel writes to a window
    fn set_window(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), DisplayError> {
        self.commands(&[
            cmd::ENTRY_MODE,
            ENTRY,
            cmd::X_ADDR_AREA,
            x,
            x + width - 1,
            cmd::Y_ADDR_AREA,
            y,
            y + height - 1,
        ])
    }

    /// Run `f` with chip select asserted, waiting for the bus to drain
    fn transfer<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        let result = f(&mut self.spi).and_then(|()| self.spi.flush());
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        result.map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, CS, DC, RST> Panel<WIDTH, HEIGHT> for S6b33<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn push_frame(&mut self, frame: &Framebuffer<WIDTH, HEIGHT>) -> Result<(), DisplayError> {
        self.set_window(0, 0, WIDTH as u8, HEIGHT as u8)?;
        self.dc.set_high().map_err(|_| DisplayError::Communication)?;

        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        let mut result = Ok(());
        for row in frame.rows() {
            for (bytes, pixel) in self.line.chunks_exact_mut(2).zip(row.iter()) {
                bytes.copy_from_slice(&pixel.to_be_bytes());
            }
            result = self.spi.write(&self.line);
            if result.is_err() {
                break;
            }
        }
        let result = result.and_then(|()| self.spi.flush());
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        result.map_err(|_| DisplayError::Communication)
    }
}

//! Button and encoder scan tasks

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;
use portable_atomic::Ordering;

use critter_protocol::Button;

use crate::board::input::{Debouncer, QuadratureDecoder};
use crate::channels::{BUTTON_LATCH, ROTARY};

/// Button scan period
const BUTTON_SCAN_MS: u64 = 2;

/// Encoder poll period
const ENCODER_POLL_MS: u64 = 1;

/// Buttons task - debounces the button GPIOs, in `Button::ALL` order
#[embassy_executor::task]
pub async fn buttons_task(pins: [Input<'static>; Button::ALL.len()]) {
    info!("Buttons task started");

    let mut debouncer = Debouncer::new();

    loop {
        Timer::after_millis(BUTTON_SCAN_MS).await;

        // Active low
        let raw = pins
            .iter()
            .zip(Button::ALL)
            .filter(|(pin, _)| pin.is_low())
            .fold(0u16, |bits, (_, button)| bits | button.bit());

        let pressed = debouncer.update(raw);
        if pressed != 0 {
            trace!("Pressed: {:#x}", pressed);
            BUTTON_LATCH.fetch_or(pressed, Ordering::AcqRel);
        }
    }
}

/// Encoder task - one instance per rotary encoder
#[embassy_executor::task(pool_size = 2)]
pub async fn encoder_task(axis: usize, a: Input<'static>, b: Input<'static>) {
    info!("Encoder {} task started", axis);

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        Timer::after_millis(ENCODER_POLL_MS).await;

        if let Some(step) = decoder.update(a.is_high(), b.is_high()) {
            if let Some(count) = ROTARY.get(axis) {
                count.fetch_add(step, Ordering::AcqRel);
            }
        }
    }
}

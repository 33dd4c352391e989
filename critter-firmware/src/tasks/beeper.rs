//! Beeper task
//!
//! Square wave on a GPIO. A new tone cuts off the one playing.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Timer};

use critter_core::Tone;

use crate::channels::BEEP;

/// Beeper task - plays tones requested through `BEEP`
#[embassy_executor::task]
pub async fn beeper_task(mut pin: Output<'static>) {
    info!("Beeper task started");

    loop {
        let mut tone = BEEP.wait().await;
        loop {
            trace!("Beep {} Hz for {} ms", tone.frequency_hz, tone.duration_ms);
            match select(play(&mut pin, tone), BEEP.wait()).await {
                Either::First(()) => break,
                Either::Second(next) => tone = next,
            }
        }
        pin.set_low();
    }
}

/// Toggle the pin at the tone frequency until its duration elapses
async fn play(pin: &mut Output<'static>, tone: Tone) {
    let half_period = Duration::from_micros(500_000 / u64::from(tone.frequency_hz.max(1)));
    let end = Instant::now() + Duration::from_millis(u64::from(tone.duration_ms));

    while Instant::now() < end {
        pin.toggle();
        Timer::after(half_period).await;
    }
}

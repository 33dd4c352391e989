//! Beeper, badge identity and launcher

use defmt::*;

use critter_core::Tone;
use critter_hal::{Audio, DeviceIdentity, Launcher};

use crate::board::storage::BadgeFlash;
use crate::channels::{BEEP, FLUSH_STORAGE};

/// Id used when the flash unique id cannot be read
const FALLBACK_DEVICE_ID: u64 = 0;

/// `Audio` that hands tones to the beeper task
pub struct Beeper;

impl Audio for Beeper {
    fn beep(&mut self, frequency_hz: u16, duration_ms: u16) {
        BEEP.signal(Tone::new(frequency_hz, duration_ms));
    }
}

/// Badge id derived from the QSPI flash unique id
#[derive(Debug, Clone, Copy)]
pub struct BadgeIdentity(u64);

impl BadgeIdentity {
    /// Read the 64-bit unique id of the flash chip
    pub fn read(flash: &mut BadgeFlash) -> Self {
        let mut uid = [0u8; 8];
        match flash.blocking_unique_id(&mut uid) {
            Ok(()) => Self(u64::from_be_bytes(uid)),
            Err(_) => {
                warn!("Flash unique id unavailable, using fallback id");
                Self(FALLBACK_DEVICE_ID)
            }
        }
    }
}

impl DeviceIdentity for BadgeIdentity {
    fn device_id(&self) -> u64 {
        self.0
    }
}

/// The game is the only application on this badge
///
/// Returning to the launcher commits the ownership cache; the next tick
/// starts a fresh session from `Init`.
pub struct RestartLauncher;

impl Launcher for RestartLauncher {
    fn return_to_launcher(&mut self) {
        info!("Game exited, flushing storage");
        FLUSH_STORAGE.signal(());
    }
}

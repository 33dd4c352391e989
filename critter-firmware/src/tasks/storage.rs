//! Storage task
//!
//! Commits the ownership cache to flash after it changes.

use defmt::*;
use embassy_time::Timer;

use crate::board::storage::{self, BadgeFlash};
use crate::channels::FLUSH_STORAGE;

/// Quiet time before committing, so a burst of grants costs one pass
const SETTLE_MS: u64 = 500;

/// Storage task - owns the flash after boot
#[embassy_executor::task]
pub async fn storage_task(mut flash: BadgeFlash) {
    info!("Storage task started");

    loop {
        FLUSH_STORAGE.wait().await;
        Timer::after_millis(SETTLE_MS).await;

        let report = storage::flush(&mut flash).await;
        if report.failed > 0 {
            // Failed entries stay dirty; retry on the next change
            warn!(
                "Committed {} records, {} failed",
                report.written, report.failed
            );
        } else if report.written > 0 {
            debug!("Committed {} records", report.written);
        } else {
            trace!("Storage already clean");
        }
    }
}

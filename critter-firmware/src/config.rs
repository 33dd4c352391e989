//! Game configuration compiled in from badge.toml

use defmt::*;

use critter_core::{GameConfig, Tone};

include!(concat!(env!("OUT_DIR"), "/badge_config.rs"));

/// Configuration to boot with
///
/// build.rs already range-checks badge.toml; anything that still fails
/// validation falls back to the shipping defaults.
pub fn load() -> GameConfig {
    match BADGE_CONFIG.validate() {
        Ok(()) => {
            info!(
                "Config: {} us frames, beacon every {} ticks",
                BADGE_CONFIG.frame_period_us, BADGE_CONFIG.beacon_interval_ticks
            );
            BADGE_CONFIG
        }
        Err(e) => {
            error!("Invalid badge config: {}, using defaults", e);
            GameConfig::DEFAULT
        }
    }
}

//! Game configuration
//!
//! Tunables of the game loop. The defaults are what shipping badges use;
//! board crates may override them at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default frame period, 30 frames per second
pub const DEFAULT_FRAME_PERIOD_US: u32 = 33_333;

/// Default number of trading ticks between beacons
pub const DEFAULT_BEACON_INTERVAL_TICKS: u32 = 10;

/// A fire-and-forget beep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tone {
    /// Frequency in Hz
    pub frequency_hz: u16,
    /// Duration in ms
    pub duration_ms: u16,
}

impl Tone {
    /// Create a tone
    pub const fn new(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Beacon interval must be at least one tick
    ZeroBeaconInterval,
    /// Frame period must be non-zero
    ZeroFramePeriod,
    /// Tone frequency outside the audible range the beeper supports
    ToneOutOfRange(u16),
}

/// Lowest beep frequency the badge speaker reproduces
pub const MIN_TONE_HZ: u16 = 20;
/// Highest beep frequency the badge speaker reproduces
pub const MAX_TONE_HZ: u16 = 20_000;

/// Game loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    /// Trading ticks between two beacons
    pub beacon_interval_ticks: u32,
    /// Target frame period in microseconds
    pub frame_period_us: u32,
    /// Acknowledgment played when a creature is granted
    pub grant_tone: Tone,
    /// Chirp played with every beacon
    pub beacon_tone: Tone,
    /// Rotary encoder used for menu navigation
    pub rotary_axis: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GameConfig {
    /// Shipping configuration
    pub const DEFAULT: GameConfig = GameConfig {
        beacon_interval_ticks: DEFAULT_BEACON_INTERVAL_TICKS,
        frame_period_us: DEFAULT_FRAME_PERIOD_US,
        grant_tone: Tone::new(900, 200),
        beacon_tone: Tone::new(500, 100),
        rotary_axis: 0,
    };

    /// Check the configuration for values the game loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beacon_interval_ticks == 0 {
            return Err(ConfigError::ZeroBeaconInterval);
        }
        if self.frame_period_us == 0 {
            return Err(ConfigError::ZeroFramePeriod);
        }
        for tone in [self.grant_tone, self.beacon_tone] {
            if !(MIN_TONE_HZ..=MAX_TONE_HZ).contains(&tone.frequency_hz) {
                return Err(ConfigError::ToneOutOfRange(tone.frequency_hz));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.beacon_interval_ticks, 10);
        assert_eq!(config.frame_period_us, 33_333);
        assert_eq!(config.grant_tone, Tone::new(900, 200));
        assert_eq!(config.beacon_tone, Tone::new(500, 100));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = GameConfig {
            beacon_interval_ticks: 0,
            ..GameConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBeaconInterval));
    }

    #[test]
    fn test_validate_rejects_silent_tone() {
        let config = GameConfig {
            beacon_tone: Tone::new(5, 100),
            ..GameConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ToneOutOfRange(5)));
    }
}

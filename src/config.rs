use thiserror::Error;

/// a colour as sent to a ring cell; one byte per channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// NeoPixels are blinding at full brightness, so the palette is kept dim
pub const RED: Rgb = Rgb(0x10, 0, 0);
pub const YELLOW: Rgb = Rgb(0x10, 0x10, 0);
pub const GREEN: Rgb = Rgb(0, 0x10, 0);
pub const AQUA: Rgb = Rgb(0, 0x10, 0x10);
pub const BLUE: Rgb = Rgb(0, 0, 0x10);
pub const PURPLE: Rgb = Rgb(0x10, 0, 0x10);
pub const BLACK: Rgb = Rgb(0, 0, 0);

/// sounds downloaded from freesound.org
pub const LOSE_ROUND_CLIP: &str = "362204__taranp__horn-fail-wahwah-3.wav";
pub const START_ROUND_CLIP: &str = "234565__foolboymedia__announcement-begin.wav";
pub const WIN_GAME_CLIP: &str = "110317__timbre__remix-of-62176-fanfare-before-after.wav";
pub const WIN_ROUND_CLIP: &str = "320883__rhodesmas__action-03.wav";

/// Every tunable constant of the game. Set once at startup and never changed.
///
/// Thresholds are raw sensor magnitudes; times are seconds. The defaults are
/// arbitrary starting points and should be calibrated to the spring in use.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// number of cells in the ring
    pub ring_len: usize,

    /// magnitude that starts a round and picks the short read window
    pub short_threshold: u16,
    /// magnitude that picks the medium read window
    pub medium_threshold: u16,
    /// magnitude that picks the long read window
    pub long_threshold: u16,
    /// readings above this during the spin stretch the read window
    pub still_vibrating_threshold: u16,

    pub short_read_time: f64,
    pub medium_read_time: f64,
    pub long_read_time: f64,
    /// added to the read window per reading above `still_vibrating_threshold`
    pub read_time_increment: f64,

    /// win spaces on the ring at the start of a game
    pub start_win_count: usize,
    /// win spaces left that count as winning the game
    pub min_win_count: usize,

    /// seconds between cursor steps at full speed
    pub max_speed: f64,
    /// seconds between cursor steps past which the cursor has stopped
    pub min_speed: f64,

    /// how often the cursor slows down during wind-down
    pub decelerate_time: f64,
    /// step interval multiplier applied on each slow-down
    pub decelerate_factor: f64,

    /// on/off cycles of the round result flash
    pub flash_count: usize,
    /// time each flash colour is held
    pub flash_delay: f64,
    /// how fast the stationary cursor blinks while waiting for a strike
    pub cursor_tick_speed: f64,
    /// the sensor reads high for a moment after the speaker is switched off
    pub audio_settle_delay: f64,

    pub start_round_clip: &'static str,
    pub win_round_clip: &'static str,
    pub lose_round_clip: &'static str,
    pub win_game_clip: &'static str,

    pub win_color: Rgb,
    pub lose_color: Rgb,
    pub cursor_color: Rgb,
    pub cursor_win_color: Rgb,
    pub blank_color: Rgb,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ring_len: 10,
            short_threshold: 2800,
            medium_threshold: 4500,
            long_threshold: 6000,
            still_vibrating_threshold: 800,
            short_read_time: 0.5,
            medium_read_time: 1.0,
            long_read_time: 1.5,
            read_time_increment: 0.1,
            start_win_count: 6,
            min_win_count: 2,
            max_speed: 0.01,
            min_speed: 1.00,
            decelerate_time: 0.5,
            decelerate_factor: 1.5,
            flash_count: 5,
            flash_delay: 0.25,
            cursor_tick_speed: 0.5,
            audio_settle_delay: 0.5,
            start_round_clip: START_ROUND_CLIP,
            win_round_clip: WIN_ROUND_CLIP,
            lose_round_clip: LOSE_ROUND_CLIP,
            win_game_clip: WIN_GAME_CLIP,
            win_color: GREEN,
            lose_color: RED,
            cursor_color: PURPLE,
            cursor_win_color: YELLOW,
            blank_color: BLACK,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ring must have at least one cell")]
    EmptyRing,
    #[error("configured for {0} cells but the ring has {1}")]
    RingMismatch(usize, usize),
    #[error("trigger thresholds must strictly increase: {0} < {1} < {2}")]
    Thresholds(u16, u16, u16),
    #[error("read times must be positive and strictly increase: {0} < {1} < {2}")]
    ReadTimes(f64, f64, f64),
    #[error("start win count {0} must be above min win count {1}")]
    WinCounts(usize, usize),
    #[error("start win count {0} does not fit on a ring of {1} cells")]
    WinCountTooBig(usize, usize),
    #[error("max speed {0}s must be positive and below min speed {1}s")]
    Speeds(f64, f64),
    #[error("decelerate factor {0} must be greater than 1")]
    DecelerateFactor(f64),
}

impl Config {
    /// check the constants are consistent with each other before a game starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_len == 0 {
            return Err(ConfigError::EmptyRing);
        }
        if !(self.short_threshold < self.medium_threshold
            && self.medium_threshold < self.long_threshold)
        {
            return Err(ConfigError::Thresholds(
                self.short_threshold,
                self.medium_threshold,
                self.long_threshold,
            ));
        }
        if !(0.0 < self.short_read_time
            && self.short_read_time < self.medium_read_time
            && self.medium_read_time < self.long_read_time)
        {
            return Err(ConfigError::ReadTimes(
                self.short_read_time,
                self.medium_read_time,
                self.long_read_time,
            ));
        }
        if self.min_win_count >= self.start_win_count {
            return Err(ConfigError::WinCounts(
                self.start_win_count,
                self.min_win_count,
            ));
        }
        if self.start_win_count > self.ring_len {
            return Err(ConfigError::WinCountTooBig(
                self.start_win_count,
                self.ring_len,
            ));
        }
        if !(0.0 < self.max_speed && self.max_speed < self.min_speed) {
            return Err(ConfigError::Speeds(self.max_speed, self.min_speed));
        }
        if self.decelerate_factor <= 1.0 {
            return Err(ConfigError::DecelerateFactor(self.decelerate_factor));
        }
        Ok(())
    }

    /// how long to keep reading the sensor after a strike of `magnitude`
    pub fn read_time_for(&self, magnitude: u16) -> f64 {
        if magnitude < self.medium_threshold {
            self.short_read_time
        } else if magnitude < self.long_threshold {
            self.medium_read_time
        } else {
            self.long_read_time
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_read_time_tiers() {
        let c = Config::default();
        assert_eq!(c.read_time_for(2800), 0.5);
        assert_eq!(c.read_time_for(4499), 0.5);
        assert_eq!(c.read_time_for(4500), 1.0);
        assert_eq!(c.read_time_for(5999), 1.0);
        assert_eq!(c.read_time_for(6000), 1.5);
        assert_eq!(c.read_time_for(u16::MAX), 1.5);
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let c = Config {
            medium_threshold: 7000,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::Thresholds(2800, 7000, 6000)));
    }

    #[test]
    fn test_rejects_win_count_bigger_than_ring() {
        let c = Config {
            ring_len: 4,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::WinCountTooBig(6, 4)));
    }

    #[test]
    fn test_rejects_min_win_count_at_start() {
        let c = Config {
            min_win_count: 6,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::WinCounts(6, 6)));
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        let c = Config {
            max_speed: 2.0,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::Speeds(2.0, 1.0)));
    }

    #[test]
    fn test_rejects_accelerating_factor() {
        let c = Config {
            decelerate_factor: 0.9,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::DecelerateFactor(0.9)));
    }
}

//! Engine configuration.

use std::time::Duration;

use tracing::warn;

use crate::types::{
    END_MESSAGE_DELAY_MS, ENEMY_PERIOD_MS, INITIAL_SNAKE_SPEED, SPECIAL_POWERUP_FREQ,
    SPECIAL_POWERUP_PERIOD_MS,
};

/// Sampling attempts before placement falls back to a free-cell scan.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 64;

/// Session timing and randomness settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Moves per minute of a fresh session.
    pub initial_speed: u32,
    pub special_period: Duration,
    /// A special powerup appears with probability `1 / special_frequency`.
    pub special_frequency: u32,
    pub enemy_period: Duration,
    /// How long the render loop holds a Loss/Win message.
    pub end_message_delay: Duration,
    pub placement_attempts: u32,
    /// Fixed generator seed; `None` seeds from the tick counter.
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SNAKE_SPEED,
            special_period: Duration::from_millis(SPECIAL_POWERUP_PERIOD_MS),
            special_frequency: SPECIAL_POWERUP_FREQ,
            enemy_period: Duration::from_millis(ENEMY_PERIOD_MS),
            end_message_delay: Duration::from_millis(END_MESSAGE_DELAY_MS),
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create from `SNAKE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u32 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let parse_ms = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let config = Self {
            initial_speed: parse_u32("SNAKE_INITIAL_SPEED").unwrap_or(defaults.initial_speed),
            special_period: parse_ms("SNAKE_SPECIAL_PERIOD_MS")
                .unwrap_or(defaults.special_period),
            special_frequency: parse_u32("SNAKE_SPECIAL_FREQ")
                .unwrap_or(defaults.special_frequency),
            enemy_period: parse_ms("SNAKE_ENEMY_PERIOD_MS").unwrap_or(defaults.enemy_period),
            end_message_delay: parse_ms("SNAKE_END_DELAY_MS")
                .unwrap_or(defaults.end_message_delay),
            placement_attempts: parse_u32("SNAKE_PLACEMENT_ATTEMPTS")
                .unwrap_or(defaults.placement_attempts),
            seed: parse_u32("SNAKE_SEED"),
        };
        config.validated()
    }

    /// Replace values the engine cannot run with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.initial_speed == 0 {
            warn!("initial speed must be positive, using {}", defaults.initial_speed);
            self.initial_speed = defaults.initial_speed;
        }
        if self.special_frequency == 0 {
            warn!(
                "special powerup frequency must be positive, using {}",
                defaults.special_frequency
            );
            self.special_frequency = defaults.special_frequency;
        }
        if self.special_period.is_zero() {
            warn!("special powerup period must be positive, using default");
            self.special_period = defaults.special_period;
        }
        if self.enemy_period.is_zero() {
            warn!("enemy period must be positive, using default");
            self.enemy_period = defaults.enemy_period;
        }
        self
    }
}

/// Movement period for `speed` moves per minute, never shorter than 1 ms.
pub fn tick_period(speed: u32) -> Duration {
    let ms = 60_000 / u64::from(speed.max(1));
    Duration::from_millis(ms.max(1))
}

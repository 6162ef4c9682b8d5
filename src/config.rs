/// Game tunables.
///
/// Defaults reproduce the classic 800×800 / 20 FPS arcade feel.  A TOML file
/// may override any subset of keys; everything is checked once by
/// [`GameConfig::validate`] so the simulation never has to guard its random
/// ranges at runtime.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest magnitude accepted for any size, speed or offset.  Keeps every
/// sum the simulation forms well inside `i32`.
pub const MAX_EXTENT: i32 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Play area & cadence ──────────────────────────────────────────────────
    pub width: i32,
    pub height: i32,
    pub ticks_per_second: u32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_size: i32,
    /// Distance from the bottom of the play area to the ship's centre.
    pub ship_bottom_offset: i32,
    pub ship_speed: i32,
    pub ship_health: u32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_velocity: i32,
    /// Horizontal offset of each bullet from centre while double bullet is on.
    pub double_bullet_spread: i32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_count: usize,
    pub enemy_size: i32,
    pub enemy_min_speed: i32,
    pub enemy_max_speed: i32,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub power_up_size: i32,
    pub power_up_speed: i32,
    /// Chance per tick that a new power-up appears.
    pub power_up_spawn_chance: f64,
    /// Ticks a collected power-up stays active.
    pub power_up_duration: u32,
    /// Drop power-ups that fall past the bottom edge.
    pub cull_offscreen_power_ups: bool,

    // ── Spawning ─────────────────────────────────────────────────────────────
    /// Vertical range (above the visible area) for spawned entity centres.
    pub spawn_min_y: i32,
    pub spawn_max_y: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            ticks_per_second: 20,
            ship_size: 50,
            ship_bottom_offset: 60,
            ship_speed: 5,
            ship_health: 3,
            bullet_width: 10,
            bullet_height: 20,
            bullet_velocity: -10,
            double_bullet_spread: 10,
            enemy_count: 5,
            enemy_size: 40,
            enemy_min_speed: 3,
            enemy_max_speed: 6,
            power_up_size: 30,
            power_up_speed: 3,
            power_up_spawn_chance: 0.01,
            power_up_duration: 300,
            cull_offscreen_power_ups: true,
            spawn_min_y: -100,
            spawn_max_y: -40,
        }
    }
}

impl GameConfig {
    /// Read a TOML file, fill missing keys with defaults and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let extents = [
            self.width,
            self.height,
            self.ship_size,
            self.ship_bottom_offset,
            self.ship_speed,
            self.bullet_width,
            self.bullet_height,
            self.bullet_velocity,
            self.double_bullet_spread,
            self.enemy_size,
            self.enemy_min_speed,
            self.enemy_max_speed,
            self.power_up_size,
            self.power_up_speed,
            self.spawn_min_y,
            self.spawn_max_y,
        ];
        if extents.iter().any(|v| v.unsigned_abs() > MAX_EXTENT as u32) {
            return Err(invalid("sizes, speeds and offsets must lie within ±1000000"));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("play area must have a positive width and height"));
        }
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second must be at least 1"));
        }
        if self.ship_size <= 0 || self.ship_size > self.width || self.ship_size > self.height {
            return Err(invalid("ship_size must fit inside the play area"));
        }
        if self.ship_speed <= 0 {
            return Err(invalid("ship_speed must be positive"));
        }
        if self.ship_health == 0 {
            return Err(invalid("ship_health must be at least 1"));
        }
        let ship_top = self.height - self.ship_bottom_offset - self.ship_size / 2;
        if ship_top < 0 || ship_top + self.ship_size > self.height {
            return Err(invalid("ship_bottom_offset places the ship outside the play area"));
        }
        if self.bullet_width <= 0 || self.bullet_height <= 0 {
            return Err(invalid("bullets must have a positive size"));
        }
        if self.bullet_velocity >= 0 {
            return Err(invalid("bullet_velocity must be negative (upward)"));
        }
        if self.enemy_count == 0 {
            return Err(invalid("enemy_count must be at least 1"));
        }
        if self.enemy_size <= 0 || self.power_up_size <= 0 {
            return Err(invalid("enemies and power-ups must have a positive size"));
        }
        if self.enemy_min_speed <= 0 || self.enemy_min_speed > self.enemy_max_speed {
            return Err(invalid("enemy speed range must be positive and non-empty"));
        }
        if self.power_up_speed <= 0 {
            return Err(invalid("power_up_speed must be positive"));
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return Err(invalid("power_up_spawn_chance must lie in [0, 1]"));
        }
        if self.power_up_duration == 0 {
            return Err(invalid("power_up_duration must be at least 1 tick"));
        }
        if self.spawn_min_y > self.spawn_max_y {
            return Err(invalid("spawn_min_y must not exceed spawn_max_y"));
        }
        Ok(())
    }

    // ── Derived values ───────────────────────────────────────────────────────

    pub fn enemy_speed_range(&self) -> RangeInclusive<i32> {
        self.enemy_min_speed..=self.enemy_max_speed
    }

    pub fn spawn_x_range(&self) -> RangeInclusive<i32> {
        0..=self.width
    }

    pub fn spawn_y_range(&self) -> RangeInclusive<i32> {
        self.spawn_min_y..=self.spawn_max_y
    }

    /// Whole seconds represented by a countdown of `ticks`.
    pub fn ticks_to_secs(&self, ticks: u32) -> u32 {
        ticks / self.ticks_per_second
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_string())
}

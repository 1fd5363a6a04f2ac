//! Data-driven game balance
//!
//! Every gameplay constant lives here so a front end can load a JSON table
//! without recompiling. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Horizontal walk speed (pixels/s)
    pub move_speed: f32,
    /// Initial upward speed of a jump (pixels/s)
    pub jump_speed: f32,
    /// Ladder climb speed (pixels/s)
    pub climb_speed: f32,
    /// Sword reach, measured center to center (pixels)
    pub attack_radius: f32,
    /// How long a sword swing kills on touch (seconds)
    pub attack_duration: f32,

    // === Barrels ===
    /// Barrel gravity as a fraction of `gravity`
    pub barrel_gravity_scale: f32,
    pub barrel_spawn_interval: f32,
    pub barrel_spawn_interval_step: f32,
    pub barrel_spawn_interval_min: f32,
    pub barrel_speed: f32,
    pub barrel_speed_step: f32,
    /// Time a broken barrel lingers before its slot frees (seconds)
    pub barrel_broken_duration: f32,

    // === Baddies ===
    pub baddie_spawn_interval: f32,
    pub baddie_spawn_interval_step: f32,
    pub baddie_spawn_interval_min: f32,
    pub baddie_speed: f32,
    pub baddie_speed_step: f32,
    /// Horizontal distance below which a baddie keeps its heading
    pub baddie_dead_zone: f32,
    /// Probability that a grunt hops down at a ledge instead of turning
    pub baddie_hop_chance: f64,
    pub baddie_death_duration: f32,

    // === Power-ups ===
    pub power_up_duration: f32,

    // === Scoring ===
    pub score_coin: u64,
    pub score_barrel: u64,
    pub score_baddie: u64,
    pub score_win: u64,
    /// Points between extra lives
    pub extra_life_step: u64,

    // === Run ===
    pub starting_lives: u32,
    /// Highest level before wrapping back to 1
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            move_speed: 220.0,
            jump_speed: 520.0,
            climb_speed: 180.0,
            attack_radius: 64.0,
            attack_duration: 0.25,

            barrel_gravity_scale: 0.7,
            barrel_spawn_interval: 2.5,
            barrel_spawn_interval_step: 0.06,
            barrel_spawn_interval_min: 0.8,
            barrel_speed: 140.0,
            barrel_speed_step: 10.0,
            barrel_broken_duration: 0.5,

            baddie_spawn_interval: 6.0,
            baddie_spawn_interval_step: 0.25,
            baddie_spawn_interval_min: 2.0,
            baddie_speed: 80.0,
            baddie_speed_step: 4.0,
            baddie_dead_zone: 8.0,
            baddie_hop_chance: 0.35,
            baddie_death_duration: 0.5,

            power_up_duration: 30.0,

            score_coin: 100,
            score_barrel: 200,
            score_baddie: 300,
            score_win: 1000,
            extra_life_step: 5000,

            starting_lives: 3,
            max_level: 25,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Load a tuning table from disk, falling back to defaults on failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation
    pub fn validate(&mut self) {
        let defaults = Self::default();
        let fix = |name: &str, value: &mut f32, min: f32, fallback: f32| {
            if !(value.is_finite() && *value >= min) {
                log::warn!("tuning.{name} = {value} out of range, using {fallback}");
                *value = fallback;
            }
        };
        fix("gravity", &mut self.gravity, 0.0, defaults.gravity);
        fix("attack_duration", &mut self.attack_duration, 0.0, defaults.attack_duration);
        fix(
            "barrel_spawn_interval_min",
            &mut self.barrel_spawn_interval_min,
            0.05,
            defaults.barrel_spawn_interval_min,
        );
        fix(
            "baddie_spawn_interval_min",
            &mut self.baddie_spawn_interval_min,
            0.05,
            defaults.baddie_spawn_interval_min,
        );
        fix(
            "barrel_broken_duration",
            &mut self.barrel_broken_duration,
            0.0,
            defaults.barrel_broken_duration,
        );
        fix(
            "baddie_death_duration",
            &mut self.baddie_death_duration,
            0.0,
            defaults.baddie_death_duration,
        );
        fix("power_up_duration", &mut self.power_up_duration, 0.0, defaults.power_up_duration);

        self.baddie_hop_chance = self.baddie_hop_chance.clamp(0.0, 1.0);
        if self.max_level == 0 {
            log::warn!("tuning.max_level = 0, using {}", defaults.max_level);
            self.max_level = defaults.max_level;
        }
        if self.extra_life_step == 0 {
            log::warn!("tuning.extra_life_step = 0, using {}", defaults.extra_life_step);
            self.extra_life_step = defaults.extra_life_step;
        }
    }

    /// Seconds between barrel spawns at a level (faster later, floor-clamped)
    pub fn barrel_interval(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.barrel_spawn_interval - self.barrel_spawn_interval_step * steps)
            .max(self.barrel_spawn_interval_min)
    }

    /// Initial barrel roll speed at a level
    pub fn barrel_roll_speed(&self, level: u32) -> f32 {
        self.barrel_speed + self.barrel_speed_step * level.saturating_sub(1) as f32
    }

    /// Seconds between baddie spawns at a level
    pub fn baddie_interval(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.baddie_spawn_interval - self.baddie_spawn_interval_step * steps)
            .max(self.baddie_spawn_interval_min)
    }

    /// Base baddie walk speed at a level (before the kind multiplier)
    pub fn baddie_walk_speed(&self, level: u32) -> f32 {
        self.baddie_speed + self.baddie_speed_step * level.saturating_sub(1) as f32
    }

    /// Score at which the first extra life is granted
    pub fn first_extra_life(&self) -> u64 {
        self.extra_life_step
    }
}

//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override any subset.
//! Coordinates are scene points, y-up, origin at the bottom-left corner.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, read_json};

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub play_width: f32,
    pub play_height: f32,

    // === Player ===
    /// Player y relative to the vertical center (negative = below)
    pub player_y_offset: f32,
    pub player_scale: f32,
    /// Horizontal tween duration for a tap-to-move (seconds)
    pub player_move_duration: f32,
    /// Fly animation time per frame (seconds)
    pub player_frame_time: f32,

    // === Spawn timers (seconds) ===
    pub alien_spawn_interval: f32,
    pub asteroid_spawn_interval: f32,
    pub banana_spawn_interval: f32,
    /// Use the level-derived hazard interval instead of the fixed one
    pub scale_spawn_intervals: bool,
    pub hazard_spawn_base: f32,
    pub hazard_spawn_rate: f32,
    pub hazard_spawn_floor: f32,

    // === Fall durations (seconds) ===
    pub hazard_fall_base: f32,
    pub hazard_fall_rate: f32,
    pub hazard_fall_floor: f32,
    pub banana_fall_duration: f32,

    // === Scale ===
    pub hazard_scale_base: f32,
    pub hazard_scale_step: f32,
    pub hazard_scale_max: f32,
    pub banana_scale: f32,

    // === Unscaled sprite sizes ===
    pub player_size: Vec2,
    pub alien_size: Vec2,
    pub asteroid_size: Vec2,
    pub banana_size: Vec2,

    // === Progression ===
    pub points_per_banana: u32,
    pub points_per_level: u32,
    pub max_lives: u8,

    // === Presentation ===
    pub level_up_banner_secs: f32,
    pub particle_lifetime: f32,

    /// Spawns are skipped while this many entities are alive
    pub max_live_entities: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: 750.0,
            play_height: 1334.0,

            player_y_offset: -200.0,
            player_scale: 0.5,
            player_move_duration: 0.1,
            player_frame_time: 0.1,

            alien_spawn_interval: 2.0,
            asteroid_spawn_interval: 2.0,
            banana_spawn_interval: 3.0,
            scale_spawn_intervals: false,
            hazard_spawn_base: 2.0,
            hazard_spawn_rate: 0.2,
            hazard_spawn_floor: 0.5,

            hazard_fall_base: 5.0,
            hazard_fall_rate: 0.3,
            hazard_fall_floor: 2.0,
            banana_fall_duration: 4.0,

            hazard_scale_base: 0.5,
            hazard_scale_step: 0.1,
            hazard_scale_max: 1.0,
            banana_scale: 0.5,

            player_size: Vec2::new(160.0, 160.0),
            alien_size: Vec2::new(120.0, 100.0),
            asteroid_size: Vec2::new(110.0, 110.0),
            banana_size: Vec2::new(90.0, 90.0),

            points_per_banana: 10,
            points_per_level: 60,
            max_lives: 3,

            level_up_banner_secs: 1.0,
            particle_lifetime: 0.5,

            max_live_entities: 256,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let tuning: Self = read_json(path)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive and finite",
                });
            }
        }

        for (field, value) in [
            ("player_move_duration", self.player_move_duration),
            ("player_frame_time", self.player_frame_time),
            ("alien_spawn_interval", self.alien_spawn_interval),
            ("asteroid_spawn_interval", self.asteroid_spawn_interval),
            ("banana_spawn_interval", self.banana_spawn_interval),
            ("hazard_spawn_floor", self.hazard_spawn_floor),
            ("hazard_fall_floor", self.hazard_fall_floor),
            ("banana_fall_duration", self.banana_fall_duration),
            ("level_up_banner_secs", self.level_up_banner_secs),
            ("particle_lifetime", self.particle_lifetime),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be non-negative and finite",
                });
            }
        }

        if self.max_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "max_lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning: {}", err);
                Self::default()
            }
        }
    }

    /// Center of the play area
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.play_width / 2.0, self.play_height / 2.0)
    }

    /// Fixed player altitude
    pub fn player_y(&self) -> f32 {
        self.play_height / 2.0 + self.player_y_offset
    }
}

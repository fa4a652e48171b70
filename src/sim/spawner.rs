//! Periodic hazard and pickup spawning
//!
//! One repeating timer per entity kind. Each fires immediately on the first
//! tick, then every interval. Hazard timers may follow the level-derived
//! interval when `Tuning::scale_spawn_intervals` is set.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Difficulty, Entity, EntityKind};
use super::timer::RepeatTimer;
use crate::consts::ALIEN_TEXTURES;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Spawner {
    alien: RepeatTimer,
    asteroid: RepeatTimer,
    banana: RepeatTimer,
    active: bool,
}

impl Spawner {
    pub fn new(tuning: &Tuning, difficulty: &Difficulty) -> Self {
        let mut spawner = Self {
            alien: RepeatTimer::new(tuning.alien_spawn_interval),
            asteroid: RepeatTimer::new(tuning.asteroid_spawn_interval),
            banana: RepeatTimer::new(tuning.banana_spawn_interval),
            active: true,
        };
        spawner.apply_difficulty(difficulty, tuning);
        spawner
    }

    /// Current period for a kind (seconds)
    pub fn interval(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Alien => self.alien.interval(),
            EntityKind::Asteroid => self.asteroid.interval(),
            EntityKind::Banana => self.banana.interval(),
        }
    }

    pub fn apply_difficulty(&mut self, difficulty: &Difficulty, tuning: &Tuning) {
        if tuning.scale_spawn_intervals {
            self.alien.set_interval(difficulty.hazard_spawn_interval);
            self.asteroid.set_interval(difficulty.hazard_spawn_interval);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancel all pending spawns for this run
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance timers; returns the kinds due this tick in a stable order
    pub fn due(&mut self, dt: f32) -> Vec<EntityKind> {
        if !self.active {
            return Vec::new();
        }
        let mut kinds = Vec::new();
        for (kind, timer) in [
            (EntityKind::Alien, &mut self.alien),
            (EntityKind::Asteroid, &mut self.asteroid),
            (EntityKind::Banana, &mut self.banana),
        ] {
            for _ in 0..timer.advance(dt) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

/// Scale of a newly spawned entity
pub fn spawn_scale(kind: EntityKind, difficulty: &Difficulty, tuning: &Tuning) -> f32 {
    if kind.is_hazard() {
        difficulty.hazard_scale
    } else {
        tuning.banana_scale
    }
}

/// Seconds to fall from the top edge to the exit point
pub fn fall_duration(kind: EntityKind, difficulty: &Difficulty, tuning: &Tuning) -> f32 {
    if kind.is_hazard() {
        difficulty.hazard_fall_duration
    } else {
        tuning.banana_fall_duration
    }
}

/// Build an entity at a uniformly random x along the top edge
pub fn spawn_entity(
    kind: EntityKind,
    difficulty: &Difficulty,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Entity {
    let x = rng.random_range(0.0..=tuning.play_width);
    let entity = Entity::new(
        kind,
        Vec2::new(x, tuning.play_height),
        spawn_scale(kind, difficulty, tuning),
        fall_duration(kind, difficulty, tuning),
        tuning,
    );
    match kind {
        EntityKind::Alien => {
            let texture = ALIEN_TEXTURES[rng.random_range(0..ALIEN_TEXTURES.len())];
            entity.with_texture(texture)
        }
        _ => entity,
    }
}

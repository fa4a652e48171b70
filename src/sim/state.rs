//! Game state and core simulation types
//!
//! Progression, lives and difficulty are small `Copy` values with pure
//! transition methods; `GameState` is the single owned instance that the
//! tick and the scene mutate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Body, Category, Rect};
use super::registry::{EntityId, EntityRegistry};
use super::spawner::{Spawner, spawn_entity};
use super::timer::{FrameCycle, Tween};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Falling entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Hazard dropping from the top edge
    Alien,
    /// Falling hazard
    Asteroid,
    /// Pickup: score and a life back
    Banana,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Alien, EntityKind::Asteroid, EntityKind::Banana];

    pub fn category(self) -> Category {
        match self {
            EntityKind::Alien => Category::ALIEN,
            EntityKind::Asteroid => Category::ASTEROID,
            EntityKind::Banana => Category::BANANA,
        }
    }

    pub fn body(self) -> Body {
        Body {
            category: self.category(),
            contact_mask: Category::PLAYER,
        }
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, EntityKind::Alien | EntityKind::Asteroid)
    }

    /// Unscaled sprite size
    pub fn base_size(self, tuning: &Tuning) -> Vec2 {
        match self {
            EntityKind::Alien => tuning.alien_size,
            EntityKind::Asteroid => tuning.asteroid_size,
            EntityKind::Banana => tuning.banana_size,
        }
    }

    pub fn default_texture(self) -> &'static str {
        match self {
            EntityKind::Alien => ALIEN_TEXTURES[0],
            EntityKind::Asteroid => ASTEROID_TEXTURE,
            EntityKind::Banana => BANANA_TEXTURE,
        }
    }
}

/// A hazard or pickup descending through the play area
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub scale: f32,
    /// Scaled bounding size
    pub size: Vec2,
    pub texture: &'static str,
    /// Vertical descent from spawn height to just below the bottom edge
    pub fall: Tween,
    /// Overlapping the player as of the last contact pass
    pub in_contact: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, scale: f32, fall_duration: f32, tuning: &Tuning) -> Self {
        let size = kind.base_size(tuning) * scale;
        Self {
            kind,
            pos,
            scale,
            size,
            texture: kind.default_texture(),
            fall: Tween::new(pos.y, -size.y, fall_duration),
            in_contact: false,
        }
    }

    pub fn with_texture(mut self, texture: &'static str) -> Self {
        self.texture = texture;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Move along the descent; returns true once the exit point is reached
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos.y = self.fall.advance(dt);
        self.fall.is_finished()
    }
}

/// The player-controlled space monkey
#[derive(Debug, Clone)]
pub struct Player {
    /// Only x ever changes
    pub pos: Vec2,
    pub size: Vec2,
    move_tween: Option<Tween>,
    move_duration: f32,
    /// Fly cycle, independent of movement
    pub animation: FrameCycle,
}

impl Player {
    pub const BODY: Body = Body {
        category: Category::PLAYER,
        contact_mask: Category::ALIEN
            .union(Category::ASTEROID)
            .union(Category::BANANA),
    };

    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.play_width / 2.0, tuning.player_y()),
            size: tuning.player_size * tuning.player_scale,
            move_tween: None,
            move_duration: tuning.player_move_duration,
            animation: FrameCycle::new(PLAYER_FRAMES.len(), tuning.player_frame_time),
        }
    }

    /// Start a horizontal move toward `x`, clamped to `[0, play_width]`
    pub fn move_to(&mut self, x: f32, play_width: f32) {
        let target = x.clamp(0.0, play_width);
        self.move_tween = Some(Tween::new(self.pos.x, target, self.move_duration));
    }

    /// Where the player is heading (current x when idle)
    pub fn target_x(&self) -> f32 {
        self.move_tween.as_ref().map_or(self.pos.x, |tween| tween.to)
    }

    pub fn is_moving(&self) -> bool {
        self.move_tween.is_some()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(tween) = &mut self.move_tween {
            self.pos.x = tween.advance(dt);
            if tween.is_finished() {
                self.move_tween = None;
            }
        }
        self.animation.advance(dt);
    }

    /// Halt movement and animation (game over)
    pub fn freeze(&mut self) {
        self.move_tween = None;
        self.animation.stop();
    }

    pub fn texture(&self) -> &'static str {
        PLAYER_FRAMES[self.animation.frame()]
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }
}

/// Score and the level derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    score: u32,
    level: u32,
    points_per_level: u32,
}

impl Progression {
    pub fn new(points_per_level: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            points_per_level: points_per_level.max(1),
        }
    }

    pub fn level_for_score(score: u32, points_per_level: u32) -> u32 {
        score / points_per_level.max(1) + 1
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Add points and recompute the level. Returns the new level when it went up.
    pub fn add_score(self, points: u32) -> (Self, Option<u32>) {
        let score = self.score.saturating_add(points);
        let level = Self::level_for_score(score, self.points_per_level);
        let next = Self {
            score,
            level,
            ..self
        };
        let leveled_up = (level > self.level).then_some(level);
        (next, leveled_up)
    }
}

/// Remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lives {
    Alive(u8),
    Dead,
}

impl Lives {
    pub fn full(max: u8) -> Self {
        Lives::Alive(max.max(1))
    }

    pub fn count(self) -> u8 {
        match self {
            Lives::Alive(n) => n,
            Lives::Dead => 0,
        }
    }

    pub fn is_dead(self) -> bool {
        self == Lives::Dead
    }

    pub fn lose(self) -> Self {
        match self {
            Lives::Alive(n) if n > 1 => Lives::Alive(n - 1),
            _ => Lives::Dead,
        }
    }

    /// Dead stays dead; only a restart revives
    pub fn gain(self, max: u8) -> Self {
        match self {
            Lives::Alive(n) if n < max => Lives::Alive(n + 1),
            other => other,
        }
    }
}

/// Level-derived difficulty, recomputed on every level change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    pub hazard_spawn_interval: f32,
    pub hazard_fall_duration: f32,
    pub hazard_scale: f32,
}

impl Difficulty {
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let level_f = level as f32;
        Self {
            level,
            hazard_spawn_interval: (tuning.hazard_spawn_base - level_f * tuning.hazard_spawn_rate)
                .max(tuning.hazard_spawn_floor),
            hazard_fall_duration: (tuning.hazard_fall_base - level_f * tuning.hazard_fall_rate)
                .max(tuning.hazard_fall_floor),
            hazard_scale: (tuning.hazard_scale_base + level_f * tuning.hazard_scale_step)
                .min(tuning.hazard_scale_max),
        }
    }
}

/// Something the outside world should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PickupCollected { pos: Vec2 },
    LevelUp { level: u32 },
    LifeLost { remaining: u8 },
    LifeGained { lives: u8 },
    GameOver { final_score: u32, level: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Simulated seconds since (re)start
    pub time: f32,
    pub time_ticks: u64,
    pub player: Player,
    pub entities: EntityRegistry,
    pub spawner: Spawner,
    pub progression: Progression,
    pub difficulty: Difficulty,
    pub lives: Lives,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let progression = Progression::new(tuning.points_per_level);
        let difficulty = Difficulty::for_level(progression.level(), &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            time_ticks: 0,
            player: Player::new(&tuning),
            entities: EntityRegistry::new(),
            spawner: Spawner::new(&tuning, &difficulty),
            progression,
            difficulty,
            lives: Lives::full(tuning.max_lives),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.lives.is_dead() {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        }
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points; a level change recalculates difficulty
    pub fn add_score(&mut self, points: u32) {
        let (progression, leveled_up) = self.progression.add_score(points);
        self.progression = progression;
        if let Some(level) = leveled_up {
            self.on_level_up(level);
        }
    }

    fn on_level_up(&mut self, level: u32) {
        self.difficulty = Difficulty::for_level(level, &self.tuning);
        self.spawner.apply_difficulty(&self.difficulty, &self.tuning);
        log::info!(
            "Level up to {} (hazard fall {:.1}s, scale {:.2})",
            level,
            self.difficulty.hazard_fall_duration,
            self.difficulty.hazard_scale
        );
        self.push_event(GameEvent::LevelUp { level });
    }

    /// Hazard hit. Losing the last life ends the run.
    pub fn lose_life(&mut self) {
        if self.lives.is_dead() {
            return;
        }
        self.lives = self.lives.lose();
        self.push_event(GameEvent::LifeLost {
            remaining: self.lives.count(),
        });

        if self.lives.is_dead() {
            self.spawner.stop();
            self.player.freeze();
            log::info!("Game over: score {} at level {}", self.score(), self.level());
            self.push_event(GameEvent::GameOver {
                final_score: self.score(),
                level: self.level(),
            });
        }
    }

    /// Banana recovery, capped at the maximum
    pub fn gain_life(&mut self) {
        let before = self.lives;
        self.lives = self.lives.gain(self.tuning.max_lives);
        if self.lives != before {
            self.push_event(GameEvent::LifeGained {
                lives: self.lives.count(),
            });
        }
    }

    /// Spawn one entity of `kind` along the top edge, unless the cap is reached
    pub fn spawn(&mut self, kind: EntityKind) -> Option<EntityId> {
        if self.entities.len() >= self.tuning.max_live_entities {
            log::warn!(
                "Entity cap ({}) reached, skipping {:?} spawn",
                self.tuning.max_live_entities,
                kind
            );
            return None;
        }
        let entity = spawn_entity(kind, &self.difficulty, &self.tuning, &mut self.rng);
        Some(self.entities.insert(entity))
    }

    /// Remove a banana from the world and apply its rewards.
    /// Does nothing if the id is no longer live.
    pub fn collect_pickup(&mut self, id: EntityId) {
        let Some(entity) = self.entities.remove(id) else {
            log::debug!("Pickup {:?} already gone", id);
            return;
        };
        self.push_event(GameEvent::PickupCollected { pos: entity.pos });
        self.add_score(self.tuning.points_per_banana);
        self.gain_life();
    }

    /// Reinitialize everything for a new run with a fresh seed.
    ///
    /// The entity registry is cleared in place so ids from the previous run
    /// never resolve in the new one.
    pub fn restart(&mut self) {
        use rand::RngCore;
        let seed = self.rng.next_u64();
        let tuning = std::mem::take(&mut self.tuning);
        let mut entities = std::mem::take(&mut self.entities);
        entities.clear();
        *self = Self {
            entities,
            ..Self::new(seed, tuning)
        };
        log::info!("Restarted with seed {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_six_bananas_reach_level_two_once() {
        let mut state = GameState::new(1, Tuning::default());
        for _ in 0..6 {
            state.add_score(10);
        }
        assert_eq!(state.score(), 60);
        assert_eq!(state.level(), 2);
        let level_ups: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(level_ups, vec![GameEvent::LevelUp { level: 2 }]);
        assert_eq!(state.difficulty, Difficulty::for_level(2, &state.tuning));
    }

    #[test]
    fn test_big_jump_fires_single_level_up() {
        let (progression, leveled) = Progression::new(60).add_score(130);
        assert_eq!(progression.level(), 3);
        assert_eq!(leveled, Some(3));
    }

    #[test]
    fn test_three_hazards_end_the_run() {
        let mut state = GameState::new(1, Tuning::default());
        state.lose_life();
        state.lose_life();
        assert_eq!(state.phase(), GamePhase::Playing);
        state.lose_life();
        assert_eq!(state.lives.count(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.spawner.is_active());
        assert!(!state.player.animation.is_running());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 0,
            level: 1
        }));

        // Further hits and pickups are ignored
        state.lose_life();
        state.gain_life();
        assert!(state.drain_events().is_empty());
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_gain_life_capped() {
        let mut state = GameState::new(1, Tuning::default());
        state.gain_life();
        assert_eq!(state.lives, Lives::Alive(3));
        assert!(state.drain_events().is_empty());

        state.lose_life();
        state.gain_life();
        assert_eq!(state.lives, Lives::Alive(3));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(7, Tuning::default());
        let id = state.entities.insert(Entity::new(
            EntityKind::Alien,
            Vec2::new(10.0, 500.0),
            0.6,
            4.7,
            &state.tuning,
        ));
        state.add_score(200);
        state.lose_life();
        state.lose_life();
        state.lose_life();
        assert_eq!(state.phase(), GamePhase::GameOver);

        state.restart();
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lives, Lives::Alive(3));
        assert!(state.entities.is_empty());
        assert!(!state.entities.contains(id));
        assert!(state.spawner.is_active());
        assert!(state.player.animation.is_running());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_ne!(state.seed, 7);
    }

    #[test]
    fn test_ids_from_previous_run_stay_dead() {
        let mut state = GameState::new(99, Tuning::default());
        let old: Vec<EntityId> = [EntityKind::Alien, EntityKind::Asteroid, EntityKind::Banana]
            .into_iter()
            .filter_map(|kind| state.spawn(kind))
            .collect();
        assert_eq!(old.len(), 3);

        state.restart();
        for kind in [EntityKind::Alien, EntityKind::Asteroid, EntityKind::Banana] {
            state.spawn(kind);
        }
        assert_eq!(state.entities.len(), 3);

        for id in old {
            assert!(state.entities.get(id).is_none());
            assert!(state.entities.remove(id).is_none());
        }
        assert_eq!(state.entities.len(), 3);
    }

    #[test]
    fn test_duplicate_pickup_applies_once() {
        let mut state = GameState::new(5, Tuning::default());
        state.lose_life();
        let id = state.entities.insert(Entity::new(
            EntityKind::Banana,
            Vec2::new(100.0, 500.0),
            0.5,
            4.0,
            &state.tuning,
        ));
        state.drain_events();

        state.collect_pickup(id);
        state.collect_pickup(id);

        assert_eq!(state.score(), 10);
        assert_eq!(state.lives, Lives::Alive(3));
        let events = state.drain_events();
        let pickups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PickupCollected { .. }))
            .count();
        let gains = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeGained { .. }))
            .count();
        assert_eq!(pickups, 1);
        assert_eq!(gains, 1);
    }

    #[test]
    fn test_difficulty_defaults() {
        let tuning = Tuning::default();
        let d1 = Difficulty::for_level(1, &tuning);
        assert!((d1.hazard_fall_duration - 4.7).abs() < 1e-5);
        assert!((d1.hazard_scale - 0.6).abs() < 1e-5);
        let d20 = Difficulty::for_level(20, &tuning);
        assert_eq!(d20.hazard_fall_duration, 2.0);
        assert_eq!(d20.hazard_spawn_interval, 0.5);
        assert_eq!(d20.hazard_scale, 1.0);
    }

    #[test]
    fn test_player_move_clamps_and_keeps_y() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let y = player.pos.y;
        player.move_to(-50.0, tuning.play_width);
        assert_eq!(player.target_x(), 0.0);
        player.move_to(10_000.0, tuning.play_width);
        assert_eq!(player.target_x(), tuning.play_width);
        for _ in 0..10 {
            player.advance(0.0125);
        }
        assert!(!player.is_moving());
        assert_eq!(player.pos.x, tuning.play_width);
        assert_eq!(player.pos.y, y);
    }

    #[test]
    fn test_movement_does_not_reset_animation() {
        let tuning = Tuning {
            player_frame_time: 0.125,
            player_move_duration: 0.25,
            ..Default::default()
        };
        let mut player = Player::new(&tuning);
        player.advance(0.125);
        assert_eq!(player.texture(), PLAYER_FRAMES[1]);
        player.move_to(100.0, tuning.play_width);
        assert_eq!(player.texture(), PLAYER_FRAMES[1]);
        player.advance(0.125);
        assert_eq!(player.texture(), PLAYER_FRAMES[0]);
        assert!(player.is_moving());
    }

    proptest! {
        #[test]
        fn prop_level_tracks_score(increments in proptest::collection::vec(0u32..100, 1..50)) {
            let mut progression = Progression::new(60);
            for points in increments {
                let before = progression.level();
                let (next, leveled) = progression.add_score(points);
                progression = next;
                prop_assert_eq!(progression.level(), progression.score() / 60 + 1);
                prop_assert!(progression.level() >= before);
                prop_assert_eq!(leveled.is_some(), progression.level() > before);
            }
        }

        #[test]
        fn prop_lives_stay_in_bounds(ops in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut lives = Lives::full(3);
            for gain in ops {
                let was_dead = lives.is_dead();
                lives = if gain { lives.gain(3) } else { lives.lose() };
                prop_assert!(lives.count() <= 3);
                if was_dead {
                    prop_assert!(lives.is_dead());
                }
                prop_assert_eq!(lives.is_dead(), lives.count() == 0);
            }
        }

        #[test]
        fn prop_difficulty_monotone_and_floored(level in 1u32..200) {
            let tuning = Tuning::default();
            let here = Difficulty::for_level(level, &tuning);
            let next = Difficulty::for_level(level + 1, &tuning);
            prop_assert!(next.hazard_spawn_interval <= here.hazard_spawn_interval);
            prop_assert!(next.hazard_fall_duration <= here.hazard_fall_duration);
            prop_assert!(here.hazard_spawn_interval >= 0.5);
            prop_assert!(here.hazard_fall_duration >= 2.0);
            prop_assert!(here.hazard_scale <= 1.0);
        }
    }
}

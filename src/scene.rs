//! Scene orchestrator
//!
//! Owns the single `GameState`, runs it on a fixed timestep, routes taps,
//! and turns simulation events into HUD updates and effects.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::fx::EffectSink;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::Hud;

/// Decorative star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
}

/// Static scenery behind the play area
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub stars: Vec<Star>,
    pub moon_center: Vec2,
    pub moon_radius: f32,
}

impl Backdrop {
    pub fn generate(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed_57a2);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=tuning.play_width),
                    rng.random_range(0.0..=tuning.play_height),
                ),
                radius: rng.random_range(1.0..=3.0),
            })
            .collect();
        Self {
            stars,
            moon_center: Vec2::new(
                tuning.play_width - MOON_RADIUS,
                tuning.play_height - MOON_RADIUS,
            ),
            moon_radius: MOON_RADIUS,
        }
    }
}

/// Snapshot of the current run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run: u32,
    pub seed: u64,
    pub score: u32,
    pub level: u32,
    pub lives: u8,
    pub game_over: bool,
    pub live_entities: usize,
    pub elapsed_secs: f32,
    pub best_score: Option<u32>,
}

pub struct Scene<S: EffectSink> {
    state: GameState,
    hud: Hud,
    backdrop: Backdrop,
    highscores: HighScores,
    audio: AudioManager,
    settings: Settings,
    sink: S,
    accumulator: f32,
    input: TickInput,
    run: u32,
}

impl<S: EffectSink> Scene<S> {
    /// Build every component and start the first run
    pub fn new(tuning: Tuning, settings: Settings, sink: S, seed: u64) -> Self {
        log::info!("Space Monkey starting with seed {}", seed);
        Self {
            hud: Hud::new(&tuning),
            backdrop: Backdrop::generate(seed, &tuning),
            state: GameState::new(seed, tuning),
            highscores: HighScores::new(),
            audio: AudioManager::from_settings(&settings),
            settings,
            sink,
            accumulator: 0.0,
            input: TickInput::default(),
            run: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    /// Route a tap in scene coordinates
    pub fn tap(&mut self, point: Vec2) {
        match self.state.phase() {
            GamePhase::GameOver => {
                if self.hud.hits_restart(point) {
                    self.restart();
                }
            }
            GamePhase::Playing => self.input.move_to = Some(point.x),
        }
    }

    /// Tear down the run and start a fresh one
    pub fn restart(&mut self) {
        self.state.restart();
        self.hud = Hud::new(&self.state.tuning);
        self.backdrop = Backdrop::generate(self.state.seed, &self.state.tuning);
        self.accumulator = 0.0;
        self.input.move_to = None;
        self.run += 1;
        log::info!("Run {} started", self.run);
    }

    /// Advance by one rendered frame of `frame_dt` seconds
    pub fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.move_to = None;
        }

        for event in self.state.drain_events() {
            self.handle_event(event);
        }
        self.hud.advance(dt);
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::PickupCollected { pos } => {
                self.hud.set_score(self.state.score());
                self.audio.play(SoundEffect::PickupCollect, &mut self.sink);
                if self.settings.effective_particles() {
                    self.sink.emit_particles(
                        COLLECT_PARTICLES,
                        pos,
                        self.state.tuning.particle_lifetime,
                    );
                }
            }
            GameEvent::LevelUp { level } => {
                self.hud.set_level(level);
                self.hud
                    .show_banner("Level Up!", self.state.tuning.level_up_banner_secs);
            }
            GameEvent::LifeLost { remaining } => self.hud.set_hearts(remaining),
            GameEvent::LifeGained { lives } => self.hud.set_hearts(lives),
            GameEvent::GameOver { final_score, level } => {
                if let Some(rank) = self.highscores.add_score(final_score, level, self.run) {
                    log::info!("Run {} placed #{} on the leaderboard", self.run, rank);
                }
                let best = self.highscores.top_score().unwrap_or(final_score);
                self.hud.set_hearts(0);
                self.hud.show_game_over(final_score, best);
            }
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run: self.run,
            seed: self.state.seed,
            score: self.state.score(),
            level: self.state.level(),
            lives: self.state.lives.count(),
            game_over: self.state.phase() == GamePhase::GameOver,
            live_entities: self.state.entities.len(),
            elapsed_secs: self.state.time,
            best_score: self.highscores.top_score(),
        }
    }
}

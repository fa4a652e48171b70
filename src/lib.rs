//! Space Monkey - a single-screen dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, contacts, progression)
//! - `scene`: Orchestrator that drives the simulation and routes input
//! - `ui`: HUD overlay model (labels, hearts, banners, game-over panel)
//! - `audio` / `fx`: Fire-and-forget sound and particle collaborators
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod fx;
pub mod highscores;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use scene::Scene;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the scene loop (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player fly cycle
    pub const PLAYER_FRAMES: [&str; 2] = ["spacemonkey_fly01", "spacemonkey_fly02"];
    /// Alien textures, one picked at random per spawn
    pub const ALIEN_TEXTURES: [&str; 2] = ["alien_top_01", "alien_top_02"];
    pub const ASTEROID_TEXTURE: &str = "object_asteroid_01";
    pub const BANANA_TEXTURE: &str = "powerup_banana";

    /// Collection side effects
    pub const COLLECT_SOUND: &str = "collect.mp3";
    pub const COLLECT_PARTICLES: &str = "CollectParticles";

    /// Backdrop
    pub const STAR_COUNT: usize = 100;
    pub const MOON_RADIUS: f32 = 150.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by arena slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Category, EffectSet, Rect, resolve};
pub use registry::{EntityId, EntityRegistry};
pub use spawner::Spawner;
pub use state::{
    Difficulty, Entity, EntityKind, GameEvent, GamePhase, GameState, Lives, Player, Progression,
};
pub use tick::{TickInput, tick};
pub use timer::{FrameCycle, RepeatTimer, Tween};

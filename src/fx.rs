//! Fire-and-forget effect collaborators
//!
//! The simulation never waits on these; whatever plays sounds or particle
//! bursts implements `EffectSink`.

use glam::Vec2;

/// Sound and particle playback backend
pub trait EffectSink {
    /// Play a sound asset once at the given volume (0.0 - 1.0)
    fn play_sound(&mut self, asset: &str, volume: f32);
    /// Show a particle emitter at `pos` for `lifetime` seconds
    fn emit_particles(&mut self, emitter: &str, pos: Vec2, lifetime: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn play_sound(&mut self, asset: &str, volume: f32) {
        log::debug!("sound {} @ {:.2}", asset, volume);
    }

    fn emit_particles(&mut self, emitter: &str, pos: Vec2, lifetime: f32) {
        log::debug!("particles {} at ({:.0}, {:.0}) for {}s", emitter, pos.x, pos.y, lifetime);
    }
}

/// Backend that remembers every request
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sounds: Vec<(String, f32)>,
    pub particles: Vec<(String, Vec2, f32)>,
}

impl EffectSink for RecordingSink {
    fn play_sound(&mut self, asset: &str, volume: f32) {
        self.sounds.push((asset.to_string(), volume));
    }

    fn emit_particles(&mut self, emitter: &str, pos: Vec2, lifetime: f32) {
        self.particles.push((emitter.to_string(), pos, lifetime));
    }
}

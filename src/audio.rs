//! Sound effects and volume mixing
//!
//! Playback itself belongs to an `EffectSink`; this module decides what to
//! play and how loud.

use crate::consts::COLLECT_SOUND;
use crate::fx::EffectSink;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Banana collected
    PickupCollect,
}

impl SoundEffect {
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::PickupCollect => COLLECT_SOUND,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect (silent effects are never sent)
    pub fn play(&self, effect: SoundEffect, sink: &mut dyn EffectSink) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play_sound(effect.asset(), vol);
    }
}

//! HUD overlay model
//!
//! Labels, hearts, transient banners and the game-over panel, expressed as
//! plain data a renderer can draw. The restart button's hit area lives here
//! so input routing can test taps against it.

use glam::Vec2;

use crate::sim::Lives;
use crate::sim::collision::Rect;
use crate::tuning::Tuning;

/// Size of the restart button's tap target
const RESTART_BUTTON_SIZE: Vec2 = Vec2::new(220.0, 60.0);
/// Restart button sits this far below the center
const RESTART_BUTTON_DROP: f32 = 100.0;

/// A transient centered message
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub remaining: f32,
}

/// Shown once the run has ended
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverPanel {
    pub final_score: u32,
    pub best_score: u32,
    pub restart_button: Rect,
}

impl GameOverPanel {
    pub fn title(&self) -> &'static str {
        "Game Over"
    }

    pub fn final_score_text(&self) -> String {
        format!("Final Score: {}", self.final_score)
    }

    pub fn restart_label(&self) -> &'static str {
        "Restart"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    score: u32,
    level: u32,
    hearts: u8,
    banners: Vec<Banner>,
    game_over: Option<GameOverPanel>,
    center: Vec2,
}

impl Hud {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            hearts: Lives::full(tuning.max_lives).count(),
            banners: Vec::new(),
            game_over: None,
            center: tuning.center(),
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// Rebuild the heart row
    pub fn set_hearts(&mut self, hearts: u8) {
        self.hearts = hearts;
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    pub fn show_banner(&mut self, text: impl Into<String>, duration: f32) {
        self.banners.push(Banner {
            text: text.into(),
            remaining: duration,
        });
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Age banners by wall-clock frame time and drop the expired ones
    pub fn advance(&mut self, dt: f32) {
        for banner in &mut self.banners {
            banner.remaining -= dt;
        }
        self.banners.retain(|b| b.remaining > 0.0);
    }

    pub fn show_game_over(&mut self, final_score: u32, best_score: u32) {
        let button_center = self.center - Vec2::new(0.0, RESTART_BUTTON_DROP);
        self.game_over = Some(GameOverPanel {
            final_score,
            best_score,
            restart_button: Rect::from_center_size(button_center, RESTART_BUTTON_SIZE),
        });
    }

    pub fn game_over(&self) -> Option<&GameOverPanel> {
        self.game_over.as_ref()
    }

    /// True when `point` lands on the restart button (only exists after game over)
    pub fn hits_restart(&self, point: Vec2) -> bool {
        self.game_over
            .as_ref()
            .is_some_and(|panel| panel.restart_button.contains(point))
    }
}

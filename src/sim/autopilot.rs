//! Idle/demo mode controller
//!
//! Dodges the lowest hazard heading into the player's column, otherwise
//! chases the lowest banana that can still be caught.

use std::cmp::Ordering;

use super::state::{Entity, GameState};

/// How far above the player a hazard counts as a threat
const DANGER_HEIGHT: f32 = 260.0;
/// Extra horizontal clearance when sidestepping
const DODGE_MARGIN: f32 = 12.0;

fn lowest<'a>(entities: impl Iterator<Item = &'a Entity>) -> Option<&'a Entity> {
    entities.min_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
}

/// Pick an x to move toward, or None to stay put
pub fn choose_target(state: &GameState) -> Option<f32> {
    let player = &state.player;
    let width = state.tuning.play_width;
    let px = player.target_x();
    let bottom = player.pos.y - player.size.y / 2.0;

    let threat = lowest(state.entities.iter().map(|(_, e)| e).filter(|e| {
        let clearance = (e.size.x + player.size.x) / 2.0 + DODGE_MARGIN;
        e.kind.is_hazard()
            && e.pos.y + e.size.y / 2.0 > bottom
            && e.pos.y - player.pos.y < DANGER_HEIGHT
            && (e.pos.x - px).abs() < clearance
    }));

    if let Some(hazard) = threat {
        let clearance = (hazard.size.x + player.size.x) / 2.0 + DODGE_MARGIN;
        let left = hazard.pos.x - clearance;
        let right = hazard.pos.x + clearance;
        let target = if px <= hazard.pos.x {
            if left >= 0.0 { left } else { right }
        } else if right <= width {
            right
        } else {
            left
        };
        return Some(target.clamp(0.0, width));
    }

    lowest(
        state
            .entities
            .iter()
            .map(|(_, e)| e)
            .filter(|e| !e.kind.is_hazard() && e.pos.y >= player.pos.y),
    )
    .map(|banana| banana.pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with(kind: EntityKind, offset: Vec2) -> GameState {
        let mut state = GameState::new(3, Tuning::default());
        let pos = state.player.pos + offset;
        let entity = Entity::new(kind, pos, 0.6, 5.0, &state.tuning);
        state.entities.insert(entity);
        state
    }

    #[test]
    fn test_idle_without_entities() {
        let state = GameState::new(3, Tuning::default());
        assert_eq!(choose_target(&state), None);
    }

    #[test]
    fn test_dodges_hazard_overhead() {
        let state = state_with(EntityKind::Alien, Vec2::new(10.0, 120.0));
        let target = choose_target(&state).expect("should dodge");
        let hazard_x = state.player.pos.x + 10.0;
        // Player was left of the hazard, so it steps further left
        assert!(target < hazard_x);
        let hazard_half = state.tuning.alien_size.x * 0.6 / 2.0;
        assert!(hazard_x - target >= hazard_half + state.player.size.x / 2.0);
    }

    #[test]
    fn test_ignores_distant_hazard() {
        let state = state_with(EntityKind::Asteroid, Vec2::new(0.0, 800.0));
        assert_eq!(choose_target(&state), None);
    }

    #[test]
    fn test_chases_banana() {
        let state = state_with(EntityKind::Banana, Vec2::new(-200.0, 400.0));
        assert_eq!(choose_target(&state), Some(state.player.pos.x - 200.0));
    }
}

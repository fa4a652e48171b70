//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot;
use super::collision::{EffectSet, resolve};
use super::registry::EntityId;
use super::state::{GamePhase, GameState, Player};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click x-coordinate to move toward
    pub move_to: Option<f32>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the run has ended
    if state.phase() == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.time += dt;

    let target = if input.idle_mode {
        autopilot::choose_target(state).or(input.move_to)
    } else {
        input.move_to
    };
    if let Some(x) = target {
        if (x - state.player.target_x()).abs() > 0.5 {
            let width = state.tuning.play_width;
            state.player.move_to(x, width);
        }
    }
    state.player.advance(dt);

    spawn_due(state, dt);
    advance_entities(state, dt);

    let contacts = begin_contacts(state);
    apply_contacts(state, &contacts);
}

fn spawn_due(state: &mut GameState, dt: f32) {
    for kind in state.spawner.due(dt) {
        if let Some(id) = state.spawn(kind) {
            log::debug!("Spawned {:?} as {:?}", kind, id);
        }
    }
}

/// Move every entity along its descent and drop the ones that left the screen
fn advance_entities(state: &mut GameState, dt: f32) {
    let mut expired = Vec::new();
    for (id, entity) in state.entities.iter_mut() {
        if entity.advance(dt) {
            expired.push(id);
        }
    }
    for id in expired {
        if let Some(entity) = state.entities.remove(id) {
            log::debug!("{:?} {:?} left the play area", entity.kind, id);
        }
    }
}

/// Entities whose overlap with the player started this tick, in slot order
fn begin_contacts(state: &mut GameState) -> Vec<(EntityId, EffectSet)> {
    let player_rect = state.player.rect();
    let mut contacts = Vec::new();
    for (id, entity) in state.entities.iter_mut() {
        let body = entity.kind.body();
        let touching =
            Player::BODY.reports_contact_with(&body) && entity.rect().overlaps(&player_rect);
        if touching && !entity.in_contact {
            let effects = resolve(Player::BODY.category, body.category);
            if !effects.is_empty() {
                log::debug!("Contact with {:?} {:?}", entity.kind, id);
                contacts.push((id, effects));
            }
        }
        entity.in_contact = touching;
    }
    contacts
}

/// Apply every contact of the tick. Pickups go first so the outcome does not
/// depend on the order contacts were reported in.
fn apply_contacts(state: &mut GameState, contacts: &[(EntityId, EffectSet)]) {
    for (id, effects) in contacts {
        if effects.collect_pickup {
            state.collect_pickup(*id);
        }
    }
    for (_, effects) in contacts {
        if effects.lose_life {
            state.lose_life();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, EntityKind, GameEvent, Lives};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Tuning with spawning effectively disabled so tests place entities by hand
    fn quiet_tuning() -> Tuning {
        Tuning {
            alien_spawn_interval: 1.0e6,
            asteroid_spawn_interval: 1.0e6,
            banana_spawn_interval: 1.0e6,
            ..Default::default()
        }
    }

    /// State whose first-tick spawns have already happened and been cleared
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345, quiet_tuning());
        tick(&mut state, &TickInput::default(), 0.25);
        state.entities.clear();
        state.drain_events();
        state
    }

    /// Place an entity right on top of the player
    fn drop_on_player(state: &mut GameState, kind: EntityKind) -> EntityId {
        let pos = state.player.pos;
        let entity = Entity::new(kind, pos, 0.5, 1000.0, &state.tuning);
        state.entities.insert(entity)
    }

    #[test]
    fn test_repeated_pickup_contact_in_one_tick() {
        let mut state = quiet_state();
        let id = drop_on_player(&mut state, EntityKind::Banana);
        apply_contacts(&mut state, &[(id, EffectSet::COLLECT), (id, EffectSet::COLLECT)]);

        assert_eq!(state.score(), 10);
        assert!(state.entities.is_empty());
        let pickups = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PickupCollected { .. }))
            .count();
        assert_eq!(pickups, 1);
        assert_eq!(state.lives, Lives::Alive(3));
    }

    #[test]
    fn test_first_tick_spawns_one_of_each() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &TickInput::default(), 0.25);
        let mut kinds: Vec<EntityKind> = state.entities.iter().map(|(_, e)| e.kind).collect();
        kinds.sort_by_key(|k| *k as u8);
        assert_eq!(
            kinds,
            vec![EntityKind::Alien, EntityKind::Asteroid, EntityKind::Banana]
        );
    }

    #[test]
    fn test_entities_expire_at_bottom() {
        let mut state = quiet_state();
        let x = 10.0;
        let entity = Entity::new(
            EntityKind::Asteroid,
            Vec2::new(x, state.tuning.play_height),
            0.5,
            2.0,
            &state.tuning,
        );
        let id = state.entities.insert(entity);

        for _ in 0..7 {
            tick(&mut state, &TickInput::default(), 0.25);
        }
        let y = state.entities.get(id).map(|e| e.pos.y).expect("still falling");
        assert!(y < state.tuning.play_height && y > 0.0);

        tick(&mut state, &TickInput::default(), 0.25);
        assert!(!state.entities.contains(id));
        assert_eq!(state.lives, Lives::Alive(3));
    }

    #[test]
    fn test_hazard_contact_counts_once() {
        let mut state = quiet_state();
        drop_on_player(&mut state, EntityKind::Alien);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), 0.25);
        }
        assert_eq!(state.lives, Lives::Alive(2));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LifeLost { remaining: 2 }]
        );
    }

    #[test]
    fn test_banana_collected() {
        let mut state = quiet_state();
        state.lose_life();
        state.drain_events();

        let id = drop_on_player(&mut state, EntityKind::Banana);
        tick(&mut state, &TickInput::default(), 0.25);

        assert!(!state.entities.contains(id));
        assert_eq!(state.score(), 10);
        assert_eq!(state.lives, Lives::Alive(3));
        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::PickupCollected { .. }));
        assert_eq!(events[1], GameEvent::LifeGained { lives: 3 });
    }

    #[test]
    fn test_three_hazards_stop_the_world() {
        let mut state = quiet_state();
        for _ in 0..3 {
            drop_on_player(&mut state, EntityKind::Asteroid);
        }
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.spawner.is_active());

        // Frozen: no movement, no spawns, no time
        let before: Vec<f32> = state.entities.iter().map(|(_, e)| e.pos.y).collect();
        let ticks = state.time_ticks;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.25);
        }
        let after: Vec<f32> = state.entities.iter().map(|(_, e)| e.pos.y).collect();
        assert_eq!(before, after);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_simultaneous_hazard_and_banana_apply_both() {
        let mut state = quiet_state();
        state.lose_life();
        state.lose_life();
        assert_eq!(state.lives, Lives::Alive(1));
        state.drain_events();

        // Hazard occupies the lower slot, so it is reported first
        drop_on_player(&mut state, EntityKind::Alien);
        drop_on_player(&mut state, EntityKind::Banana);
        tick(&mut state, &TickInput::default(), 0.25);

        assert_eq!(state.lives, Lives::Alive(1));
        assert_eq!(state.score(), 10);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_move_input_moves_player_horizontally() {
        let mut state = quiet_state();
        let y = state.player.pos.y;
        let input = TickInput {
            move_to: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.25);
        assert_eq!(state.player.pos.x, 100.0);
        assert_eq!(state.player.pos.y, y);
    }

    #[test]
    fn test_entity_cap_limits_spawns() {
        let tuning = Tuning {
            max_live_entities: 2,
            ..Default::default()
        };
        let mut state = GameState::new(5, tuning);
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.entities.len(), 2);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state1, &input, crate::consts::SIM_DT);
            tick(&mut state2, &input, crate::consts::SIM_DT);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.entities.len(), state2.entities.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}

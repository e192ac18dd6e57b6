//! Direction input resolution
//!
//! A key press resolves every live object labelled with the pressed
//! direction. Planets are sliced and scored; a bomb ends the run.

use super::state::{Direction, GameEvent, GameOverCause, GameState, ObjectKind};

impl Direction {
    /// Map a raw key name to a direction (WASD or arrow keys).
    ///
    /// Unrecognized keys map to `None` and are ignored by callers.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowLeft" => return Some(Direction::Left),
            "ArrowRight" => return Some(Direction::Right),
            "ArrowUp" => return Some(Direction::Up),
            "ArrowDown" => return Some(Direction::Down),
            _ => {}
        }
        match key.to_lowercase().as_str() {
            "a" => Some(Direction::Left),
            "d" => Some(Direction::Right),
            "w" => Some(Direction::Up),
            "s" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Outcome of resolving one key press
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Planets sliced by this press, in object order
    pub sliced: Vec<u32>,
    /// Bomb that ended the run, if any
    pub bomb: Option<u32>,
}

impl Resolution {
    pub fn is_noop(&self) -> bool {
        self.sliced.is_empty() && self.bomb.is_none()
    }
}

/// Resolve a direction press against the live object set.
///
/// Matches are collected from a snapshot of the live set before anything
/// is mutated, then each match is applied independently. Outside of
/// `Playing` this is a no-op.
pub fn resolve_direction(state: &mut GameState, direction: Direction) -> Resolution {
    let mut resolution = Resolution::default();
    if !state.is_playing() {
        return resolution;
    }

    let matches: Vec<(usize, ObjectKind)> = state
        .objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| !obj.is_sliced() && obj.direction() == direction)
        .map(|(idx, obj)| (idx, obj.kind()))
        .collect();

    for (idx, kind) in matches {
        let id = state.objects[idx].id();
        match kind {
            ObjectKind::Bomb => {
                // Bomb stays unsliced; the run is over
                if resolution.bomb.is_none() {
                    resolution.bomb = Some(id);
                }
                state.trigger_game_over(GameOverCause::Bomb { id });
            }
            ObjectKind::Planet => {
                if state.objects[idx].slice() {
                    state.push_event(GameEvent::PlanetSliced { id });
                    state.award_slice();
                    resolution.sliced.push(id);
                    log::debug!("Sliced planet #{} ({})", id, direction.as_str());
                }
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, GamePhase};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, Arena::default());
        state.start();
        state.drain_events();
        state
    }

    fn place(state: &mut GameState, kind: ObjectKind, direction: Direction, pos: Vec2) -> u32 {
        state.insert_object(kind, direction, pos, 4.0)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("S"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("q"), None);
        assert_eq!(Direction::from_key("Enter"), None);
        assert_eq!(Direction::from_key(""), None);
    }

    #[test]
    fn test_slice_matching_planet() {
        let mut state = playing_state();
        let id = place(&mut state, ObjectKind::Planet, Direction::Left, Vec2::new(100.0, 100.0));
        let res = resolve_direction(&mut state, Direction::Left);
        assert_eq!(res.sliced, vec![id]);
        assert_eq!(res.bomb, None);
        assert_eq!(state.score, 10);
        let obj = state.object(id).unwrap();
        assert!(obj.is_sliced());
        assert!((obj.vel.x - 6.0).abs() < 1e-5);
        assert!(obj.rotation >= std::f32::consts::PI * 4.0 - 1e-4);
    }

    #[test]
    fn test_resolves_all_matches() {
        let mut state = playing_state();
        let a = place(&mut state, ObjectKind::Planet, Direction::Up, Vec2::new(100.0, 10.0));
        let b = place(&mut state, ObjectKind::Planet, Direction::Up, Vec2::new(300.0, 10.0));
        let c = place(&mut state, ObjectKind::Planet, Direction::Down, Vec2::new(300.0, 500.0));
        let res = resolve_direction(&mut state, Direction::Up);
        assert_eq!(res.sliced, vec![a, b]);
        assert_eq!(state.score, 20);
        assert!(!state.object(c).unwrap().is_sliced());
    }

    #[test]
    fn test_sliced_objects_ignore_input() {
        let mut state = playing_state();
        place(&mut state, ObjectKind::Planet, Direction::Right, Vec2::new(100.0, 10.0));
        resolve_direction(&mut state, Direction::Right);
        let res = resolve_direction(&mut state, Direction::Right);
        assert!(res.is_noop());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_bomb_ends_run_and_stays_unsliced() {
        let mut state = playing_state();
        let bomb = place(&mut state, ObjectKind::Bomb, Direction::Up, Vec2::new(100.0, 10.0));
        let res = resolve_direction(&mut state, Direction::Up);
        assert_eq!(res.bomb, Some(bomb));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert!(!state.object(bomb).unwrap().is_sliced());
        assert!(state.events().contains(&GameEvent::BombHit { id: bomb }));
    }

    #[test]
    fn test_bomb_among_planets_still_ends_run() {
        let mut state = playing_state();
        let p1 = place(&mut state, ObjectKind::Planet, Direction::Down, Vec2::new(100.0, 500.0));
        let bomb = place(&mut state, ObjectKind::Bomb, Direction::Down, Vec2::new(200.0, 500.0));
        let p2 = place(&mut state, ObjectKind::Planet, Direction::Down, Vec2::new(300.0, 500.0));
        let res = resolve_direction(&mut state, Direction::Down);
        assert_eq!(res.bomb, Some(bomb));
        assert_eq!(res.sliced, vec![p1, p2]);
        assert_eq!(state.score, 20);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_match_is_noop() {
        let mut state = playing_state();
        place(&mut state, ObjectKind::Planet, Direction::Left, Vec2::new(100.0, 100.0));
        let before = state.objects.clone();
        let res = resolve_direction(&mut state, Direction::Right);
        assert!(res.is_noop());
        assert_eq!(state.objects, before);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_ignored_outside_playing() {
        let mut state = GameState::new(3, Arena::default());
        place(&mut state, ObjectKind::Planet, Direction::Left, Vec2::new(100.0, 100.0));
        assert!(resolve_direction(&mut state, Direction::Left).is_noop());
        assert_eq!(state.score, 0);
    }
}

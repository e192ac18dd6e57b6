//! Idle/demo player
//!
//! Picks the visible planet closest to escaping whose direction is not
//! shared by a live bomb.

use super::state::{Arena, Direction, GameState, SimObject};
use crate::consts::CULL_MARGIN;

/// Distance an unsliced object still has to travel before it is culled
fn distance_to_exit(obj: &SimObject, arena: &Arena) -> f32 {
    match obj.direction() {
        Direction::Left => arena.width + CULL_MARGIN - obj.pos.x,
        Direction::Right => obj.pos.x + CULL_MARGIN,
        Direction::Up => arena.height + CULL_MARGIN - obj.pos.y,
        Direction::Down => obj.pos.y + CULL_MARGIN,
    }
}

fn is_visible(obj: &SimObject, arena: &Arena) -> bool {
    !arena.is_outside(obj.pos, 0.0)
}

/// Choose a direction to press this frame, if any is worth pressing
pub fn choose(state: &GameState) -> Option<Direction> {
    let arena = &state.arena;
    let live = || state.objects.iter().filter(|o| !o.is_sliced());

    let bomb_directions: Vec<Direction> = live()
        .filter(|o| o.is_bomb())
        .map(|o| o.direction())
        .collect();

    live()
        .filter(|o| !o.is_bomb() && is_visible(o, arena))
        .filter(|o| !bomb_directions.contains(&o.direction()))
        .min_by(|a, b| {
            distance_to_exit(a, arena)
                .partial_cmp(&distance_to_exit(b, arena))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|o| o.direction())
}

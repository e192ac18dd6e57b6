//! Per-frame simulation step
//!
//! Frame-driven: velocities are in units per frame. Queued input is always
//! resolved before physics and culling, so a planet sliced on the frame it
//! would have left the playfield is never counted as missed.

use super::autopilot;
use super::effects;
use super::input::resolve_direction;
use super::state::{Direction, GameState, ObjectKind};
use crate::consts::CULL_MARGIN;

/// Input gathered for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions pressed since the previous frame, in press order
    pub directions: Vec<Direction>,
    /// Idle/demo mode - autopilot presses a direction
    pub autopilot: bool,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub sliced: u32,
    pub missed: u32,
    pub culled: u32,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if !state.is_playing() {
        return outcome;
    }
    state.frame += 1;

    let mut directions = input.directions.clone();
    if input.autopilot {
        directions.extend(autopilot::choose(state));
    }
    for dir in directions {
        outcome.sliced += resolve_direction(state, dir).sliced.len() as u32;
    }
    if !state.is_playing() {
        return outcome;
    }

    for obj in state.objects.iter_mut() {
        obj.step();
    }

    // Cull in spawn order; only live planets cost a life
    let arena = state.arena;
    let mut missed = Vec::new();
    let before = state.objects.len();
    state.objects.retain(|obj| {
        let out = arena.is_outside(obj.pos, CULL_MARGIN);
        if out && !obj.is_sliced() && obj.kind() == ObjectKind::Planet {
            missed.push(obj.id());
        }
        !out
    });
    outcome.culled = (before - state.objects.len()) as u32;
    outcome.missed = missed.len() as u32;

    for id in missed {
        state.register_miss(id);
    }

    outcome
}

/// Advance decorative effects by one frame (runs in any phase)
pub fn step_effects(state: &mut GameState) {
    effects::step_fireworks(&mut state.fireworks);
}

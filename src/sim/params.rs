//! Level difficulty curve
//!
//! Pure mapping from level to speed, spawn cadence and bomb frequency.

use serde::{Deserialize, Serialize};

use crate::consts::BASE_SPEED;

/// Minimum spawn interval regardless of level
pub const MIN_SPAWN_INTERVAL_MS: u32 = 400;
/// Bomb probability at level 1
pub const BASE_BOMB_CHANCE: f32 = 0.15;
/// Bomb probability cap
pub const MAX_BOMB_CHANCE: f32 = 0.35;

/// Difficulty parameters derived from the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Object speed (units per frame)
    pub speed: f32,
    /// Time between spawns
    pub spawn_interval_ms: u32,
    /// Probability that a spawn is a bomb
    pub bomb_chance: f32,
}

/// Compute difficulty parameters for a level (levels below 1 are treated as 1)
pub fn params_for(level: u32) -> LevelParams {
    let level = level.max(1);
    LevelParams {
        speed: BASE_SPEED * speed_multiplier(level),
        spawn_interval_ms: spawn_interval_ms(level),
        bomb_chance: bomb_chance(level),
    }
}

/// Gentle ramp for levels 1-2, steeper for 3-5, steepest beyond
fn speed_multiplier(level: u32) -> f32 {
    let l = level as f32;
    match level {
        0..=2 => 1.0 + (l - 1.0) * 0.1,
        3..=5 => 1.2 + (l - 2.0) * 0.15,
        _ => 1.8 + (l - 5.0) * 0.2,
    }
}

fn spawn_interval_ms(level: u32) -> u32 {
    let l = level as i64;
    let raw = match level {
        0..=2 => 1500 - (l - 1) * 100,
        3..=5 => 1300 - (l - 2) * 150,
        _ => 800 - (l - 5) * 50,
    };
    raw.max(MIN_SPAWN_INTERVAL_MS as i64) as u32
}

fn bomb_chance(level: u32) -> f32 {
    (BASE_BOMB_CHANCE + (level - 1) as f32 * 0.02).min(MAX_BOMB_CHANCE)
}

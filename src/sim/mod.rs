//! Simulation core
//!
//! All gameplay logic lives here. This module is pure and single-threaded:
//! - Frame-driven motion (units per frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod effects;
pub mod input;
pub mod params;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::{Firework, FireworkWave, Spark};
pub use input::{Resolution, resolve_direction};
pub use params::{LevelParams, params_for};
pub use spawn::Spawner;
pub use state::{
    Arena, Direction, GameEvent, GameOverCause, GamePhase, GameState, ObjectKind, PlanetArchetype,
    SimObject, BOMB_BASE_COLOR, BOMB_HIGHLIGHT_COLOR, PLANET_PALETTE,
};
pub use tick::{TickInput, TickOutcome, step_effects, tick};

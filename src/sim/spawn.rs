//! Timer-driven object spawner
//!
//! The spawner is a timer bound to one level's parameters. When the level
//! changes it must be rebuilt, which restarts the interval from zero.

use glam::Vec2;
use rand::Rng;

use super::params::{LevelParams, params_for};
use super::state::{Direction, GameEvent, GameState, ObjectKind, PLANET_PALETTE};
use crate::consts::*;

/// Interval timer that produces one object per firing
#[derive(Debug, Clone)]
pub struct Spawner {
    level: u32,
    params: LevelParams,
    elapsed_ms: f32,
}

impl Spawner {
    /// Build a spawner for the given level
    pub fn new(level: u32) -> Self {
        let params = params_for(level);
        log::debug!(
            "Spawner built for level {}: interval {}ms, speed {:.2}, bomb chance {:.2}",
            level,
            params.spawn_interval_ms,
            params.speed,
            params.bomb_chance
        );
        Self {
            level,
            params,
            elapsed_ms: 0.0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn params(&self) -> LevelParams {
        self.params
    }

    /// Time until the next firing
    pub fn remaining_ms(&self) -> f32 {
        (self.params.spawn_interval_ms as f32 - self.elapsed_ms).max(0.0)
    }

    /// Advance the timer by host time, spawning once per elapsed interval.
    ///
    /// Returns the number of objects spawned.
    pub fn advance(&mut self, state: &mut GameState, dt_ms: f32) -> u32 {
        let interval = self.params.spawn_interval_ms as f32;
        self.elapsed_ms += dt_ms.max(0.0);

        let mut fired = 0;
        while self.elapsed_ms >= interval && fired < MAX_SPAWNS_PER_FRAME {
            self.elapsed_ms -= interval;
            self.spawn(state);
            fired += 1;
        }
        // Drop backlog left over from a long stall
        if self.elapsed_ms >= interval {
            self.elapsed_ms %= interval;
        }
        fired
    }

    /// Produce exactly one object with this spawner's parameters
    pub fn spawn(&self, state: &mut GameState) -> u32 {
        let arena = state.arena;
        let params = self.params;
        let rng = state.rng_mut();

        let is_bomb = rng.random_bool(params.bomb_chance as f64);
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let pos = match direction {
            Direction::Left => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..arena.height)),
            Direction::Right => {
                Vec2::new(arena.width + SPAWN_MARGIN, rng.random_range(0.0..arena.height))
            }
            Direction::Up => Vec2::new(rng.random_range(0.0..arena.width), -SPAWN_MARGIN),
            Direction::Down => {
                Vec2::new(rng.random_range(0.0..arena.width), arena.height + SPAWN_MARGIN)
            }
        };
        let palette = if is_bomb {
            None
        } else {
            Some(rng.random_range(0..PLANET_PALETTE.len()) as u8)
        };
        let radius = rng.random_range(MIN_RADIUS..=MAX_RADIUS);
        let rotation = rng.random_range(0.0..std::f32::consts::TAU);

        let kind = if is_bomb {
            ObjectKind::Bomb
        } else {
            ObjectKind::Planet
        };
        let id = state.insert_object(kind, direction, pos, params.speed);
        if let Some(obj) = state.objects.last_mut() {
            obj.palette = palette;
            obj.radius = radius;
            obj.rotation = rotation;
        }
        state.push_event(GameEvent::ObjectSpawned { id, kind, direction });
        log::debug!("Spawned {:?} #{} from {} edge", kind, id, direction.as_str());
        id
    }
}

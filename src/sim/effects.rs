//! Decorative game-over fireworks
//!
//! Visual only: nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Sparks per burst
pub const SPARKS_PER_BURST: usize = 150;
/// Burst lifetime in frames
pub const BURST_LIFETIME_FRAMES: u32 = 90;
/// Fire palette for sparks
pub const FIRE_COLORS: [u32; 6] = [0xFF0000, 0xFF7700, 0xFFFF00, 0xFF4444, 0xFF8800, 0xFFAA00];

/// A single spark, positioned relative to its burst origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub offset: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub alpha: f32,
}

/// One firework burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firework {
    pub origin: Vec2,
    pub sparks: Vec<Spark>,
    pub frames_left: u32,
}

/// Which burst layout to launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkWave {
    /// 12 bursts evenly spread across the width
    Spread,
    /// 8 bursts at random positions
    Scattered,
}

fn burst(state: &mut GameState, origin: Vec2) -> Firework {
    let rng = state.rng_mut();
    let sparks = (0..SPARKS_PER_BURST)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / SPARKS_PER_BURST as f32;
            let speed = rng.random_range(8.0..16.0);
            Spark {
                offset: Vec2::ZERO,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color: FIRE_COLORS[rng.random_range(0..FIRE_COLORS.len())],
                alpha: 1.0,
            }
        })
        .collect();
    Firework {
        origin,
        sparks,
        frames_left: BURST_LIFETIME_FRAMES,
    }
}

/// Launch a wave of bursts into the state
pub fn launch_wave(state: &mut GameState, wave: FireworkWave) {
    let arena = state.arena;
    let count = match wave {
        FireworkWave::Spread => 12,
        FireworkWave::Scattered => 8,
    };
    for i in 0..count {
        let rng = state.rng_mut();
        let x = match wave {
            FireworkWave::Spread => arena.width / 11.0 * i as f32,
            FireworkWave::Scattered => rng.random_range(0.0..arena.width),
        };
        let y = rng.random_range(0.1 * arena.height..0.9 * arena.height);
        let firework = burst(state, Vec2::new(x, y));
        state.fireworks.push(firework);
    }
    log::debug!("Launched {:?} firework wave ({} bursts)", wave, count);
}

/// Advance every burst by one frame and drop expired ones
pub fn step_fireworks(fireworks: &mut Vec<Firework>) {
    for fw in fireworks.iter_mut() {
        fw.frames_left = fw.frames_left.saturating_sub(1);
        for spark in fw.sparks.iter_mut() {
            spark.offset += spark.vel;
            spark.vel.y += 0.1;
            spark.alpha *= 0.96;
        }
    }
    fireworks.retain(|fw| fw.frames_left > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;

    #[test]
    fn test_spread_wave_layout() {
        let mut state = GameState::new(5, Arena::default());
        launch_wave(&mut state, FireworkWave::Spread);
        assert_eq!(state.fireworks.len(), 12);
        for (i, fw) in state.fireworks.iter().enumerate() {
            assert!((fw.origin.x - 800.0 / 11.0 * i as f32).abs() < 1e-3);
            assert!(fw.origin.y >= 60.0 && fw.origin.y <= 540.0);
            assert_eq!(fw.sparks.len(), SPARKS_PER_BURST);
        }
    }

    #[test]
    fn test_bursts_expire() {
        let mut state = GameState::new(5, Arena::default());
        launch_wave(&mut state, FireworkWave::Scattered);
        let mut fireworks = std::mem::take(&mut state.fireworks);
        assert_eq!(fireworks.len(), 8);

        step_fireworks(&mut fireworks);
        let spark = fireworks[0].sparks[0];
        assert!((spark.alpha - 0.96).abs() < 1e-6);
        assert!(spark.offset.length() >= 8.0);

        for _ in 1..BURST_LIFETIME_FRAMES {
            step_fireworks(&mut fireworks);
        }
        assert!(fireworks.is_empty());
    }
}

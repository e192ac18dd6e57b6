//! Read-only frame snapshot for render consumers

use serde::Serialize;

use crate::sim::{Firework, GamePhase, GameState, SimObject};

/// Names of the level-keyed background themes
pub const LEVEL_THEMES: [&str; 5] = [
    "Default space",
    "Deep red nebula",
    "Cyan abyss",
    "Golden cosmos",
    "Purple vortex",
];

/// Background theme for a level (themes cycle every five levels)
pub fn theme_index(level: u32) -> usize {
    (level.max(1) - 1) as usize % LEVEL_THEMES.len()
}

/// Everything a renderer needs for one frame, borrowed from the session
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSnapshot<'a> {
    pub objects: &'a [SimObject],
    pub fireworks: &'a [Firework],
    pub score: u64,
    pub level: u32,
    pub lives_lost: u32,
    pub lives_remaining: u32,
    pub phase: GamePhase,
    pub leveling_up: bool,
    pub showing_splash: bool,
    pub theme_index: usize,
}

impl<'a> FrameSnapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            objects: &state.objects,
            fireworks: &state.fireworks,
            score: state.score,
            level: state.level,
            lives_lost: state.lives_lost,
            lives_remaining: state.lives_remaining(),
            phase: state.phase,
            leveling_up: state.is_leveling_up(),
            showing_splash: state.showing_splash(),
            theme_index: theme_index(state.level),
        }
    }

    pub fn theme_name(&self) -> &'static str {
        LEVEL_THEMES[self.theme_index]
    }
}

//! Game state and core simulation types
//!
//! `GameState` owns score, level, misses, phase and the live object set.
//! Every phase transition goes through the methods here so the invariants
//! (miss limit, idempotent game-over, level-up on threshold) hold no matter
//! which path triggered them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{self, Firework, FireworkWave};
use crate::consts::*;

/// Coarse phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    Title,
    /// Active gameplay (level-up and splash are overlay flags on top of this)
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Input direction, and the label an object must be sliced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit travel heading for an object labelled with this direction.
    ///
    /// Objects enter from the edge named by the direction and cross toward
    /// the opposite edge (screen space, +y is down).
    pub fn heading(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::X,
            Direction::Right => Vec2::NEG_X,
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// What a spawned object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Planet,
    Bomb,
}

/// Visual archetype for planets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetArchetype {
    pub name: &'static str,
    pub base: u32,
    pub highlight: u32,
    pub atmosphere: u32,
    pub glow: u32,
    pub accent: u32,
    pub shadow: u32,
    pub has_rings: bool,
}

/// Planet palette (only Saturn carries rings)
pub static PLANET_PALETTE: [PlanetArchetype; 8] = [
    PlanetArchetype {
        name: "Mars",
        base: 0xFF3D00,
        highlight: 0xFF6B6B,
        atmosphere: 0xFFE5E5,
        glow: 0xFF9E9E,
        accent: 0xFF4444,
        shadow: 0x8B0000,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Neptune",
        base: 0x00FFFF,
        highlight: 0x00BFFF,
        atmosphere: 0xE0FFFF,
        glow: 0x87CEEB,
        accent: 0x00CED1,
        shadow: 0x104E8B,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Saturn",
        base: 0xFFD700,
        highlight: 0xFFA500,
        atmosphere: 0xFFF8DC,
        glow: 0xDAA520,
        accent: 0xFFB700,
        shadow: 0x8B6508,
        has_rings: true,
    },
    PlanetArchetype {
        name: "Jupiter",
        base: 0x9400D3,
        highlight: 0x8A2BE2,
        atmosphere: 0xE6E6FA,
        glow: 0x9370DB,
        accent: 0x9932CC,
        shadow: 0x551A8B,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Earth",
        base: 0x32CD32,
        highlight: 0x00FF00,
        atmosphere: 0x98FB98,
        glow: 0x90EE90,
        accent: 0x3CB371,
        shadow: 0x006400,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Venus",
        base: 0xFF1493,
        highlight: 0xFF69B4,
        atmosphere: 0xFFC0CB,
        glow: 0xFFB6C1,
        accent: 0xFF82AB,
        shadow: 0x8B0A50,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Mercury",
        base: 0xFF4500,
        highlight: 0xFF6347,
        atmosphere: 0xFFE4E1,
        glow: 0xFA8072,
        accent: 0xFF7F50,
        shadow: 0x8B3626,
        has_rings: false,
    },
    PlanetArchetype {
        name: "Uranus",
        base: 0x4169E1,
        highlight: 0x0000FF,
        atmosphere: 0xE6E6FA,
        glow: 0x87CEEB,
        accent: 0x1E90FF,
        shadow: 0x27408B,
        has_rings: false,
    },
];

/// Bomb colours
pub const BOMB_BASE_COLOR: u32 = 0x333333;
pub const BOMB_HIGHLIGHT_COLOR: u32 = 0x666666;

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

impl Arena {
    /// True if `pos` lies more than `margin` outside any edge
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// A spawned planet or bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimObject {
    id: u32,
    kind: ObjectKind,
    direction: Direction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Index into `PLANET_PALETTE` (planets only)
    pub palette: Option<u8>,
    sliced: bool,
}

impl SimObject {
    /// Create an unsliced object travelling along its direction's heading
    pub fn new(id: u32, kind: ObjectKind, direction: Direction, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            direction,
            pos,
            vel: direction.heading() * speed,
            radius: (MIN_RADIUS + MAX_RADIUS) / 2.0,
            rotation: 0.0,
            palette: match kind {
                ObjectKind::Planet => Some(0),
                ObjectKind::Bomb => None,
            },
            sliced: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The only input that resolves this object (fixed at spawn)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_sliced(&self) -> bool {
        self.sliced
    }

    pub fn is_bomb(&self) -> bool {
        self.kind == ObjectKind::Bomb
    }

    /// Planet archetype for rendering (None for bombs)
    pub fn archetype(&self) -> Option<&'static PlanetArchetype> {
        self.palette
            .and_then(|i| PLANET_PALETTE.get(i as usize))
            .filter(|_| self.kind == ObjectKind::Planet)
    }

    /// Put the object into its spin-out trajectory.
    ///
    /// Returns false if it was already sliced.
    pub fn slice(&mut self) -> bool {
        if self.sliced {
            return false;
        }
        self.sliced = true;
        self.vel *= SLICE_BOOST;
        self.rotation += SLICE_SPIN;
        true
    }

    /// Advance one frame of motion
    pub fn step(&mut self) {
        self.pos += self.vel;
        if self.sliced {
            self.vel.x *= SLICED_DRAG;
            self.vel.y += SLICED_GRAVITY;
            self.rotation += SLICED_SPIN_RATE;
        } else {
            self.rotation += LIVE_SPIN_RATE;
        }
    }
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// A bomb was sliced
    Bomb { id: u32 },
    /// Too many planets escaped
    MissLimit,
}

/// Discrete events produced by the core for external consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStart,
    ObjectSpawned { id: u32, kind: ObjectKind, direction: Direction },
    PlanetSliced { id: u32 },
    PlanetMissed { id: u32, lives_lost: u32 },
    LevelUp { level: u32 },
    BombHit { id: u32 },
    MissLimitReached,
    GameOver { cause: GameOverCause },
    /// Delayed follow-up after a bomb ended the run
    Lament,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub arena: Arena,
    pub score: u64,
    /// Current level (starts at 1)
    pub level: u32,
    /// Planets that escaped unsliced
    pub lives_lost: u32,
    pub phase: GamePhase,
    /// Remaining splash overlay time (ms)
    pub splash_ms: f32,
    /// Remaining level-up overlay time (ms)
    pub level_up_ms: f32,
    /// Pending bomb aftermath (ms until second firework wave)
    pub aftermath_ms: Option<f32>,
    /// Frames simulated since the run started
    pub frame: u64,
    /// Live and sliced objects, in spawn order
    pub objects: Vec<SimObject>,
    /// Decorative game-over bursts
    pub fireworks: Vec<Firework>,
    pub fireworks_enabled: bool,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new state on the title screen, with the title splash armed
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            score: 0,
            level: 1,
            lives_lost: 0,
            phase: GamePhase::Title,
            splash_ms: TITLE_SPLASH_MS,
            level_up_ms: 0.0,
            aftermath_ms: None,
            frame: 0,
            objects: Vec::new(),
            fireworks: Vec::new(),
            fireworks_enabled: true,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an unsliced object and return its id
    pub fn insert_object(
        &mut self,
        kind: ObjectKind,
        direction: Direction,
        pos: Vec2,
        speed: f32,
    ) -> u32 {
        let id = self.next_entity_id();
        self.objects.push(SimObject::new(id, kind, direction, pos, speed));
        id
    }

    pub fn object(&self, id: u32) -> Option<&SimObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_leveling_up(&self) -> bool {
        self.level_up_ms > 0.0
    }

    pub fn showing_splash(&self) -> bool {
        self.splash_ms > 0.0
    }

    pub fn lives_remaining(&self) -> u32 {
        MAX_MISSES.saturating_sub(self.lives_lost)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Title -> Playing. Returns false if not on the title screen.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Title {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.splash_ms = TITLE_SPLASH_MS;
        self.push_event(GameEvent::GameStart);
        log::info!("Game started (seed {})", self.seed);
        true
    }

    /// GameOver -> Playing with a clean slate. Returns false if the run has not ended.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.score = 0;
        self.level = 1;
        self.lives_lost = 0;
        self.objects.clear();
        self.fireworks.clear();
        self.aftermath_ms = None;
        self.level_up_ms = 0.0;
        self.frame = 0;
        self.phase = GamePhase::Playing;
        self.splash_ms = TITLE_SPLASH_MS;
        self.push_event(GameEvent::GameStart);
        log::info!("Game restarted");
        true
    }

    /// Award one slice and check the level threshold
    pub fn award_slice(&mut self) {
        self.score += POINTS_PER_SLICE;
        if self.is_playing() && self.score > 0 && self.score % POINTS_PER_LEVEL == 0 {
            self.level += 1;
            self.level_up_ms = LEVEL_UP_MS;
            self.push_event(GameEvent::LevelUp { level: self.level });
            log::info!("Level up! Now level {} (score {})", self.level, self.score);
        }
    }

    /// Record an escaped planet; ends the run on the miss limit
    pub fn register_miss(&mut self, id: u32) {
        if !self.is_playing() {
            return;
        }
        self.lives_lost += 1;
        self.push_event(GameEvent::PlanetMissed {
            id,
            lives_lost: self.lives_lost,
        });
        log::debug!("Planet {} missed ({}/{})", id, self.lives_lost, MAX_MISSES);
        if self.lives_lost >= MAX_MISSES {
            self.push_event(GameEvent::MissLimitReached);
            self.trigger_game_over(GameOverCause::MissLimit);
        }
    }

    /// End the run. Repeated calls after the first are no-ops (returns false).
    pub fn trigger_game_over(&mut self, cause: GameOverCause) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        if let GameOverCause::Bomb { id } = cause {
            self.push_event(GameEvent::BombHit { id });
            if self.fireworks_enabled {
                effects::launch_wave(self, FireworkWave::Spread);
            }
            self.aftermath_ms = Some(AFTERMATH_DELAY_MS);
        }
        self.push_event(GameEvent::GameOver { cause });
        log::info!(
            "Game over ({:?}) - score {}, level {}",
            cause,
            self.score,
            self.level
        );
        true
    }

    /// Count down overlay and aftermath timers by host time
    pub fn advance_timers(&mut self, dt_ms: f32) {
        // NaN and negative host deltas count as no time passing
        let dt_ms = dt_ms.max(0.0);
        self.splash_ms = (self.splash_ms - dt_ms).max(0.0);
        self.level_up_ms = (self.level_up_ms - dt_ms).max(0.0);

        if let Some(remaining) = self.aftermath_ms {
            let remaining = remaining - dt_ms;
            if remaining <= 0.0 {
                self.aftermath_ms = None;
                if self.fireworks_enabled {
                    effects::launch_wave(self, FireworkWave::Scattered);
                }
                self.push_event(GameEvent::Lament);
            } else {
                self.aftermath_ms = Some(remaining);
            }
        }
    }
}

//! Planet Slice - a direction-slicing arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (parameter curve, spawner, physics, input, game state)
//! - `session`: Owned session context, scheduler loop and event dispatch
//! - `view`: Immutable per-frame snapshot for render consumers
//! - `audio`: Event-driven sound cues
//! - `settings`: Configuration loaded from JSON

pub mod audio;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{GameError, GameResult};
pub use session::Session;
pub use settings::Settings;
pub use view::FrameSnapshot;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Object speed at level 1 (units per frame)
    pub const BASE_SPEED: f32 = 4.0;

    /// Score awarded per sliced planet
    pub const POINTS_PER_SLICE: u64 = 10;
    /// Score interval that triggers a level increment
    pub const POINTS_PER_LEVEL: u64 = 100;
    /// Missed planets that end the run
    pub const MAX_MISSES: u32 = 5;

    /// Objects spawn this far outside the canvas edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Objects are culled once this far outside any canvas edge
    pub const CULL_MARGIN: f32 = 100.0;

    /// Spawned radius range
    pub const MIN_RADIUS: f32 = 25.0;
    pub const MAX_RADIUS: f32 = 40.0;

    /// Splash overlay shown on start/restart (ms)
    pub const TITLE_SPLASH_MS: f32 = 3000.0;
    /// Level-up overlay duration (ms)
    pub const LEVEL_UP_MS: f32 = 2000.0;
    /// Delay before the second firework wave and lament cue (ms)
    pub const AFTERMATH_DELAY_MS: f32 = 500.0;

    /// Velocity multiplier applied on slice
    pub const SLICE_BOOST: f32 = 1.5;
    /// Rotational impulse on slice (four full turns)
    pub const SLICE_SPIN: f32 = std::f32::consts::PI * 4.0;
    /// Horizontal drag per frame for sliced objects
    pub const SLICED_DRAG: f32 = 0.98;
    /// Downward acceleration per frame for sliced objects
    pub const SLICED_GRAVITY: f32 = 0.5;
    /// Rotation per frame
    pub const LIVE_SPIN_RATE: f32 = 0.02;
    pub const SLICED_SPIN_RATE: f32 = 0.1;

    /// Maximum spawn timer firings per frame to prevent a burst after a stall
    pub const MAX_SPAWNS_PER_FRAME: u32 = 4;
}

//! Session context and scheduler loop
//!
//! A `Session` owns the game state, the spawn timer and the audio consumer.
//! Hosts drive it from a single thread: key events through `on_direction` /
//! `on_key`, UI actions through `start` / `restart`, and display refresh
//! through `frame`. Every entry point runs to completion, so the next frame
//! always sees the full result of an input event.

use glam::Vec2;

use crate::audio::{AudioBackend, AudioManager, LogBackend, SoundEffect};
use crate::settings::Settings;
use crate::sim::{
    Arena, Direction, GameEvent, GamePhase, GameState, ObjectKind, Resolution, Spawner,
    TickInput, resolve_direction, step_effects, tick,
};
use crate::view::FrameSnapshot;

/// One play session
pub struct Session {
    state: GameState,
    /// Active spawn timer; None while not playing
    spawner: Option<Spawner>,
    /// Whether the frame-tick subscription is live
    frame_loop: bool,
    /// Directions queued for the next frame
    pending: TickInput,
    audio: AudioManager,
    /// Events dispatched by the most recent call
    last_events: Vec<GameEvent>,
}

impl Session {
    /// Create a session on the title screen with log-only audio
    pub fn new(settings: &Settings) -> Self {
        Self::with_audio(settings, Box::new(LogBackend))
    }

    /// Create a session on the title screen. An invalid playfield size falls
    /// back to the default arena.
    pub fn with_audio(settings: &Settings, backend: Box<dyn AudioBackend>) -> Self {
        let mut settings = settings.clone();
        let arena = match settings.validate() {
            Ok(()) => settings.arena(),
            Err(e) => {
                log::warn!("{}; using the default playfield", e);
                Arena::default()
            }
        };

        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(seed, arena);
        state.fireworks_enabled = settings.effective_fireworks();

        let mut audio = AudioManager::from_settings(&settings, backend);
        audio.play(SoundEffect::Intro);
        audio.start_music();

        log::info!(
            "Session created ({}x{}, seed {})",
            state.arena.width,
            state.arena.height,
            seed
        );
        Self {
            state,
            spawner: None,
            frame_loop: false,
            pending: TickInput::default(),
            audio,
            last_events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Immutable view for renderers
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot::of(&self.state)
    }

    pub fn spawner(&self) -> Option<&Spawner> {
        self.spawner.as_ref()
    }

    /// True while the frame-tick subscription is live
    pub fn is_running(&self) -> bool {
        self.frame_loop
    }

    /// Events dispatched by the most recent action or frame
    pub fn events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Let the autopilot play
    pub fn set_autopilot(&mut self, on: bool) {
        self.pending.autopilot = on;
    }

    /// UI "start" action (title screen only)
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        if !started {
            log::warn!("Ignoring start in phase {:?}", self.state.phase);
        }
        self.sync();
        started
    }

    /// UI "restart" action (after game over only)
    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart();
        if !restarted {
            log::warn!("Ignoring restart in phase {:?}", self.state.phase);
        }
        self.sync();
        restarted
    }

    /// Resolve a direction press immediately
    pub fn on_direction(&mut self, direction: Direction) -> Resolution {
        let resolution = resolve_direction(&mut self.state, direction);
        self.sync();
        resolution
    }

    /// Resolve a raw key press; unrecognized keys are ignored
    pub fn on_key(&mut self, key: &str) -> Option<Resolution> {
        Direction::from_key(key).map(|dir| self.on_direction(dir))
    }

    /// Place an object directly at the current level's speed (scripted
    /// scenarios, tutorials). Ignored outside `Playing`.
    pub fn place_object(
        &mut self,
        kind: ObjectKind,
        direction: Direction,
        pos: Vec2,
    ) -> Option<u32> {
        let speed = self.spawner.as_ref()?.params().speed;
        let id = self.state.insert_object(kind, direction, pos, speed);
        self.sync();
        Some(id)
    }

    /// Queue a direction to be resolved at the start of the next frame
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.frame_loop {
            self.pending.directions.push(direction);
        }
    }

    /// Run one display frame. Returns true if the host should schedule another.
    pub fn frame(&mut self, dt_ms: f32) -> bool {
        if self.frame_loop {
            if let Some(spawner) = self.spawner.as_mut() {
                spawner.advance(&mut self.state, dt_ms);
            }
            tick(&mut self.state, &self.pending);
            self.pending.directions.clear();
        }
        step_effects(&mut self.state);
        self.state.advance_timers(dt_ms);
        self.sync();
        self.wants_frame()
    }

    fn wants_frame(&self) -> bool {
        self.frame_loop
            || self.state.showing_splash()
            || !self.state.fireworks.is_empty()
            || self.state.aftermath_ms.is_some()
    }

    /// Reconcile timers with the current phase/level and dispatch events
    fn sync(&mut self) {
        if self.state.is_playing() {
            if !self.frame_loop {
                self.frame_loop = true;
                log::info!("Frame loop started");
            }
            let level = self.state.level;
            if self.spawner.as_ref().map(Spawner::level) != Some(level) {
                self.spawner = Some(Spawner::new(level));
            }
        } else if self.frame_loop || self.spawner.is_some() {
            self.frame_loop = false;
            self.spawner = None;
            self.pending.directions.clear();
            log::info!("Frame loop and spawn timer cancelled ({:?})", self.state.phase);
        }

        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            self.audio.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBackend;

    fn settings() -> Settings {
        Settings {
            seed: Some(2024),
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_on_title() {
        let mut session = Session::new(&settings());
        assert_eq!(session.phase(), GamePhase::Title);
        assert!(!session.is_running());
        assert!(session.spawner().is_none());
        assert!(session.snapshot().showing_splash);

        // Frames are only wanted while the title splash counts down
        for _ in 0..299 {
            assert!(session.frame(10.0));
        }
        assert!(!session.frame(10.0));
        assert!(!session.snapshot().showing_splash);
        assert_eq!(session.phase(), GamePhase::Title);
        assert!(session.state().objects.is_empty());
        assert_eq!(session.state().frame, 0);
    }

    #[test]
    fn test_title_plays_intro() {
        let backend = RecordingBackend::new();
        let played = backend.played();
        let _session = Session::with_audio(&settings(), Box::new(backend));
        assert_eq!(*played.borrow(), vec![SoundEffect::Intro]);
    }

    #[test]
    fn test_invalid_canvas_falls_back_to_default_arena() {
        let settings = Settings {
            seed: Some(3),
            canvas_height: 0.0,
            canvas_width: -10.0,
            ..Default::default()
        };
        let mut session = Session::new(&settings);
        assert_eq!(session.state().arena, Arena::default());

        session.start();
        for _ in 0..200 {
            session.frame(16.0);
        }
        assert!(session.state().frame > 0);
    }

    #[test]
    fn test_restart_rebuilds_timer_from_zero() {
        let mut session = Session::new(&settings());
        session.start();
        for _ in 0..50 {
            session.frame(16.0);
        }
        assert_eq!(session.spawner().unwrap().remaining_ms(), 700.0);

        session.place_object(ObjectKind::Bomb, Direction::Left, Vec2::new(100.0, 100.0));
        session.on_direction(Direction::Left);
        assert!(session.spawner().is_none());

        assert!(session.restart());
        let spawner = session.spawner().unwrap();
        assert_eq!(spawner.level(), 1);
        assert_eq!(spawner.remaining_ms(), 1500.0);
    }

    #[test]
    fn test_start_arms_timers() {
        let mut session = Session::new(&settings());
        assert!(session.start());
        assert!(session.is_running());
        assert_eq!(session.spawner().map(Spawner::level), Some(1));
        assert_eq!(session.events(), &[GameEvent::GameStart]);
        assert!(session.snapshot().showing_splash);
    }

    #[test]
    fn test_spawns_on_cadence() {
        let mut session = Session::new(&settings());
        session.start();
        // 1500ms at level 1
        for _ in 0..93 {
            session.frame(16.0);
        }
        assert!(session.state().objects.is_empty());
        session.frame(16.0);
        assert_eq!(session.state().frame, 94);
        assert_eq!(
            session
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ObjectSpawned { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_level_change_rebuilds_spawner() {
        let mut session = Session::new(&settings());
        session.start();
        session.state.score = 90;
        session.place_object(ObjectKind::Planet, Direction::Left, Vec2::new(100.0, 100.0));
        session.on_direction(Direction::Left);
        assert_eq!(session.state().level, 2);
        let spawner = session.spawner().unwrap();
        assert_eq!(spawner.level(), 2);
        assert_eq!(spawner.remaining_ms(), 1400.0);
    }

    #[test]
    fn test_queued_direction_resolves_next_frame() {
        let mut session = Session::new(&settings());
        session.start();
        session.place_object(ObjectKind::Planet, Direction::Up, Vec2::new(100.0, 100.0));
        session.queue_direction(Direction::Up);
        assert_eq!(session.state().score, 0);
        session.frame(16.0);
        assert_eq!(session.state().score, 10);
    }

    #[test]
    fn test_game_over_cancels_loop() {
        let mut session = Session::new(&settings());
        session.start();
        session.place_object(ObjectKind::Bomb, Direction::Down, Vec2::new(100.0, 100.0));
        session.on_direction(Direction::Down);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(!session.is_running());
        assert!(session.spawner().is_none());

        // Fireworks keep the host ticking until they burn out
        assert!(session.frame(16.0));
        let mut frames = 0;
        while session.frame(16.0) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(session.state().fireworks.is_empty());
    }

    #[test]
    fn test_reduced_motion_skips_fireworks() {
        let settings = Settings {
            seed: Some(1),
            reduced_motion: true,
            ..Default::default()
        };
        let mut session = Session::new(&settings);
        session.start();
        session.place_object(ObjectKind::Bomb, Direction::Down, Vec2::new(100.0, 100.0));
        session.on_direction(Direction::Down);
        assert!(session.state().fireworks.is_empty());
    }
}

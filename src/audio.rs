//! Audio cues driven by game events
//!
//! The core never waits on audio: events are mapped to cues and handed to a
//! backend that plays them fire-and-forget.

use std::cell::RefCell;
use std::rc::Rc;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Session started or restarted
    Intro,
    /// Level threshold crossed
    LevelUp,
    /// A bomb was sliced
    BombBlast,
    /// Run lost (miss limit, or delayed after a bomb)
    Lament,
}

impl SoundEffect {
    /// Per-cue mix level before master/sfx volume
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Intro => 0.6,
            SoundEffect::LevelUp => 0.6,
            SoundEffect::BombBlast => 0.5,
            SoundEffect::Lament => 0.6,
        }
    }
}

/// Map a core event to the cue it should trigger
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::GameStart => Some(SoundEffect::Intro),
        GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
        GameEvent::BombHit { .. } => Some(SoundEffect::BombBlast),
        GameEvent::MissLimitReached | GameEvent::Lament => Some(SoundEffect::Lament),
        _ => None,
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start a one-shot effect at the given volume; must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start or stop the looping background music
    fn music(&mut self, _playing: bool, _volume: f32) {}
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Audio cue {:?} at volume {:.2}", effect, volume);
    }

    fn music(&mut self, playing: bool, volume: f32) {
        let state = if playing { "on" } else { "off" };
        log::debug!("Background music {} (volume {:.2})", state, volume);
    }
}

/// Backend that records cues into a shared log
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    played: Rc<RefCell<Vec<SoundEffect>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded cues
    pub fn played(&self) -> Rc<RefCell<Vec<SoundEffect>>> {
        self.played.clone()
    }
}

impl AudioBackend for RecordingBackend {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.played.borrow_mut().push(effect);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
        }
    }

    /// Build a manager using the volumes from settings
    pub fn from_settings(settings: &Settings, backend: Box<dyn AudioBackend>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.music_volume = settings.music_volume.clamp(0.0, 1.0);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_gain();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Title-screen music
    pub fn start_music(&mut self) {
        if !self.muted {
            self.backend.music(true, self.master_volume * self.music_volume);
        }
    }

    /// React to a core event
    pub fn handle_event(&mut self, event: &GameEvent) {
        if *event == GameEvent::GameStart {
            self.backend.music(false, 0.0);
        }
        if let Some(effect) = cue_for(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameOverCause;

    #[test]
    fn test_event_mapping() {
        assert_eq!(cue_for(&GameEvent::GameStart), Some(SoundEffect::Intro));
        assert_eq!(cue_for(&GameEvent::LevelUp { level: 2 }), Some(SoundEffect::LevelUp));
        assert_eq!(cue_for(&GameEvent::BombHit { id: 1 }), Some(SoundEffect::BombBlast));
        assert_eq!(cue_for(&GameEvent::MissLimitReached), Some(SoundEffect::Lament));
        assert_eq!(cue_for(&GameEvent::PlanetSliced { id: 1 }), None);
        assert_eq!(
            cue_for(&GameEvent::GameOver {
                cause: GameOverCause::MissLimit
            }),
            None
        );
    }

    #[test]
    fn test_muted_manager_is_silent() {
        let backend = RecordingBackend::new();
        let played = backend.played();
        let mut audio = AudioManager::new(Box::new(backend));
        audio.set_muted(true);
        audio.handle_event(&GameEvent::LevelUp { level: 2 });
        assert!(played.borrow().is_empty());

        audio.set_muted(false);
        audio.handle_event(&GameEvent::LevelUp { level: 2 });
        assert_eq!(*played.borrow(), vec![SoundEffect::LevelUp]);
    }
}

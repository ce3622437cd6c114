//! Sound effects and background music
//!
//! The game never plays sounds itself. The host drains [`GameEvent`]s and
//! feeds them to a [`SoundSystem`], which maps them to effects and forwards
//! them to whatever [`SoundOutput`] was injected. [`MusicSystem`] follows the
//! game status and loops one track at a time on an injected [`MusicOutput`].

use crate::sim::state::{DeathCause, GameEvent, GameStatus};

/// Default music volume, quieter than effects
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.12;

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player hopped
    Hop,
    /// Fell in the river or carried off by a log
    Splash,
    /// Hit by traffic, bad landing or out of time
    Splat,
    /// Home slot filled
    Home,
    /// Level cleared or extra life
    LevelUp,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Effect for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Hopped(_) => Some(SoundEffect::Hop),
            GameEvent::Died(DeathCause::Drowned | DeathCause::CarriedOff) => {
                Some(SoundEffect::Splash)
            }
            GameEvent::Died(DeathCause::Traffic | DeathCause::MissedHome | DeathCause::TimeUp) => {
                Some(SoundEffect::Splat)
            }
            GameEvent::HomeFilled { .. } => Some(SoundEffect::Home),
            GameEvent::LevelComplete { .. } | GameEvent::ExtraLife { .. } => {
                Some(SoundEffect::LevelUp)
            }
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::GameStarted | GameEvent::Respawned => None,
        }
    }
}

/// Something that can actually make noise
pub trait SoundOutput {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Silent output
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl SoundOutput for NullOutput {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

impl MusicOutput for NullOutput {
    fn start_track(&mut self, _track: MusicTrack, _volume: f32) {}
    fn stop_track(&mut self) {}
}

/// Writes each effect to the log; used by the headless build
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOutput;

impl SoundOutput for LogOutput {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {effect:?} at volume {volume:.2}");
    }
}

impl MusicOutput for LogOutput {
    fn start_track(&mut self, track: MusicTrack, volume: f32) {
        log::debug!("Music {track:?} looping at volume {volume:.2}");
    }

    fn stop_track(&mut self) {
        log::debug!("Music stopped");
    }

    fn set_track_volume(&mut self, volume: f32) {
        log::debug!("Music volume {volume:.2}");
    }
}

/// Audio manager for the game
pub struct SoundSystem {
    output: Box<dyn SoundOutput>,
    enabled: bool,
    volume: f32,
}

impl SoundSystem {
    pub fn new(output: Box<dyn SoundOutput>) -> Self {
        Self {
            output,
            enabled: true,
            volume: 1.0,
        }
    }

    /// Disabled system over a silent output
    pub fn silent() -> Self {
        let mut system = Self::new(Box::new(NullOutput));
        system.enabled = false;
        system
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled || self.volume <= 0.0 {
            return;
        }
        self.output.play(effect, self.volume);
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Gameplay,
    Victory,
    GameOver,
}

impl MusicTrack {
    /// Track for a game status; `None` keeps whatever is playing
    pub fn for_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Title => Some(MusicTrack::Menu),
            GameStatus::Playing => Some(MusicTrack::Gameplay),
            GameStatus::LevelComplete => Some(MusicTrack::Victory),
            GameStatus::GameOver => Some(MusicTrack::GameOver),
            GameStatus::Dying => None,
        }
    }
}

/// Something that can loop a music track
pub trait MusicOutput {
    /// Start looping `track`, replacing nothing (the caller stops first)
    fn start_track(&mut self, track: MusicTrack, volume: f32);
    fn stop_track(&mut self);
    fn set_track_volume(&mut self, _volume: f32) {}
}

/// Music manager: at most one track at a time
pub struct MusicSystem {
    output: Box<dyn MusicOutput>,
    enabled: bool,
    volume: f32,
    current: Option<MusicTrack>,
}

impl MusicSystem {
    pub fn new(output: Box<dyn MusicOutput>) -> Self {
        Self {
            output,
            enabled: true,
            volume: DEFAULT_MUSIC_VOLUME,
            current: None,
        }
    }

    /// Disabled system over a silent output
    pub fn silent() -> Self {
        let mut system = Self::new(Box::new(NullOutput));
        system.enabled = false;
        system
    }

    /// Disabling stops the current track
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set volume (0.0 - 1.0), applied to the playing track too
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        if self.current.is_some() {
            self.output.set_track_volume(self.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Loop `track`; a no-op when it is already playing
    pub fn play(&mut self, track: MusicTrack) {
        if !self.enabled || self.current == Some(track) {
            return;
        }
        if self.current.is_some() {
            self.output.stop_track();
        }
        self.output.start_track(track, self.volume);
        self.current = Some(track);
        log::debug!("Music track {track:?}");
    }

    pub fn stop(&mut self) {
        if self.current.take().is_some() {
            self.output.stop_track();
        }
    }

    /// Stop if playing, otherwise start the gameplay track
    pub fn toggle(&mut self) {
        if self.current.is_some() {
            self.stop();
        } else {
            self.play(MusicTrack::Gameplay);
        }
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }

    /// Switch to the track matching `status`
    pub fn follow_status(&mut self, status: GameStatus) {
        if let Some(track) = MusicTrack::for_status(status) {
            self.play(track);
        }
    }
}

//! A running game wired to its host
//!
//! One frame = dispatch queued input, `update(dt)`, forward events to sound,
//! switch music to the status track, render the snapshot. `start`/`stop` can
//! be called any number of times.

use crate::audio::{MusicOutput, MusicSystem, SoundOutput, SoundSystem};
use crate::persistence::JsonFileStore;
use crate::platform::{FrameLoop, InputQueue};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::game::Game;
use crate::sim::state::{GameSnapshot, InputEvent};

pub struct Session<R: Renderer> {
    game: Game,
    frame_loop: FrameLoop,
    input: InputQueue,
    renderer: R,
    sound: SoundSystem,
    music: MusicSystem,
}

impl<R: Renderer> Session<R> {
    pub fn new(game: Game, renderer: R, sound: SoundSystem, music: MusicSystem) -> Self {
        let mut input = InputQueue::new();
        input.detach();
        Self {
            game,
            frame_loop: FrameLoop::new(),
            input,
            renderer,
            sound,
            music,
        }
    }

    /// Session configured from settings, best score kept in a JSON file
    pub fn from_settings(
        settings: &Settings,
        seed: u64,
        renderer: R,
        sound_output: Box<dyn SoundOutput>,
        music_output: Box<dyn MusicOutput>,
    ) -> Self {
        let store = JsonFileStore::new(&settings.high_score_path);
        let game = Game::new(Box::new(store), settings.seed.unwrap_or(seed));
        let mut sound = SoundSystem::new(sound_output);
        sound.set_enabled(settings.sound_enabled);
        sound.set_volume(settings.effective_volume());
        let mut music = MusicSystem::new(music_output);
        music.set_enabled(settings.music_enabled);
        music.set_volume(settings.effective_music_volume());
        Self::new(game, renderer, sound, music)
    }

    /// Begin ticking and listening for input; false if already running
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !self.frame_loop.start(now_ms) {
            return false;
        }
        self.input.attach();
        self.game.resume();
        self.music.follow_status(self.game.status());
        log::info!("Session started");
        true
    }

    /// Stop ticking, drop queued input, silence music and cancel pending
    /// transitions; false if already stopped
    pub fn stop(&mut self) -> bool {
        if !self.frame_loop.stop() {
            return false;
        }
        self.input.detach();
        self.game.stop();
        self.music.stop();
        log::info!("Session stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Queue an input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.input.push(event)
    }

    /// Queue a key press for the next frame
    pub fn push_key(&mut self, key: &str) -> bool {
        self.input.push_key(key)
    }

    /// Run one frame; false when stopped
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(dt_ms) = self.frame_loop.tick(now_ms) else {
            return false;
        };

        for event in self.input.drain() {
            self.game.handle_input(event);
        }
        self.game.update(dt_ms);
        for event in self.game.drain_events() {
            self.sound.handle_event(&event);
        }
        self.music.follow_status(self.game.status());
        self.renderer.render(&self.game.snapshot());
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sound_mut(&mut self) -> &mut SoundSystem {
        &mut self.sound
    }

    pub fn music(&self) -> &MusicSystem {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicSystem {
        &mut self.music
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MusicTrack, NullOutput};
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::renderer::TextRenderer;
    use crate::sim::state::{Direction, GameStatus, Position};

    fn session() -> Session<TextRenderer> {
        let game = Game::new(Box::new(MemoryStore::new()), 5);
        Session::new(
            game,
            TextRenderer::new(),
            SoundSystem::silent(),
            MusicSystem::silent(),
        )
    }

    fn session_with_music() -> Session<TextRenderer> {
        let game = Game::new(Box::new(MemoryStore::new()), 5);
        Session::new(
            game,
            TextRenderer::new(),
            SoundSystem::silent(),
            MusicSystem::new(Box::new(NullOutput)),
        )
    }

    #[test]
    fn test_no_frames_before_start() {
        let mut session = session();
        assert!(!session.push_key(" "));
        assert!(!session.frame(16.0));
        assert!(session.renderer().frame().is_empty());
    }

    #[test]
    fn test_keys_drive_the_game() {
        let mut session = session();
        assert!(session.start(0.0));
        assert!(!session.start(5.0));

        session.push_key(" ");
        assert!(session.frame(16.0));
        assert_eq!(session.snapshot().status, GameStatus::Playing);

        session.push_key("ArrowUp");
        session.frame(32.0);
        assert_eq!(
            session.snapshot().player.position,
            Position::new(PLAYER_START_X, PLAYER_START_Y - 1)
        );
        assert!(session.renderer().frame().starts_with("SCORE 000010"));
    }

    #[test]
    fn test_stop_is_idempotent_and_halts_frames() {
        let mut session = session();
        session.start(0.0);
        session.push_key(" ");
        session.frame(16.0);

        assert!(session.stop());
        assert!(!session.stop());
        assert!(!session.is_running());
        let before = session.snapshot().time_remaining;
        assert!(!session.frame(1_000.0));
        assert!(!session.push_input(InputEvent::Direction(Direction::Up)));
        assert_eq!(session.snapshot().time_remaining, before);
    }

    #[test]
    fn test_restart_after_stop_during_death_recovers() {
        let mut session = session();
        session.start(0.0);
        session.push_key(" ");
        session.frame(16.0);

        // Run the clock out in clamped 100 ms frames
        let mut now = 16.0;
        while session.snapshot().status == GameStatus::Playing {
            now += 100.0;
            session.frame(now);
        }
        assert_eq!(session.snapshot().status, GameStatus::Dying);

        session.stop();
        session.start(now);
        for _ in 0..10 {
            now += 100.0;
            session.frame(now);
        }
        assert_eq!(session.snapshot().status, GameStatus::Playing);
        assert_eq!(session.snapshot().lives, INITIAL_LIVES - 1);
    }

    #[test]
    fn test_music_follows_game_status() {
        let mut session = session_with_music();
        assert_eq!(session.music().current_track(), None);
        session.start(0.0);
        assert_eq!(session.music().current_track(), Some(MusicTrack::Menu));

        session.push_key(" ");
        session.frame(16.0);
        assert_eq!(session.music().current_track(), Some(MusicTrack::Gameplay));

        // Dying keeps the gameplay track
        let mut now = 16.0;
        while session.snapshot().status == GameStatus::Playing {
            now += 100.0;
            session.frame(now);
        }
        assert_eq!(session.snapshot().status, GameStatus::Dying);
        assert_eq!(session.music().current_track(), Some(MusicTrack::Gameplay));

        session.stop();
        assert_eq!(session.music().current_track(), None);
    }

    #[test]
    fn test_disabled_music_stays_silent() {
        let mut session = session_with_music();
        session.music_mut().set_enabled(false);
        session.start(0.0);
        session.push_key(" ");
        session.frame(16.0);
        assert_eq!(session.music().current_track(), None);
    }
}

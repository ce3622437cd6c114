//! Game orchestrator
//!
//! Drives one game: advances the player and lanes each tick, resolves
//! collisions against the player's row, and owns lives, level, timer and
//! status. Status changes that wait on a delay (death animation, level
//! complete banner) are queued as [`Deferred`] events tagged with the
//! generation they were scheduled in; `reset` and `stop` bump the generation
//! so anything still queued from an older game does nothing.

use super::collision::{Hitbox, river_support, road_collision};
use super::home::HomeRegistry;
use super::lane::{Lane, lanes_for_level};
use super::moving_object::MovingObject;
use super::player::Player;
use super::score::Score;
use super::state::{
    Action, DeathCause, Direction, GameEvent, GameSnapshot, GameStatus, InputEvent, LaneKind,
};
use crate::consts::*;
use crate::persistence::HighScoreStore;
use crate::tuning::time_limit_for_level;

/// Status change waiting on a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Death animation over: respawn or game over
    DeathResolved,
    /// Level complete banner over: back to playing
    ResumePlay,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    remaining_ms: f32,
    generation: u64,
    transition: Transition,
}

/// Callback receiving a snapshot after every update
pub type Observer = Box<dyn FnMut(&GameSnapshot)>;

/// One game of Hopper
pub struct Game {
    player: Player,
    homes: HomeRegistry,
    score: Score,
    lanes: Vec<Lane>,
    store: Box<dyn HighScoreStore>,
    seed: u64,
    lives: u8,
    level: u32,
    /// Seconds left in the current attempt
    time_remaining: f32,
    max_time: f32,
    status: GameStatus,
    paused: bool,
    /// Smallest row reached this life
    furthest_row: i32,
    next_extra_life: u64,
    generation: u64,
    pending: Vec<Deferred>,
    events: Vec<GameEvent>,
    observer: Option<Observer>,
}

impl Game {
    /// New game on the title screen, best score read from `store`
    pub fn new(store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let score = Score::load(store.as_ref());
        let time_limit = time_limit_for_level(1);
        Self {
            player: Player::new(),
            homes: HomeRegistry::new(),
            score,
            lanes: lanes_for_level(1, seed),
            store,
            seed,
            lives: INITIAL_LIVES,
            level: 1,
            time_remaining: time_limit,
            max_time: time_limit,
            status: GameStatus::Title,
            paused: false,
            furthest_row: PLAYER_START_Y,
            next_extra_life: EXTRA_LIFE_SCORE,
            generation: 0,
            pending: Vec::new(),
            events: Vec::new(),
            observer: None,
        }
    }

    /// Receive a snapshot at the end of every update
    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    /// Start a fresh game
    pub fn reset(&mut self) {
        self.invalidate_pending();
        self.score.reset();
        self.lives = INITIAL_LIVES;
        self.level = 1;
        self.max_time = time_limit_for_level(1);
        self.time_remaining = self.max_time;
        self.player.respawn();
        self.furthest_row = PLAYER_START_Y;
        self.next_extra_life = EXTRA_LIFE_SCORE;
        self.homes.reset();
        self.lanes = lanes_for_level(1, self.lane_seed());
        self.paused = false;
        self.status = GameStatus::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("New game started");
    }

    /// Cancel anything still scheduled; the game stays as it is
    pub fn stop(&mut self) {
        self.invalidate_pending();
    }

    /// Re-arm the delayed transition for the current status after a `stop`
    pub fn resume(&mut self) {
        if !self.pending.is_empty() {
            return;
        }
        match self.status {
            GameStatus::Dying => self.schedule(DEATH_DURATION_MS, Transition::DeathResolved),
            GameStatus::LevelComplete => {
                self.schedule(LEVEL_COMPLETE_DURATION_MS, Transition::ResumePlay)
            }
            _ => {}
        }
    }

    fn invalidate_pending(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    fn lane_seed(&self) -> u64 {
        self.seed.wrapping_add(self.generation)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Direction(direction) => {
                self.handle_direction(direction);
            }
            InputEvent::Action(action) => self.handle_action(action),
        }
    }

    /// Hop request; returns whether the hop happened
    pub fn handle_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing || self.paused {
            return false;
        }
        if !self.player.hop(direction) {
            return false;
        }
        self.events.push(GameEvent::Hopped(direction));

        let row = self.player.position().y;
        log::debug!("Hop {direction:?} to {:?}", self.player.position());
        if direction == Direction::Up && row < self.furthest_row {
            self.furthest_row = row;
            self.score.add_hop_forward();
            self.check_extra_life();
        }

        if direction == Direction::Up && row == HOME_ROW {
            self.land_on_home_row();
        }
        true
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Start => {
                if matches!(self.status, GameStatus::Title | GameStatus::GameOver) {
                    self.reset();
                }
            }
            Action::Pause => {
                if self.status == GameStatus::Playing {
                    self.paused = !self.paused;
                    log::info!("Paused: {}", self.paused);
                }
            }
        }
    }

    /// Advance the game by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32) {
        // A transition that fires this tick used up the tick's time
        let transitioned = self.advance_pending(dt_ms);

        if !transitioned && self.status == GameStatus::Playing && !self.paused {
            self.step(dt_ms);
        }

        if let Some(mut observer) = self.observer.take() {
            observer(&self.snapshot());
            self.observer = Some(observer);
        }
    }

    fn step(&mut self, dt_ms: f32) {
        self.player.update(dt_ms);
        for lane in &mut self.lanes {
            lane.update(dt_ms);
        }

        if let Some(cause) = self.resolve_collisions() {
            self.die(cause);
            return;
        }

        if self.carried_off() {
            self.die(DeathCause::CarriedOff);
            return;
        }

        self.time_remaining -= dt_ms / 1000.0;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.die(DeathCause::TimeUp);
        }
    }

    /// Collision outcome for the player's committed row
    fn resolve_collisions(&mut self) -> Option<DeathCause> {
        let row = self.player.position().y;
        let lane = self.lanes.iter().find(|l| l.row() == row);

        match LaneKind::for_row(row) {
            LaneKind::Road => {
                self.player.update_riding(None);
                let hitbox = self.player.hitbox();
                let hit = lane.is_some_and(|lane| road_collision(&hitbox, lane.objects()));
                hit.then_some(DeathCause::Traffic)
            }
            LaneKind::River => {
                let Some(lane) = lane else {
                    log::warn!("No lane generated for river row {row}");
                    return Some(DeathCause::Drowned);
                };

                // Catch up with where the carrying object moved this tick
                let current = self.player.riding().and_then(|ride| {
                    lane.objects()
                        .iter()
                        .find(|obj| obj.id == ride.id && obj.row == ride.row)
                        .map(MovingObject::state)
                });
                if current.is_some() {
                    self.player.update_riding(current);
                }

                let hitbox = self.player.hitbox();
                match river_support(&hitbox, lane.objects()) {
                    Some(object) => {
                        self.player.update_riding(Some(object));
                        None
                    }
                    None => Some(DeathCause::Drowned),
                }
            }
            LaneKind::Safe | LaneKind::Home => {
                self.player.update_riding(None);
                None
            }
        }
    }

    /// Riding object gone from view, or the player pushed past the screen edge
    fn carried_off(&self) -> bool {
        let Some(object) = self.player.riding() else {
            return false;
        };
        let center = self.player.hitbox().center().x;
        object.fully_outside_view() || !(0.0..CANVAS_WIDTH).contains(&center)
    }

    fn land_on_home_row(&mut self) {
        let column = self.player.position().x;
        let Some(index) = self.homes.find_home_at_column(column) else {
            self.die(DeathCause::MissedHome);
            return;
        };

        self.homes.fill_home(index);
        self.score.add_home();
        self.events.push(GameEvent::HomeFilled { index });
        log::info!("Home {} filled ({}/5)", index, self.homes.filled_count());
        self.check_extra_life();

        if self.homes.all_homes_filled() {
            self.advance_level();
        } else {
            self.respawn_for_attempt();
        }
    }

    fn respawn_for_attempt(&mut self) {
        self.player.respawn();
        self.furthest_row = PLAYER_START_Y;
        self.max_time = time_limit_for_level(self.level);
        self.time_remaining = self.max_time;
        self.events.push(GameEvent::Respawned);
    }

    fn advance_level(&mut self) {
        let award = self.score.add_level_complete(self.time_remaining);
        self.check_extra_life();
        self.level += 1;
        self.homes.reset();
        self.lanes = lanes_for_level(self.level, self.lane_seed());
        self.respawn_for_attempt();
        self.status = GameStatus::LevelComplete;
        self.events.push(GameEvent::LevelComplete { level: self.level });
        log::info!(
            "Level complete: +{} (time bonus {}), now level {}",
            award.total,
            award.time_bonus,
            self.level
        );
        self.schedule(LEVEL_COMPLETE_DURATION_MS, Transition::ResumePlay);
    }

    fn die(&mut self, cause: DeathCause) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.player.die();
        self.lives = self.lives.saturating_sub(1);
        self.status = GameStatus::Dying;
        self.events.push(GameEvent::Died(cause));
        log::info!("Player died ({cause:?}), {} lives left", self.lives);
        self.schedule(DEATH_DURATION_MS, Transition::DeathResolved);
    }

    fn check_extra_life(&mut self) {
        while self.score.score() >= self.next_extra_life {
            self.next_extra_life += EXTRA_LIFE_SCORE;
            self.lives = self.lives.saturating_add(1);
            self.events.push(GameEvent::ExtraLife { lives: self.lives });
            log::info!("Extra life! {} lives", self.lives);
        }
    }

    fn schedule(&mut self, delay_ms: f32, transition: Transition) {
        self.pending.push(Deferred {
            remaining_ms: delay_ms,
            generation: self.generation,
            transition,
        });
    }

    /// Count down scheduled transitions; true if any was applied
    fn advance_pending(&mut self, dt_ms: f32) -> bool {
        let mut due = Vec::new();
        self.pending.retain_mut(|deferred| {
            deferred.remaining_ms -= dt_ms;
            if deferred.remaining_ms <= 0.0 {
                due.push(*deferred);
                false
            } else {
                true
            }
        });

        let mut applied = false;
        for deferred in due {
            if deferred.generation != self.generation {
                log::debug!("Dropping stale {:?}", deferred.transition);
                continue;
            }
            self.apply(deferred.transition);
            applied = true;
        }
        applied
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::DeathResolved if self.status == GameStatus::Dying => {
                if self.lives == 0 {
                    self.status = GameStatus::GameOver;
                    let new_high_score = self.score.check_high_score(self.store.as_mut());
                    self.events.push(GameEvent::GameOver {
                        score: self.score.score(),
                        new_high_score,
                    });
                    log::info!("Game over, final score {}", self.score.score());
                } else {
                    self.respawn_for_attempt();
                    self.status = GameStatus::Playing;
                }
            }
            Transition::ResumePlay if self.status == GameStatus::LevelComplete => {
                self.status = GameStatus::Playing;
            }
            _ => {}
        }
    }

    /// Events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player.state(),
            score: self.score.score(),
            high_score: self.score.high_score(),
            lives: self.lives,
            level: self.level,
            time_remaining: self.time_remaining,
            max_time: self.max_time,
            lanes: self.lanes.iter().map(Lane::state).collect(),
            homes: self.homes.state(),
            status: self.status,
            paused: self.paused,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_lanes(&mut self, lanes: Vec<Lane>) {
        self.lanes = lanes;
    }
}

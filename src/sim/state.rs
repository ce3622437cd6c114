//! Core simulation types and read-only snapshots
//!
//! Everything a renderer or UI sees lives here as plain serializable values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Grid cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Fixed spawn cell for the player
    pub const fn start() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }

    /// Neighbouring cell one step in `direction` (may be outside the grid)
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.x) && (0..GRID_ROWS).contains(&self.y)
    }
}

/// Player hop direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta (y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Non-directional player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Start a new game from the title or game-over screen
    Start,
    /// Toggle pause while playing
    Pause,
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    Direction(Direction),
    Action(Action),
}

/// Horizontal travel direction of a lane and its objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Heading {
    Left,
    #[default]
    Right,
}

impl Heading {
    /// Sign applied to x movement
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// What a row is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    Safe,
    Road,
    River,
    Home,
}

impl LaneKind {
    /// Fixed row layout of the playfield
    pub fn for_row(row: i32) -> Self {
        if row == HOME_ROW {
            LaneKind::Home
        } else if RIVER_ROWS.contains(&row) {
            LaneKind::River
        } else if ROAD_ROWS.contains(&row) {
            LaneKind::Road
        } else {
            LaneKind::Safe
        }
    }
}

/// Moving entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Car,
    Truck,
    Log,
}

/// Observable state of a moving object at one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingObjectState {
    /// Unique within the owning lane
    pub id: u32,
    pub kind: ObjectKind,
    /// Left edge in pixels
    pub x: f32,
    /// Grid row
    pub row: i32,
    /// Width in cells
    pub width: u32,
    /// Pixels per nominal frame
    pub speed: f32,
    pub heading: Heading,
    /// Visual variant (0-3)
    pub variant: u8,
}

impl MovingObjectState {
    /// Same physical object (ids are only unique per row)
    pub fn is_same_object(&self, other: &MovingObjectState) -> bool {
        self.id == other.id && self.row == other.row
    }

    /// Right edge in pixels
    pub fn right(&self) -> f32 {
        self.x + self.width as f32 * CELL_SIZE
    }

    /// Completely outside the visible width on either side
    pub fn fully_outside_view(&self) -> bool {
        self.right() <= 0.0 || self.x >= CANVAS_WIDTH
    }
}

/// Observable state of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Committed logical cell
    pub position: Position,
    pub alive: bool,
    pub riding: Option<MovingObjectState>,
    pub hopping: bool,
    pub hop_progress: f32,
    pub hop_direction: Option<Direction>,
    pub hop_start: Option<Position>,
    /// Interpolated top-left pixel position for drawing
    pub render_pos: Vec2,
}

/// Observable state of a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneState {
    pub row: i32,
    pub kind: LaneKind,
    pub heading: Heading,
    pub speed: f32,
    pub object_kind: ObjectKind,
    pub object_width: u32,
    pub spawn_interval: f32,
    pub frames_since_spawn: f32,
    /// Spawn order
    pub objects: Vec<MovingObjectState>,
}

/// One target slot on the home row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSlot {
    pub column: i32,
    pub filled: bool,
}

/// Authoritative game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the first start action
    Title,
    /// Active gameplay
    Playing,
    /// Death animation running, respawn or game over pending
    Dying,
    /// Out of lives
    GameOver,
    /// All homes filled, next level pending
    LevelComplete,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit by road traffic
    Traffic,
    /// Fell in the river
    Drowned,
    /// Carried off screen by a log
    CarriedOff,
    /// Landed on the home row away from an open slot
    MissedHome,
    /// Level timer ran out
    TimeUp,
}

/// Notable things that happened, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    Hopped(Direction),
    Died(DeathCause),
    Respawned,
    HomeFilled { index: usize },
    LevelComplete { level: u32 },
    ExtraLife { lives: u8 },
    GameOver { score: u64, new_high_score: bool },
}

/// Immutable copy of the whole game for renderers and UIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: PlayerState,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u32,
    pub time_remaining: f32,
    pub max_time: f32,
    /// Lane order as generated (river rows first, then road rows)
    pub lanes: Vec<LaneState>,
    pub homes: Vec<HomeSlot>,
    pub status: GameStatus,
    pub paused: bool,
}

impl GameSnapshot {
    pub fn lane(&self, row: i32) -> Option<&LaneState> {
        self.lanes.iter().find(|l| l.row == row)
    }
}

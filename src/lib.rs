//! Hopper - A grid-based road and river crossing arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (player, lanes, collisions, game orchestration)
//! - `tuning`: Data-driven lane tables and level difficulty
//! - `platform`: Frame loop and input event queue
//! - `persistence`: Best score storage
//! - `renderer`: Snapshot consumers
//! - `session`: Wires the game to a driver, input, renderer and sound

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_COLS: i32 = 13;
    pub const GRID_ROWS: i32 = 14;
    /// Cell edge in pixels
    pub const CELL_SIZE: f32 = 40.0;
    /// Visible playfield width in pixels (520)
    pub const CANVAS_WIDTH: f32 = GRID_COLS as f32 * CELL_SIZE;
    /// Visible playfield height in pixels (560)
    pub const CANVAS_HEIGHT: f32 = GRID_ROWS as f32 * CELL_SIZE;

    /// Player start cell (bottom safe row, middle column)
    pub const PLAYER_START_X: i32 = 6;
    pub const PLAYER_START_Y: i32 = 13;
    /// Player hitbox edge as a fraction of the cell
    pub const PLAYER_HITBOX_SCALE: f32 = 0.8;

    /// Home slots on the top row
    pub const HOME_COLUMNS: [i32; 5] = [1, 4, 7, 10, 12];
    pub const HOME_ROW: i32 = 0;

    /// Row layout
    pub const RIVER_ROWS: [i32; 4] = [1, 2, 3, 4];
    pub const ROAD_ROWS: [i32; 7] = [6, 7, 8, 9, 10, 11, 12];
    pub const SAFE_ROWS: [i32; 2] = [5, 13];

    /// Timing (milliseconds)
    pub const HOP_DURATION_MS: f32 = 100.0;
    pub const HOP_COOLDOWN_MS: f32 = 50.0;
    pub const DEATH_DURATION_MS: f32 = 500.0;
    pub const LEVEL_COMPLETE_DURATION_MS: f32 = 2000.0;
    /// Nominal frame length that object speeds are expressed against (~60 fps)
    pub const NOMINAL_FRAME_MS: f32 = 16.67;

    /// Game rules
    pub const INITIAL_LIVES: u8 = 3;
    /// Level 1 time limit (seconds)
    pub const INITIAL_TIME: f32 = 60.0;
    /// Time limit floor (seconds)
    pub const MIN_TIME: f32 = 30.0;
    /// Time limit lost per level (seconds)
    pub const TIME_STEP_PER_LEVEL: f32 = 2.0;
    pub const EXTRA_LIFE_SCORE: u64 = 10_000;

    /// Scoring
    pub const POINTS_HOP_FORWARD: u64 = 10;
    pub const POINTS_HOME: u64 = 50;
    pub const POINTS_ALL_HOMES: u64 = 1000;
    /// Per whole second remaining at level completion
    pub const POINTS_TIME_BONUS: u64 = 10;

    /// Object sizes (cells)
    pub const CAR_WIDTH: u32 = 1;
    pub const TRUCK_WIDTH: u32 = 2;
    pub const SHORT_LOG_WIDTH: u32 = 2;
    pub const LONG_LOG_WIDTH: u32 = 4;

    /// Spawn interval floor (frame-units)
    pub const MIN_SPAWN_INTERVAL: f32 = 30.0;
}

/// Pixel-space top-left corner of a grid cell
#[inline]
pub fn cell_to_pixels(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * consts::CELL_SIZE, y as f32 * consts::CELL_SIZE)
}

/// Grid column nearest to a pixel x coordinate, clamped to the grid
#[inline]
pub fn pixels_to_column(x: f32) -> i32 {
    ((x / consts::CELL_SIZE).round() as i32).clamp(0, consts::GRID_COLS - 1)
}

/// Convert a frame delta to nominal frame-units
#[inline]
pub fn frame_units(dt_ms: f32) -> f32 {
    dt_ms / consts::NOMINAL_FRAME_MS
}

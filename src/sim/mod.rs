//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only arrives through `update(dt_ms)`
//! - Seeded per-lane RNG only
//! - Stable iteration order (spawn order within a lane)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod game;
pub mod home;
pub mod lane;
pub mod moving_object;
pub mod player;
pub mod score;
pub mod state;

pub use collision::{Hitbox, Rect, home_reached, river_support, road_collision};
pub use game::{Game, Observer};
pub use home::HomeRegistry;
pub use lane::{Lane, build_lanes, lanes_for_level};
pub use moving_object::MovingObject;
pub use player::Player;
pub use score::{LevelScore, Score, level_score};
pub use state::{
    Action, DeathCause, Direction, GameEvent, GameSnapshot, GameStatus, HomeSlot, InputEvent,
    LaneKind, LaneState, MovingObjectState, ObjectKind, PlayerState, Position,
};

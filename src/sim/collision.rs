//! Collision detection for axis-aligned hitboxes
//!
//! Everything in Hopper is a box on a grid: the player is a shrunken cell,
//! traffic and logs are full-height strips. Overlap is strict, so boxes that
//! only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{HomeSlot, MovingObjectState};

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Anything that occupies a hitbox
pub trait Hitbox {
    fn hitbox(&self) -> Rect;
}

/// Check whether the player hits any road object
///
/// Returns true on the first overlap (death).
pub fn road_collision<'a, T>(player: &Rect, objects: impl IntoIterator<Item = &'a T>) -> bool
where
    T: Hitbox + 'a,
{
    objects.into_iter().any(|obj| player.overlaps(&obj.hitbox()))
}

/// Find the river object carrying the player
///
/// First overlap in iteration order wins. `None` means the player is in the water.
pub fn river_support<'a, T>(
    player: &Rect,
    objects: impl IntoIterator<Item = &'a T>,
) -> Option<MovingObjectState>
where
    T: Hitbox + 'a,
    MovingObjectState: From<&'a T>,
{
    objects
        .into_iter()
        .find(|obj| player.overlaps(&obj.hitbox()))
        .map(MovingObjectState::from)
}

/// Index of an open home slot at `column`, if any
pub fn home_reached(column: i32, homes: &[HomeSlot]) -> Option<usize> {
    homes.iter().position(|h| h.column == column && !h.filled)
}

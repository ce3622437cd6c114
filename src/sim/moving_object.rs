//! Cars, trucks and logs

use serde::{Deserialize, Serialize};

use super::collision::{Hitbox, Rect};
use super::state::{Heading, MovingObjectState, ObjectKind};
use crate::consts::*;
use crate::frame_units;

/// A traffic or river entity, owned by its lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Left edge in pixels
    pub x: f32,
    pub row: i32,
    /// Width in cells
    pub width: u32,
    /// Pixels per nominal frame
    pub speed: f32,
    pub heading: Heading,
    pub variant: u8,
}

impl MovingObject {
    /// Spawn fully offscreen on the side it travels away from
    pub fn spawn(
        id: u32,
        kind: ObjectKind,
        row: i32,
        width: u32,
        speed: f32,
        heading: Heading,
        variant: u8,
    ) -> Self {
        let x = match heading {
            Heading::Right => -(width as f32) * CELL_SIZE,
            Heading::Left => CANVAS_WIDTH,
        };
        Self::at(id, kind, row, x, width, speed, heading, variant)
    }

    /// Place an object at an explicit x (scripted layouts, tests)
    #[allow(clippy::too_many_arguments)]
    pub fn at(
        id: u32,
        kind: ObjectKind,
        row: i32,
        x: f32,
        width: u32,
        speed: f32,
        heading: Heading,
        variant: u8,
    ) -> Self {
        Self {
            id,
            kind,
            x,
            row,
            width,
            speed,
            heading,
            variant,
        }
    }

    /// Move along the lane, normalized to the nominal frame length
    pub fn update(&mut self, dt_ms: f32) {
        self.x += self.heading.sign() * self.speed * frame_units(dt_ms);
    }

    /// Width in pixels
    #[inline]
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * CELL_SIZE
    }

    /// True once the object has fully left the view on its far side
    pub fn is_offscreen(&self) -> bool {
        match self.heading {
            Heading::Right => self.x > CANVAS_WIDTH,
            Heading::Left => self.x + self.pixel_width() < 0.0,
        }
    }

    pub fn state(&self) -> MovingObjectState {
        MovingObjectState::from(self)
    }
}

impl Hitbox for MovingObject {
    fn hitbox(&self) -> Rect {
        Rect::new(
            self.x,
            self.row as f32 * CELL_SIZE,
            self.pixel_width(),
            CELL_SIZE,
        )
    }
}

impl From<&MovingObject> for MovingObjectState {
    fn from(obj: &MovingObject) -> Self {
        Self {
            id: obj.id,
            kind: obj.kind,
            x: obj.x,
            row: obj.row,
            width: obj.width,
            speed: obj.speed,
            heading: obj.heading,
            variant: obj.variant,
        }
    }
}

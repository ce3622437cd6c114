//! Lane spawner and mover
//!
//! A lane owns every object in its row. Objects keep spawn order, which is
//! also the order collision checks visit them in.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::moving_object::MovingObject;
use super::state::{Heading, LaneKind, LaneState, ObjectKind};
use crate::consts::*;
use crate::frame_units;
use crate::tuning::{LaneConfig, lane_configs_for_level};

/// One row of traffic or river objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    row: i32,
    kind: LaneKind,
    heading: Heading,
    speed: f32,
    object_kind: ObjectKind,
    object_width: u32,
    spawn_interval: f32,
    frames_since_spawn: f32,
    objects: Vec<MovingObject>,
    next_id: u32,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Seed for one lane's RNG, mixed from game seed, level and row
fn lane_seed(seed: u64, level: u32, row: i32) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((level as u64) << 32)
        .wrapping_add(row as u64)
}

impl Lane {
    pub fn new(config: &LaneConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let object_width = config
            .object_width
            .unwrap_or_else(|| default_width(config.object_kind, &mut rng));
        Self {
            row: config.row,
            kind: config.kind,
            heading: config.heading,
            speed: config.speed,
            object_kind: config.object_kind,
            object_width,
            spawn_interval: config.spawn_interval,
            frames_since_spawn: 0.0,
            objects: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    /// Advance objects, cull offscreen ones, then spawn on cadence
    pub fn update(&mut self, dt_ms: f32) {
        for obj in &mut self.objects {
            obj.update(dt_ms);
        }
        self.objects.retain(|obj| !obj.is_offscreen());

        self.frames_since_spawn += frame_units(dt_ms);
        if self.frames_since_spawn >= self.spawn_interval {
            self.spawn_object();
            // Overshoot is dropped, not carried into the next interval
            self.frames_since_spawn = 0.0;
        }
    }

    /// Spawn one object at the entry edge
    pub fn spawn_object(&mut self) {
        let width = match self.object_kind {
            ObjectKind::Log => random_log_width(&mut self.rng),
            ObjectKind::Car | ObjectKind::Truck => self.object_width,
        };
        let variant = self.rng.random_range(0..4u8);
        let id = self.next_id;
        self.next_id += 1;

        log::trace!("Lane {} spawned {:?} #{} (width {})", self.row, self.object_kind, id, width);
        self.objects.push(MovingObject::spawn(
            id,
            self.object_kind,
            self.row,
            width,
            self.speed,
            self.heading,
            variant,
        ));
    }

    /// Place an object at an explicit x, keeping the lane's row, speed and heading
    pub fn place_object(&mut self, x: f32, width: u32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(MovingObject::at(
            id,
            self.object_kind,
            self.row,
            x,
            width,
            self.speed,
            self.heading,
            0,
        ));
        id
    }

    pub fn objects(&self) -> &[MovingObject] {
        &self.objects
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn kind(&self) -> LaneKind {
        self.kind
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn state(&self) -> LaneState {
        LaneState {
            row: self.row,
            kind: self.kind,
            heading: self.heading,
            speed: self.speed,
            object_kind: self.object_kind,
            object_width: self.object_width,
            spawn_interval: self.spawn_interval,
            frames_since_spawn: self.frames_since_spawn,
            objects: self.objects.iter().map(MovingObject::state).collect(),
        }
    }
}

fn default_width(kind: ObjectKind, rng: &mut Pcg32) -> u32 {
    match kind {
        ObjectKind::Car => CAR_WIDTH,
        ObjectKind::Truck => TRUCK_WIDTH,
        ObjectKind::Log => random_log_width(rng),
    }
}

fn random_log_width(rng: &mut Pcg32) -> u32 {
    if rng.random_bool(0.5) {
        SHORT_LOG_WIDTH
    } else {
        LONG_LOG_WIDTH
    }
}

/// Build a lane set from explicit configs
pub fn build_lanes(configs: &[LaneConfig], seed: u64, level: u32) -> Vec<Lane> {
    configs
        .iter()
        .map(|config| Lane::new(config, lane_seed(seed, level, config.row)))
        .collect()
}

/// Fresh lane set for a level, scaled to its difficulty
pub fn lanes_for_level(level: u32, seed: u64) -> Vec<Lane> {
    let lanes = build_lanes(&lane_configs_for_level(level), seed, level);
    log::info!("Generated {} lanes for level {}", lanes.len(), level);
    lanes
}

//! Data-driven game balance
//!
//! Base lane table for level 1 and the per-level difficulty curve. Lanes are
//! never rescaled in place: each level builds a fresh set from these configs.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{Heading, LaneKind, ObjectKind};

/// Construction parameters for one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub row: i32,
    pub kind: LaneKind,
    #[serde(default)]
    pub heading: Heading,
    /// Pixels per nominal frame
    pub speed: f32,
    #[serde(default)]
    pub object_kind: ObjectKind,
    /// Fixed width override; logs ignore it and pick short/long per spawn
    #[serde(default)]
    pub object_width: Option<u32>,
    /// Frame-units between spawns
    pub spawn_interval: f32,
}

impl LaneConfig {
    const fn new(
        row: i32,
        kind: LaneKind,
        heading: Heading,
        speed: f32,
        object_kind: ObjectKind,
        spawn_interval: f32,
    ) -> Self {
        Self {
            row,
            kind,
            heading,
            speed,
            object_kind,
            object_width: None,
            spawn_interval,
        }
    }
}

/// Level 1 lane table: river rows 1-4, road rows 6-12
pub fn base_lane_configs() -> Vec<LaneConfig> {
    use Heading::{Left, Right};
    use LaneKind::{River, Road};
    use ObjectKind::{Car, Log, Truck};

    vec![
        LaneConfig::new(1, River, Right, 1.2, Log, 150.0),
        LaneConfig::new(2, River, Left, 1.0, Log, 180.0),
        LaneConfig::new(3, River, Right, 1.5, Log, 120.0),
        LaneConfig::new(4, River, Left, 0.8, Log, 200.0),
        LaneConfig::new(6, Road, Left, 2.0, Car, 80.0),
        LaneConfig::new(7, Road, Right, 1.5, Truck, 150.0),
        LaneConfig::new(8, Road, Left, 2.5, Car, 70.0),
        LaneConfig::new(9, Road, Right, 1.8, Car, 90.0),
        LaneConfig::new(10, Road, Left, 2.2, Car, 75.0),
        LaneConfig::new(11, Road, Right, 1.2, Truck, 180.0),
        LaneConfig::new(12, Road, Left, 2.8, Car, 60.0),
    ]
}

/// Difficulty multipliers for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub traffic_speed_multiplier: f32,
    pub river_speed_multiplier: f32,
    /// Applied to spawn intervals (lower = denser traffic)
    pub spawn_density_multiplier: f32,
    /// Seconds
    pub time_limit: f32,
}

/// Difficulty for a 1-based level number
pub fn level_config(level: u32) -> LevelConfig {
    let steps = level.saturating_sub(1) as f32;
    LevelConfig {
        traffic_speed_multiplier: 1.0 + steps * 0.15,
        river_speed_multiplier: 1.0 + steps * 0.10,
        spawn_density_multiplier: 1.0 - steps * 0.05,
        time_limit: time_limit_for_level(level),
    }
}

/// Seconds allowed per attempt: -2 s per level, never below 30 s
pub fn time_limit_for_level(level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (INITIAL_TIME - steps * TIME_STEP_PER_LEVEL).max(MIN_TIME)
}

/// Apply a level's difficulty to a lane table
pub fn scale_lane_configs(configs: &[LaneConfig], level: u32) -> Vec<LaneConfig> {
    let difficulty = level_config(level);

    configs
        .iter()
        .map(|config| {
            let speed_mult = match config.kind {
                LaneKind::River => difficulty.river_speed_multiplier,
                _ => difficulty.traffic_speed_multiplier,
            };
            LaneConfig {
                speed: config.speed * speed_mult,
                spawn_interval: (config.spawn_interval * difficulty.spawn_density_multiplier)
                    .floor()
                    .max(MIN_SPAWN_INTERVAL),
                ..config.clone()
            }
        })
        .collect()
}

/// Scaled base table for a level
pub fn lane_configs_for_level(level: u32) -> Vec<LaneConfig> {
    scale_lane_configs(&base_lane_configs(), level)
}

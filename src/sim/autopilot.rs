//! Simple autopilot used by the headless demo
//!
//! Looks only at a snapshot and picks at most one hop per call. It lines up
//! with the nearest open home on safe rows, then crosses when the next cell
//! looks clear for the length of a hop.

use std::cmp::Ordering;

use super::state::{Direction, GameSnapshot, GameStatus, LaneKind, LaneState, Position};
use crate::consts::*;

/// Frames a hop plus its cooldown take
const LOOKAHEAD_FRAMES: f32 = (HOP_DURATION_MS + HOP_COOLDOWN_MS) / NOMINAL_FRAME_MS;
/// Clearance kept from traffic, pixels
const ROAD_MARGIN: f32 = 4.0;
/// How far past the cell centre a log must reach on both sides, pixels
const LOG_GRIP: f32 = 12.0;

/// Next hop to request, or `None` to wait
pub fn choose(snapshot: &GameSnapshot) -> Option<Direction> {
    if snapshot.status != GameStatus::Playing || snapshot.paused {
        return None;
    }
    let player = &snapshot.player;
    if !player.alive || player.hopping {
        return None;
    }

    let here = player.position;
    let goal = nearest_open_home(snapshot, here.x)?;
    let toward = match goal.cmp(&here.x) {
        Ordering::Less => Some(Direction::Left),
        Ordering::Greater => Some(Direction::Right),
        Ordering::Equal => None,
    };

    let lining_up = here.y == HOME_ROW + 1 || LaneKind::for_row(here.y) == LaneKind::Safe;
    let preferred: Vec<Direction> = match (lining_up, toward) {
        (true, Some(side)) => vec![side],
        (false, Some(side)) => vec![Direction::Up, side],
        (_, None) => vec![Direction::Up],
    };

    if let Some(direction) = preferred
        .into_iter()
        .find(|&d| is_cell_safe(snapshot, here.step(d)))
    {
        return Some(direction);
    }

    if in_danger(snapshot) {
        return [Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .find(|&d| is_cell_safe(snapshot, here.step(d)));
    }
    None
}

fn nearest_open_home(snapshot: &GameSnapshot, column: i32) -> Option<i32> {
    snapshot
        .homes
        .iter()
        .filter(|h| !h.filled)
        .min_by_key(|h| (h.column - column).abs())
        .map(|h| h.column)
}

/// Whether landing on `cell` now looks survivable
fn is_cell_safe(snapshot: &GameSnapshot, cell: Position) -> bool {
    if !cell.in_bounds() {
        return false;
    }
    match LaneKind::for_row(cell.y) {
        LaneKind::Safe => true,
        LaneKind::Home => snapshot
            .homes
            .iter()
            .any(|h| h.column == cell.x && !h.filled),
        LaneKind::Road => snapshot
            .lane(cell.y)
            .is_none_or(|lane| road_clear(lane, cell.x)),
        LaneKind::River => snapshot
            .lane(cell.y)
            .is_some_and(|lane| log_under(lane, cell.x)),
    }
}

/// Pixel drift of a lane's objects over the lookahead
fn drift(lane: &LaneState) -> f32 {
    lane.heading.sign() * lane.speed * LOOKAHEAD_FRAMES
}

fn road_clear(lane: &LaneState, column: i32) -> bool {
    let left = column as f32 * CELL_SIZE - ROAD_MARGIN;
    let right = left + CELL_SIZE + 2.0 * ROAD_MARGIN;
    let d = drift(lane);
    lane.objects.iter().all(|obj| {
        // Space swept between now and the end of the lookahead
        let lo = obj.x.min(obj.x + d);
        let hi = obj.right().max(obj.right() + d);
        hi <= left || lo >= right
    })
}

fn log_under(lane: &LaneState, column: i32) -> bool {
    let center = column as f32 * CELL_SIZE + CELL_SIZE / 2.0;
    let d = drift(lane);
    lane.objects.iter().any(|obj| {
        let grips = |x: f32, right: f32| x <= center - LOG_GRIP && right >= center + LOG_GRIP;
        grips(obj.x, obj.right()) && grips(obj.x + d, obj.right() + d)
    })
}

/// Staying put looks fatal
fn in_danger(snapshot: &GameSnapshot) -> bool {
    let player = &snapshot.player;
    let here = player.position;
    match LaneKind::for_row(here.y) {
        LaneKind::Road => !is_cell_safe(snapshot, here),
        LaneKind::River => {
            let x = player.render_pos.x;
            x < CELL_SIZE / 2.0 || x > CANVAS_WIDTH - CELL_SIZE * 1.5
        }
        LaneKind::Safe | LaneKind::Home => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::game::Game;
    use crate::sim::lane::build_lanes;
    use crate::sim::state::Action;
    use crate::tuning::{LaneConfig, base_lane_configs};

    fn frozen_lanes(logs: bool) -> Vec<crate::sim::lane::Lane> {
        let configs: Vec<LaneConfig> = base_lane_configs()
            .into_iter()
            .map(|c| LaneConfig {
                speed: 0.0,
                spawn_interval: f32::MAX,
                ..c
            })
            .collect();
        let mut lanes = build_lanes(&configs, 1, 1);
        if logs {
            for lane in lanes.iter_mut().filter(|l| l.kind() == LaneKind::River) {
                lane.place_object(0.0, GRID_COLS as u32);
            }
        }
        lanes
    }

    fn started() -> Game {
        let mut game = Game::new(Box::new(MemoryStore::new()), 11);
        game.handle_action(Action::Start);
        game
    }

    #[test]
    fn test_waits_outside_play() {
        let game = Game::new(Box::new(MemoryStore::new()), 1);
        assert_eq!(choose(&game.snapshot()), None);
    }

    #[test]
    fn test_lines_up_with_nearest_home_first() {
        let mut game = started();
        game.set_lanes(frozen_lanes(true));
        // Column 6: nearest open home is column 7
        assert_eq!(choose(&game.snapshot()), Some(Direction::Right));
    }

    #[test]
    fn test_waits_for_traffic() {
        let mut game = started();
        let mut lanes = frozen_lanes(true);
        let row_12 = lanes.iter_mut().find(|l| l.row() == 12).expect("road row 12");
        row_12.place_object(7.0 * CELL_SIZE, 1);
        game.set_lanes(lanes);

        assert!(game.handle_direction(Direction::Right));
        game.update(HOP_DURATION_MS);
        game.update(HOP_COOLDOWN_MS);
        assert_eq!(choose(&game.snapshot()), None);
    }

    #[test]
    fn test_does_not_jump_into_open_water() {
        let mut game = started();
        game.set_lanes(frozen_lanes(false));
        let mut snapshot = game.snapshot();
        snapshot.player.position = Position::new(7, 5);
        assert_eq!(choose(&snapshot), None);
    }

    #[test]
    fn test_crosses_and_fills_a_home() {
        let mut game = started();
        game.set_lanes(frozen_lanes(true));

        for _ in 0..2_000 {
            if let Some(direction) = choose(&game.snapshot()) {
                game.handle_direction(direction);
            }
            game.update(NOMINAL_FRAME_MS);
            if game.snapshot().homes.iter().any(|h| h.filled) {
                break;
            }
        }
        assert!(game.snapshot().homes.iter().any(|h| h.filled));
        assert_eq!(game.lives(), INITIAL_LIVES);
    }
}

//! Player hop state machine
//!
//! Idle -> Hopping -> Cooldown -> Idle. The logical cell changes the moment a
//! hop is accepted; only the drawn position lags behind while `hop_progress`
//! runs from 0 to 1. Collisions always use the logical cell.

use glam::Vec2;

use super::collision::{Hitbox, Rect};
use super::state::{Direction, MovingObjectState, PlayerState, Position};
use crate::consts::*;
use crate::{cell_to_pixels, pixels_to_column};

/// Gap between the cell edge and the player hitbox
const HITBOX_INSET: f32 = (CELL_SIZE - CELL_SIZE * PLAYER_HITBOX_SCALE) / 2.0;

/// Current ride: the carried object and where on it the player stands
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ride {
    object: MovingObjectState,
    /// Player pixel x minus object x
    offset: f32,
}

/// The hopper
#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    alive: bool,
    ride: Option<Ride>,
    hopping: bool,
    hop_progress: f32,
    hop_direction: Option<Direction>,
    hop_start: Option<Position>,
    /// Milliseconds left before another hop is accepted
    hop_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Position::start(),
            alive: true,
            ride: None,
            hopping: false,
            hop_progress: 0.0,
            hop_direction: None,
            hop_start: None,
            hop_cooldown: 0.0,
        }
    }

    /// Try to hop one cell
    ///
    /// Rejected without any state change while dead, mid-hop, cooling down,
    /// or when the target cell is off the grid.
    pub fn hop(&mut self, direction: Direction) -> bool {
        if !self.alive || self.hopping || self.hop_cooldown > 0.0 {
            return false;
        }

        let target = self.position.step(direction);
        if !target.in_bounds() {
            return false;
        }

        self.hop_start = Some(self.position);
        self.hop_direction = Some(direction);
        self.hopping = true;
        self.hop_progress = 0.0;
        self.position = target;
        // Leaving the log; the next collision pass decides what carries us
        self.ride = None;

        true
    }

    /// Advance the hop animation and cooldown
    pub fn update(&mut self, dt_ms: f32) {
        if self.hopping {
            self.hop_progress += dt_ms / HOP_DURATION_MS;
            if self.hop_progress >= 1.0 {
                self.hop_progress = 1.0;
                self.hopping = false;
                self.hop_start = None;
                self.hop_direction = None;
                self.hop_cooldown = HOP_COOLDOWN_MS;
            }
        }
        // The tick that lands the hop already counts against the cooldown
        if self.hop_cooldown > 0.0 {
            self.hop_cooldown = (self.hop_cooldown - dt_ms).max(0.0);
        }
    }

    /// Couple (or uncouple) the player to a river object for this tick
    ///
    /// A new object captures the player's current offset along it; the same
    /// object seen again keeps that offset so the player drifts with it.
    pub fn update_riding(&mut self, object: Option<MovingObjectState>) {
        self.ride = match (self.ride, object) {
            (_, None) => None,
            (Some(ride), Some(obj)) if ride.object.is_same_object(&obj) => Some(Ride {
                object: obj,
                offset: ride.offset,
            }),
            (_, Some(obj)) => Some(Ride {
                object: obj,
                offset: self.pixel_x() - obj.x,
            }),
        };

        if self.ride.is_some() {
            self.position.x = pixels_to_column(self.pixel_x());
        }
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Back to the start cell with all hop and ride state cleared
    pub fn respawn(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_hopping(&self) -> bool {
        self.hopping
    }

    pub fn riding(&self) -> Option<&MovingObjectState> {
        self.ride.as_ref().map(|r| &r.object)
    }

    /// Left edge of the occupied cell in pixels, following the ride if any
    fn pixel_x(&self) -> f32 {
        match self.ride {
            Some(ride) => ride.object.x + ride.offset,
            None => self.position.x as f32 * CELL_SIZE,
        }
    }

    /// Interpolated top-left pixel position for drawing
    pub fn render_position(&self) -> Vec2 {
        let target = Vec2::new(self.pixel_x(), self.position.y as f32 * CELL_SIZE);
        match self.hop_start {
            Some(start) if self.hopping => cell_to_pixels(start.x, start.y).lerp(target, self.hop_progress),
            _ => target,
        }
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            position: self.position,
            alive: self.alive,
            riding: self.riding().copied(),
            hopping: self.hopping,
            hop_progress: self.hop_progress,
            hop_direction: self.hop_direction,
            hop_start: self.hop_start,
            render_pos: self.render_position(),
        }
    }
}

impl Hitbox for Player {
    fn hitbox(&self) -> Rect {
        let size = CELL_SIZE * PLAYER_HITBOX_SCALE;
        Rect::new(
            self.pixel_x() + HITBOX_INSET,
            self.position.y as f32 * CELL_SIZE + HITBOX_INSET,
            size,
            size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Heading, ObjectKind};
    use proptest::prelude::*;

    fn log_at(id: u32, x: f32) -> MovingObjectState {
        MovingObjectState {
            id,
            kind: ObjectKind::Log,
            x,
            row: PLAYER_START_Y,
            width: 4,
            speed: 1.0,
            heading: Heading::Right,
            variant: 0,
        }
    }

    #[test]
    fn test_starts_idle_at_start_cell() {
        let player = Player::new();
        assert_eq!(player.position(), Position::new(PLAYER_START_X, PLAYER_START_Y));
        assert!(player.is_alive());
        assert!(!player.is_hopping());
        assert!(player.riding().is_none());
    }

    #[test]
    fn test_hop_commits_position_immediately() {
        let mut player = Player::new();
        assert!(player.hop(Direction::Up));
        let state = player.state();
        assert_eq!(state.position, Position::new(6, 12));
        assert_eq!(state.hop_start, Some(Position::new(6, 13)));
        assert_eq!(state.hop_direction, Some(Direction::Up));
        assert!(state.hopping);
        assert_eq!(state.hop_progress, 0.0);
    }

    #[test]
    fn test_second_hop_rejected_until_hop_and_cooldown_finish() {
        let mut player = Player::new();
        assert!(player.hop(Direction::Up));
        player.update(NOMINAL_FRAME_MS);
        assert!(!player.hop(Direction::Up));
        assert_eq!(player.position(), Position::new(6, 12));

        // Hop lands on the sixth frame and the cooldown starts counting then
        for _ in 0..4 {
            player.update(NOMINAL_FRAME_MS);
        }
        assert!(player.is_hopping());
        player.update(NOMINAL_FRAME_MS);
        assert!(!player.is_hopping());
        assert!(!player.hop(Direction::Up));

        player.update(NOMINAL_FRAME_MS);
        assert!(!player.hop(Direction::Up));
        player.update(NOMINAL_FRAME_MS);
        assert!(player.hop(Direction::Up));
        assert_eq!(player.position(), Position::new(6, 11));
    }

    #[test]
    fn test_landing_tick_counts_toward_cooldown() {
        let mut player = Player::new();
        player.hop(Direction::Left);
        // One frame long enough for the hop and the whole cooldown
        player.update(HOP_DURATION_MS + HOP_COOLDOWN_MS);
        assert!(!player.is_hopping());
        assert!(player.hop(Direction::Left));
    }

    #[test]
    fn test_hop_progress_clamps() {
        let mut player = Player::new();
        player.hop(Direction::Left);
        player.update(HOP_DURATION_MS * 3.0);
        let state = player.state();
        assert_eq!(state.hop_progress, 1.0);
        assert!(state.hop_start.is_none());
        assert!(state.hop_direction.is_none());
    }

    #[test]
    fn test_hop_out_of_bounds_rejected() {
        let mut player = Player::new();
        // Start row is the bottom row
        assert!(!player.hop(Direction::Down));
        assert_eq!(player.position(), Position::start());
        assert!(!player.is_hopping());
    }

    #[test]
    fn test_dead_player_cannot_hop() {
        let mut player = Player::new();
        player.die();
        assert!(!player.hop(Direction::Up));
        assert_eq!(player.position(), Position::start());
    }

    #[test]
    fn test_respawn_clears_everything() {
        let mut player = Player::new();
        player.hop(Direction::Up);
        player.update_riding(Some(log_at(1, 200.0)));
        player.die();
        player.respawn();
        let state = player.state();
        assert_eq!(state.position, Position::start());
        assert!(state.alive);
        assert!(state.riding.is_none());
        assert!(!state.hopping);
        assert!(state.hop_start.is_none());
        assert!(player.hop(Direction::Up));
    }

    #[test]
    fn test_riding_moves_hitbox_with_object() {
        let mut player = Player::new();
        let start_x = player.hitbox().min.x;

        player.update_riding(Some(log_at(1, 200.0)));
        assert_eq!(player.hitbox().min.x, start_x);

        player.update_riding(Some(log_at(1, 230.0)));
        assert!((player.hitbox().min.x - (start_x + 30.0)).abs() < 1e-4);
        assert!((player.render_position().x - (6.0 * CELL_SIZE + 30.0)).abs() < 1e-4);
        // Column follows the drift
        assert_eq!(player.position().x, 7);

        player.update_riding(None);
        assert!(player.riding().is_none());
        assert_eq!(player.hitbox().min.x, 7.0 * CELL_SIZE + HITBOX_INSET);
    }

    #[test]
    fn test_riding_hitbox_x_is_object_x_plus_boarding_offset() {
        let mut player = Player::new();
        // Boards a log whose left edge is two cells behind the player
        player.update_riding(Some(log_at(1, 160.0)));
        let hb = player.hitbox();
        assert_eq!(hb.min.x, 160.0 + 80.0 + HITBOX_INSET);
        assert_eq!(hb.min.x, 6.0 * CELL_SIZE + HITBOX_INSET);

        player.update_riding(Some(log_at(1, 170.0)));
        assert_eq!(player.hitbox().min.x, 170.0 + 80.0 + HITBOX_INSET);
        assert_eq!(player.position().x, 6);
    }

    #[test]
    fn test_new_object_recaptures_offset() {
        let mut player = Player::new();
        player.update_riding(Some(log_at(1, 200.0)));
        player.update_riding(Some(log_at(1, 210.0)));
        let before = player.hitbox().min.x;
        // A different object under the player does not teleport them
        player.update_riding(Some(log_at(2, 100.0)));
        assert_eq!(player.hitbox().min.x, before);
    }

    #[test]
    fn test_hitbox_is_centered_and_scaled() {
        let player = Player::new();
        let hb = player.hitbox();
        let size = CELL_SIZE * PLAYER_HITBOX_SCALE;
        assert_eq!(hb.size.x, size);
        assert_eq!(hb.size.y, size);
        let cell_center = cell_to_pixels(PLAYER_START_X, PLAYER_START_Y) + Vec2::splat(CELL_SIZE / 2.0);
        assert!((hb.center() - cell_center).length() < 1e-4);
    }

    #[test]
    fn test_render_position_interpolates() {
        let mut player = Player::new();
        player.hop(Direction::Up);
        player.update(HOP_DURATION_MS / 2.0);
        let pos = player.render_position();
        assert!((pos.y - 12.5 * CELL_SIZE).abs() < 1e-3);
        assert_eq!(pos.x, 6.0 * CELL_SIZE);
    }

    proptest! {
        #[test]
        fn prop_hop_moves_one_cell_or_rejects(
            x in 0..GRID_COLS,
            y in 0..GRID_ROWS,
            dir_index in 0usize..4,
        ) {
            let direction = Direction::ALL[dir_index];
            let mut player = Player::new();
            player.position = Position::new(x, y);

            let target = Position::new(x, y).step(direction);
            let accepted = player.hop(direction);

            prop_assert_eq!(accepted, target.in_bounds());
            if accepted {
                prop_assert_eq!(player.position(), target);
                let (dx, dy) = direction.delta();
                prop_assert_eq!((player.position().x - x).abs() + (player.position().y - y).abs(), 1);
                prop_assert_eq!((player.position().x - x, player.position().y - y), (dx, dy));
            } else {
                prop_assert_eq!(player.position(), Position::new(x, y));
                prop_assert!(!player.is_hopping());
            }
        }

        #[test]
        fn prop_hop_mid_flight_always_rejected(dt in 0.0f32..(HOP_DURATION_MS - 0.01)) {
            let mut player = Player::new();
            prop_assert!(player.hop(Direction::Up));
            player.update(dt);
            let before = player.position();
            prop_assert!(!player.hop(Direction::Left));
            prop_assert_eq!(player.position(), before);
        }
    }
}

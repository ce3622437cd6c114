//! ASCII renderer
//!
//! One character per grid cell plus a HUD line and a status line:
//!
//! ```text
//! SCORE 000130  HI 000500  LIVES 3  LEVEL 1  TIME 57
//! #o##o##H##o#o
//! ~~====~~~~==~
//! ```

use super::Renderer;
use crate::consts::*;
use crate::sim::state::{GameSnapshot, GameStatus, LaneKind, LaneState, ObjectKind};

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.frame = draw(snapshot);
    }
}

fn draw(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "SCORE {:06}  HI {:06}  LIVES {}  LEVEL {}  TIME {}\n",
        snapshot.score,
        snapshot.high_score,
        snapshot.lives,
        snapshot.level,
        snapshot.time_remaining.ceil() as u32,
    ));

    let player = &snapshot.player;
    for row in 0..GRID_ROWS {
        let mut line = base_row(snapshot, row);
        if let Some(lane) = snapshot.lane(row) {
            draw_objects(&mut line, lane);
        }
        if player.position.y == row {
            let column = player.position.x.clamp(0, GRID_COLS - 1) as usize;
            line[column] = if player.alive { '@' } else { 'X' };
        }
        out.extend(line);
        out.push('\n');
    }

    if let Some(banner) = status_banner(snapshot) {
        out.push_str(banner);
        out.push('\n');
    }
    out
}

fn base_row(snapshot: &GameSnapshot, row: i32) -> Vec<char> {
    let fill = match LaneKind::for_row(row) {
        LaneKind::Home => '#',
        LaneKind::River => '~',
        LaneKind::Road => '.',
        LaneKind::Safe => '_',
    };
    let mut line = vec![fill; GRID_COLS as usize];
    if row == HOME_ROW {
        for home in &snapshot.homes {
            if let Some(cell) = line.get_mut(home.column as usize) {
                *cell = if home.filled { 'H' } else { 'o' };
            }
        }
    }
    line
}

/// Mark every cell whose centre an object covers
fn draw_objects(line: &mut [char], lane: &LaneState) {
    for obj in &lane.objects {
        let glyph = match obj.kind {
            ObjectKind::Car => 'c',
            ObjectKind::Truck => 'T',
            ObjectKind::Log => '=',
        };
        for (column, cell) in line.iter_mut().enumerate() {
            let center = column as f32 * CELL_SIZE + CELL_SIZE / 2.0;
            if center >= obj.x && center < obj.right() {
                *cell = glyph;
            }
        }
    }
}

fn status_banner(snapshot: &GameSnapshot) -> Option<&'static str> {
    if snapshot.paused {
        return Some("PAUSED");
    }
    match snapshot.status {
        GameStatus::Title => Some("HOPPER - PRESS SPACE"),
        GameStatus::GameOver => Some("GAME OVER - PRESS SPACE"),
        GameStatus::LevelComplete => Some("LEVEL COMPLETE"),
        GameStatus::Playing | GameStatus::Dying => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::game::Game;
    use crate::sim::state::{Action, Direction};

    fn rows(frame: &str) -> Vec<&str> {
        frame.lines().collect()
    }

    #[test]
    fn test_title_frame_layout() {
        let game = Game::new(Box::new(MemoryStore::with_score(500)), 1);
        let mut renderer = TextRenderer::new();
        renderer.render(&game.snapshot());

        let lines = rows(renderer.frame());
        // HUD, 14 grid rows, banner
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("SCORE 000000  HI 000500  LIVES 3  LEVEL 1  TIME 60"));
        assert_eq!(lines[1], "#o##o##o##o#o");
        assert_eq!(lines[15], "HOPPER - PRESS SPACE");
        assert!(lines[1..15].iter().all(|l| l.chars().count() == GRID_COLS as usize));
        // Player on the start cell
        assert_eq!(lines[14].chars().nth(PLAYER_START_X as usize), Some('@'));
    }

    #[test]
    fn test_draws_objects_and_homes() {
        let mut game = Game::new(Box::new(MemoryStore::new()), 1);
        game.handle_action(Action::Start);
        game.handle_action(Action::Pause);

        let mut snapshot = game.snapshot();
        snapshot.homes[2].filled = true;
        let mut renderer = TextRenderer::new();
        renderer.render(&snapshot);
        let lines = rows(renderer.frame());
        assert_eq!(lines[1], "#o##o##H##o#o");
        assert_eq!(lines.last().copied(), Some("PAUSED"));

        // Advance until traffic shows up somewhere on the road
        game.handle_action(Action::Pause);
        game.set_lanes(crate::sim::lane::lanes_for_level(1, 3));
        for _ in 0..300 {
            game.update(NOMINAL_FRAME_MS);
        }
        renderer.render(&game.snapshot());
        let frame = renderer.frame();
        assert!(frame.contains('c') || frame.contains('T'));
        assert!(frame.contains('='));
    }

    #[test]
    fn test_dead_player_is_marked() {
        let mut game = Game::new(Box::new(MemoryStore::new()), 1);
        game.handle_action(Action::Start);
        game.update(61_000.0);
        let mut renderer = TextRenderer::new();
        renderer.render(&game.snapshot());
        assert!(renderer.frame().contains('X'));
        assert!(!game.handle_direction(Direction::Up));
    }
}

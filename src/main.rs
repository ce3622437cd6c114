//! Hopper entry point
//!
//! Runs a headless demo: the autopilot plays for a fixed number of frames
//! and the final ASCII frame is printed.
//!
//! Usage: `hopper [settings.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hopper::audio::LogOutput;
use hopper::consts::NOMINAL_FRAME_MS;
use hopper::renderer::TextRenderer;
use hopper::sim::autopilot;
use hopper::sim::state::{Action, GameStatus, InputEvent};
use hopper::{Session, Settings};

fn main() {
    env_logger::init();
    log::info!("Hopper (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hopper_settings.json"));
    let settings = Settings::load(&settings_path);

    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut session = Session::from_settings(
        &settings,
        clock_seed,
        TextRenderer::new(),
        Box::new(LogOutput),
        Box::new(LogOutput),
    );

    let frame_ms = f64::from(NOMINAL_FRAME_MS);
    let mut now = 0.0;
    session.start(now);
    session.push_input(InputEvent::Action(Action::Start));

    let mut games = 1;
    for _ in 0..settings.demo_frames {
        let snapshot = session.snapshot();
        if snapshot.status == GameStatus::GameOver {
            log::info!("Game {games} over with {} points", snapshot.score);
            games += 1;
            session.push_input(InputEvent::Action(Action::Start));
        } else if let Some(direction) = autopilot::choose(&snapshot) {
            session.push_input(InputEvent::Direction(direction));
        }

        now += frame_ms;
        session.frame(now);
    }
    session.stop();

    println!("{}", session.renderer().frame());
    let snapshot = session.snapshot();
    println!(
        "Played {} game(s); level {}, score {}, best {}",
        games, snapshot.level, snapshot.score, snapshot.high_score
    );
}

//! Sort Race entry point
//!
//! Headless frame loop: the demo bot plays the human side against QuickSort
//! at a fixed 60 Hz timestep, then the results are printed.

use std::time::{SystemTime, UNIX_EPOCH};

use sort_race::consts::{FPS, MAX_SUBSTEPS, SIM_DT};
use sort_race::platform::{FrameInput, Key};
use sort_race::sim::{RaceState, tick};
use sort_race::Settings;

/// Give up on a round after this many simulated seconds
const MAX_ROUND_SECS: u32 = 600;

/// Fixed-timestep driver, same shape a windowed loop would use
struct Game {
    state: RaceState,
    frame: FrameInput,
    accumulator: f32,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            state: RaceState::new(settings, seed),
            frame: FrameInput::new(true),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for `dt` seconds of frame time
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.frame.take();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sort Race starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(settings, seed);

    let max_frames = MAX_ROUND_SECS * FPS;
    for _ in 0..max_frames {
        if game.frame.quit {
            break;
        }
        game.update(SIM_DT);
        if game.state.is_over() {
            game.frame.key(Key::Q);
        }
    }

    let snapshot = game.state.snapshot();
    match (snapshot.headline, snapshot.results) {
        (Some(headline), Some(results)) => {
            println!("{}", headline);
            println!("{}", results);
        }
        _ => println!("Round unfinished: {}", game.state.results_text()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}

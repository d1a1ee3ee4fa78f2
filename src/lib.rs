//! Sort Race - You vs QuickSort
//!
//! Core modules:
//! - `sim`: Deterministic race simulation (array pair, quicksort stepper, player swaps, clock)
//! - `platform`: Input mapping from keys to game commands
//! - `layout`: Panel geometry and bar hit-testing
//! - `settings`: Data-driven preferences (array size, pacing, time limit)

pub mod layout;
pub mod platform;
pub mod settings;
pub mod sim;

pub use layout::Layout;
pub use settings::{ArraySize, Settings};

/// Game configuration constants
pub mod consts {
    /// Frame rate of the race loop
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (one tick per frame)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// QuickSort animation pace (steps per second)
    pub const ALGO_STEPS_PER_SEC: f32 = 24.0;
    /// Upper bound on algorithm steps released in a single tick
    pub const MAX_ALGO_STEPS_PER_TICK: u32 = 8;
    /// How long the last algorithm step stays highlighted
    pub const HIGHLIGHT_FADE_SECS: f32 = 0.30;

    /// Bar values are spaced for visible height differences
    pub const VALUE_BASE: u32 = 10;
    pub const VALUE_STEP: u32 = 5;

    /// Window dimensions used by the default layout
    pub const WINDOW_WIDTH: f32 = 1100.0;
    pub const WINDOW_HEIGHT: f32 = 640.0;
    pub const MARGIN: f32 = 16.0;
    pub const PANEL_GAP: f32 = 12.0;
}

/// True when `values` is in ascending (non-decreasing) order
#[inline]
pub fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Convert a tick count to seconds at the fixed timestep
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 * consts::SIM_DT
}

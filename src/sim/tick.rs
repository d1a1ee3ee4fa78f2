//! Fixed timestep race tick
//!
//! Applies one frame of input, paces the quicksort, and updates the clock.

use super::clock::Side;
use super::player::SelectOutcome;
use super::state::RaceState;
use crate::consts::{MAX_ALGO_STEPS_PER_TICK, SIM_DT};
use crate::settings::ArraySize;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Bar clicked on the player's panel
    pub click: Option<usize>,
    /// Restart with a fresh shuffle
    pub restart: bool,
    /// Change array size (restarts)
    pub size: Option<ArraySize>,
    /// Pause toggle for the algorithm side
    pub toggle_pause: bool,
    /// Idle/demo mode - a bot plays the human side
    pub idle_mode: bool,
}

/// Advance the race by one fixed timestep
pub fn tick(state: &mut RaceState, input: &TickInput, dt: f32) {
    // Round changes discard everything else in this tick
    if let Some(size) = input.size {
        state.set_size(size);
        return;
    }
    if input.restart {
        state.restart();
        return;
    }

    state.time_ticks += 1;

    if input.toggle_pause {
        state.paused = !state.paused;
        log::info!("QuickSort {}", if state.paused { "paused" } else { "resumed" });
    }

    if state.is_over() {
        return;
    }

    // Human side (a real click wins over the bot)
    let click = match input.click {
        Some(index) => Some(index),
        None if input.idle_mode => bot_click(state, dt),
        None => None,
    };
    if let Some(index) = click {
        handle_click(state, index);
    }
    if state.player.check_finished() {
        state.finish(Side::Player);
    }

    // Algorithm side
    if !state.paused && !state.stepper.is_done() {
        advance_algorithm(state, dt);
    }

    // Time limit
    if let Some(limit) = state.settings.time_limit_secs {
        let limit_ticks = (limit / SIM_DT).round() as u64;
        let elapsed = state
            .clock
            .elapsed_ticks(Side::Player, state.time_ticks)
            .max(state.clock.elapsed_ticks(Side::Algorithm, state.time_ticks));
        if !state.is_over() && elapsed >= limit_ticks {
            state.clock.end(state.time_ticks);
            log::info!("Round {} hit the {:.0}s time limit: {}", state.round, limit, state.results_text());
        }
    }
}

fn handle_click(state: &mut RaceState, index: usize) {
    let outcome = state.player.select(index);
    log::debug!("click {}: {:?}", index, outcome);
    if let SelectOutcome::Swapped { completed, .. } = outcome {
        state.last_swap_tick = Some(state.time_ticks);
        if completed {
            state.finish(Side::Player);
        }
    }
}

/// Release paced steps from the accumulator
fn advance_algorithm(state: &mut RaceState, dt: f32) {
    let interval = 1.0 / state.settings.algo_steps_per_sec;
    state.step_accumulator += dt;

    let mut steps = 0;
    while state.step_accumulator >= interval && steps < MAX_ALGO_STEPS_PER_TICK {
        state.step_accumulator -= interval;
        state.stepper.step(&mut state.algorithm);
        state.last_step_tick = Some(state.time_ticks);
        steps += 1;

        if state.stepper.is_done() {
            state.step_accumulator = 0.0;
            state.finish(Side::Algorithm);
            return;
        }
    }

    // Don't bank a backlog beyond one step
    if steps == MAX_ALGO_STEPS_PER_TICK {
        state.step_accumulator = state.step_accumulator.min(interval);
    }
}

/// Next click of the demo bot, paced by `bot_clicks_per_sec`
fn bot_click(state: &mut RaceState, dt: f32) -> Option<usize> {
    state.bot_accumulator += dt;
    let interval = 1.0 / state.settings.bot_clicks_per_sec;
    if state.bot_accumulator < interval {
        return None;
    }
    state.bot_accumulator -= interval;

    let (from, to) = next_bot_swap(&state.player.values)?;
    match state.player.selected() {
        None => Some(from),
        Some(sel) if sel == from => Some(to),
        // Clear someone else's selection first
        Some(sel) => Some(sel),
    }
}

/// Selection-sort move: first misplaced bar and where its value sits
pub fn next_bot_swap(values: &[u32]) -> Option<(usize, usize)> {
    let mut target = values.to_vec();
    target.sort_unstable();
    let from = values.iter().zip(&target).position(|(v, t)| v != t)?;
    let to = values[from..]
        .iter()
        .position(|&v| v == target[from])
        .map(|offset| from + offset)?;
    Some((from, to))
}

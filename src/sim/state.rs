//! Round state and read-only snapshots
//!
//! Everything that belongs to one round lives in `RaceState`; restart
//! rebuilds it in place.

use serde::{Deserialize, Serialize};

use super::arrays::{ArrayPair, RngState};
use super::clock::{Outcome, RaceClock, Side};
use super::player::PlayerSide;
use super::quicksort::{QuickSortStepper, SortStep};
use crate::settings::{ArraySize, Settings};
use crate::ticks_to_secs;

/// Complete race state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG state (one stream per round)
    pub rng_state: RngState,
    pub settings: Settings,
    /// Current array size preset
    pub size: ArraySize,
    /// Rounds started this session (1-based)
    pub round: u32,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Human side
    pub player: PlayerSide,
    /// Algorithm side array (length always matches `stepper`)
    pub(crate) algorithm: Vec<u32>,
    /// Suspended quicksort over `algorithm`
    pub(crate) stepper: QuickSortStepper,
    pub clock: RaceClock,
    /// Algorithm side paused (player can still play)
    pub paused: bool,
    /// Seconds banked toward the next algorithm step
    pub step_accumulator: f32,
    /// Tick of the most recent algorithm step (for highlight fade)
    pub last_step_tick: Option<u64>,
    /// Tick of the most recent player swap (for highlight fade)
    pub last_swap_tick: Option<u64>,
    /// Seconds banked toward the next demo-bot click
    pub bot_accumulator: f32,
}

impl RaceState {
    /// Create a race and start its first round
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let size = settings.size;
        let mut rng_state = RngState::new(seed);
        let pair = ArrayPair::generate(size, &mut rng_state.next_round());
        let mut state = Self::empty(settings, seed, rng_state, size);
        state.begin_round(pair);
        state
    }

    /// Create a race over a fixed starting arrangement (size follows the values)
    pub fn with_values(settings: Settings, values: Vec<u32>) -> Self {
        let settings = settings.sanitized();
        let size = ArraySize::from_len(values.len()).unwrap_or(settings.size);
        let mut state = Self::empty(settings, 0, RngState::new(0), size);
        state.begin_round(ArrayPair::from_values(values));
        state
    }

    fn empty(settings: Settings, seed: u64, rng_state: RngState, size: ArraySize) -> Self {
        Self {
            seed,
            rng_state,
            settings,
            size,
            round: 0,
            time_ticks: 0,
            player: PlayerSide::new(Vec::new()),
            algorithm: Vec::new(),
            stepper: QuickSortStepper::new(0),
            clock: RaceClock::new(),
            paused: false,
            step_accumulator: 0.0,
            last_step_tick: None,
            last_swap_tick: None,
            bot_accumulator: 0.0,
        }
    }

    /// Discard all per-round state and start over with a new shuffle
    pub fn restart(&mut self) {
        let pair = ArrayPair::generate(self.size, &mut self.rng_state.next_round());
        self.begin_round(pair);
    }

    /// Change the array size and restart
    pub fn set_size(&mut self, size: ArraySize) {
        self.size = size;
        self.restart();
    }

    fn begin_round(&mut self, pair: ArrayPair) {
        self.round += 1;
        self.stepper = QuickSortStepper::new(pair.algorithm.len());
        self.player = PlayerSide::new(pair.player);
        self.algorithm = pair.algorithm;
        self.clock.reset();
        self.clock.start(self.time_ticks);
        self.paused = false;
        self.step_accumulator = 0.0;
        self.last_step_tick = None;
        self.last_swap_tick = None;
        self.bot_accumulator = 0.0;

        log::info!(
            "Round {} started: {} bars ({})",
            self.round,
            self.algorithm.len(),
            self.size.as_str()
        );

        // A shuffle can come out already sorted
        if self.player.check_finished() {
            self.finish(Side::Player);
        }
        if self.stepper.is_done() {
            self.finish(Side::Algorithm);
        }
    }

    /// Stop the clock for `side` at the current tick
    pub(crate) fn finish(&mut self, side: Side) {
        if self.clock.mark_done(side, self.time_ticks) {
            log::info!(
                "{} finished in {:.2}s",
                side.as_str(),
                self.clock.elapsed_secs(side, self.time_ticks)
            );
            if self.clock.outcome().is_final() {
                log::info!("Round {} result: {}", self.round, self.results_text());
            }
        }
    }

    /// Algorithm side array
    pub fn algorithm(&self) -> &[u32] {
        &self.algorithm
    }

    /// Quicksort progress over the algorithm side
    pub fn stepper(&self) -> &QuickSortStepper {
        &self.stepper
    }

    pub fn outcome(&self) -> Outcome {
        self.clock.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_final()
    }

    pub fn elapsed_secs(&self, side: Side) -> f32 {
        self.clock.elapsed_secs(side, self.time_ticks)
    }

    /// Headline for the results overlay (None while the race is on)
    pub fn headline(&self) -> Option<&'static str> {
        match self.outcome() {
            Outcome::Winner(Side::Player) => Some("You win!"),
            Outcome::Winner(Side::Algorithm) => Some("QuickSort wins!"),
            Outcome::Tie => Some("It's a tie!"),
            Outcome::NoContest => Some("Time's up!"),
            Outcome::InProgress | Outcome::Leading(_) => None,
        }
    }

    /// Detail line for the results overlay
    pub fn results_text(&self) -> String {
        format!(
            "You: {:.2}s, {} swaps   |   QuickSort: {:.2}s, {} steps",
            self.elapsed_secs(Side::Player),
            self.player.swaps,
            self.elapsed_secs(Side::Algorithm),
            self.stepper.op_counts().total()
        )
    }

    fn within_fade(&self, tick: Option<u64>) -> bool {
        tick.is_some_and(|t| {
            ticks_to_secs(self.time_ticks.saturating_sub(t)) <= self.settings.highlight_fade_secs
        })
    }

    /// Algorithm step still inside its highlight window
    pub fn visible_step(&self) -> Option<SortStep> {
        if self.within_fade(self.last_step_tick) {
            self.stepper.last_step()
        } else {
            None
        }
    }

    /// Player swap still inside its highlight window
    pub fn visible_swap(&self) -> Option<(usize, usize)> {
        if self.within_fade(self.last_swap_tick) {
            self.player.last_swap()
        } else {
            None
        }
    }

    /// Everything a renderer needs for this frame
    pub fn snapshot(&self) -> RaceSnapshot {
        let player = SideView {
            values: self.player.values.clone(),
            highlight: Highlight {
                selected: self.player.selected(),
                primary: self.visible_swap().map(|(_, b)| b),
                secondary: self.visible_swap().map(|(a, _)| a),
                ..Highlight::default()
            },
            elapsed_secs: self.elapsed_secs(Side::Player),
            moves: self.player.swaps,
            done: self.clock.is_done(Side::Player),
        };

        let mut highlight = Highlight {
            pivot: self.stepper.partition().map(|p| p.high),
            ..Highlight::default()
        };
        match self.visible_step() {
            Some(SortStep::Pivot { index, .. }) => highlight.pivot = Some(index),
            Some(SortStep::Compare { index, pivot }) => {
                highlight.primary = Some(index);
                highlight.pivot = Some(pivot);
            }
            Some(SortStep::Swap { a, b }) => {
                highlight.primary = Some(b);
                highlight.secondary = Some(a);
            }
            Some(SortStep::Place { from, to }) => {
                highlight.primary = Some(to);
                highlight.secondary = Some(from);
            }
            Some(SortStep::Done) | None => {}
        }
        let algorithm = SideView {
            values: self.algorithm.clone(),
            highlight,
            elapsed_secs: self.elapsed_secs(Side::Algorithm),
            moves: self.stepper.op_counts().total(),
            done: self.clock.is_done(Side::Algorithm),
        };

        RaceSnapshot {
            round: self.round,
            size: self.size,
            player,
            algorithm,
            paused: self.paused,
            outcome: self.outcome(),
            headline: self.headline(),
            results: self.is_over().then(|| self.results_text()),
        }
    }
}

/// Bars to emphasize on one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Player's pending selection
    pub selected: Option<usize>,
    /// Current pivot
    pub pivot: Option<usize>,
    /// Bar being compared, or destination of a swap
    pub primary: Option<usize>,
    /// Other bar of a swap
    pub secondary: Option<usize>,
}

/// Read-only view of one side for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideView {
    pub values: Vec<u32>,
    pub highlight: Highlight,
    pub elapsed_secs: f32,
    /// Swaps (player) or executed steps (algorithm)
    pub moves: u32,
    pub done: bool,
}

/// Read-only view of the whole race for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSnapshot {
    pub round: u32,
    pub size: ArraySize,
    pub player: SideView,
    pub algorithm: SideView,
    pub paused: bool,
    pub outcome: Outcome,
    pub headline: Option<&'static str>,
    pub results: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_fair() {
        let state = RaceState::new(Settings::default(), 12345);
        assert_eq!(state.round, 1);
        assert_eq!(state.player.values.len(), 24);
        assert_eq!(state.player.values, state.algorithm);
        assert_eq!(state.stepper.pending_ranges(), &[(0, 23)]);
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert!(state.clock.is_started());
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = RaceState::new(Settings::default(), 99);
        let mut b = RaceState::new(Settings::default(), 99);
        assert_eq!(a.algorithm, b.algorithm);
        a.restart();
        b.restart();
        assert_eq!(a.algorithm, b.algorithm);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = RaceState::new(Settings::from_size(ArraySize::Small), 5);
        state.player.select(0);
        state.player.select(1);
        for _ in 0..10 {
            state.stepper.step(&mut state.algorithm);
        }
        state.paused = true;
        state.time_ticks = 300;
        state.finish(Side::Algorithm);

        state.restart();
        assert_eq!(state.round, 2);
        assert_eq!(state.player.swaps, 0);
        assert_eq!(state.player.selected(), None);
        assert_eq!(state.player.values, state.algorithm);
        assert_eq!(state.stepper.pending_ranges(), &[(0, 11)]);
        assert_eq!(state.stepper.op_counts().total(), 0);
        assert!(!state.paused);
        assert!(!state.clock.is_done(Side::Algorithm));
        assert_eq!(state.clock.elapsed_ticks(Side::Player, 300), 0);
    }

    #[test]
    fn test_set_size_restarts_with_new_length() {
        let mut state = RaceState::new(Settings::default(), 5);
        state.set_size(ArraySize::Large);
        assert_eq!(state.size, ArraySize::Large);
        assert_eq!(state.algorithm.len(), 36);
        assert_eq!(state.player.values.len(), 36);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_sorted_start_finishes_player_immediately() {
        let state = RaceState::with_values(Settings::default(), vec![10, 15, 20]);
        assert!(state.clock.is_done(Side::Player));
        assert_eq!(state.outcome(), Outcome::Leading(Side::Player));
    }

    #[test]
    fn test_snapshot_shows_last_player_swap_then_fades() {
        let mut state = RaceState::with_values(Settings::default(), vec![30, 10, 20, 40]);
        state.player.select(0);
        state.player.select(2);
        state.last_swap_tick = Some(state.time_ticks);

        let highlight = state.snapshot().player.highlight;
        assert_eq!(highlight.selected, None);
        assert_eq!(highlight.primary, Some(2));
        assert_eq!(highlight.secondary, Some(0));

        state.time_ticks += 60;
        let highlight = state.snapshot().player.highlight;
        assert_eq!(highlight.primary, None);
        assert_eq!(highlight.secondary, None);
    }

    #[test]
    fn test_snapshot_shows_selection_and_results() {
        let mut state = RaceState::with_values(Settings::default(), vec![20, 10]);
        state.player.select(1);
        let snap = state.snapshot();
        assert_eq!(snap.player.highlight.selected, Some(1));
        assert_eq!(snap.headline, None);
        assert!(snap.results.is_none());

        state.player.select(0);
        state.finish(Side::Player);
        state.stepper.run_to_end(&mut state.algorithm);
        state.finish(Side::Algorithm);
        let snap = state.snapshot();
        assert_eq!(snap.outcome, Outcome::Tie);
        assert_eq!(snap.headline, Some("It's a tie!"));
        assert!(snap.results.is_some());
        assert_eq!(snap.algorithm.values, vec![10, 20]);
    }
}

//! Deterministic race simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time measured in ticks, never wall clock
//! - No rendering or platform dependencies

pub mod arrays;
pub mod clock;
pub mod player;
pub mod quicksort;
pub mod state;
pub mod tick;

pub use arrays::{ArrayPair, RngState, shuffled_values, value_set};
pub use clock::{Outcome, RaceClock, Side};
pub use player::{PlayerSide, SelectOutcome};
pub use quicksort::{OpCounts, Partition, QuickSortStepper, SortPhase, SortStep};
pub use state::{Highlight, RaceSnapshot, RaceState, SideView};
pub use tick::{TickInput, next_bot_swap, tick};

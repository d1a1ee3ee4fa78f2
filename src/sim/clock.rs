//! Race clock and outcome
//!
//! Timestamps are simulation ticks: deterministic, and a tie means both sides
//! finished during the same tick.

use serde::{Deserialize, Serialize};

use crate::ticks_to_secs;

/// The two racers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Algorithm,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Algorithm => "QuickSort",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Algorithm,
            Side::Algorithm => Side::Player,
        }
    }
}

/// Derived race result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody has finished
    InProgress,
    /// One side finished, the other is still going
    Leading(Side),
    /// Round over
    Winner(Side),
    /// Both finished in the same tick
    Tie,
    /// Round ended (time limit) with nobody finished
    NoContest,
}

impl Outcome {
    /// Whether the round is decided
    pub fn is_final(&self) -> bool {
        matches!(self, Outcome::Winner(_) | Outcome::Tie | Outcome::NoContest)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceClock {
    start: Option<u64>,
    player_stop: Option<u64>,
    algorithm_stop: Option<u64>,
    /// Set when the round is ended early
    ended: Option<u64>,
}

impl RaceClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the shared origin; later calls are ignored until `reset`
    pub fn start(&mut self, tick: u64) {
        if self.start.is_none() {
            self.start = Some(tick);
        }
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Stop the clock for `side`; returns true only on the first call
    pub fn mark_done(&mut self, side: Side, tick: u64) -> bool {
        let slot = match side {
            Side::Player => &mut self.player_stop,
            Side::Algorithm => &mut self.algorithm_stop,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(tick);
        true
    }

    /// Close the round early (time limit)
    pub fn end(&mut self, tick: u64) {
        if self.ended.is_none() {
            self.ended = Some(tick);
        }
    }

    pub fn stop_tick(&self, side: Side) -> Option<u64> {
        match side {
            Side::Player => self.player_stop,
            Side::Algorithm => self.algorithm_stop,
        }
    }

    pub fn is_done(&self, side: Side) -> bool {
        self.stop_tick(side).is_some()
    }

    /// Ticks from start to stop (or to `now`/end while running)
    pub fn elapsed_ticks(&self, side: Side, now: u64) -> u64 {
        let Some(start) = self.start else {
            return 0;
        };
        let end = self.stop_tick(side).or(self.ended).unwrap_or(now);
        end.saturating_sub(start)
    }

    pub fn elapsed_secs(&self, side: Side, now: u64) -> f32 {
        ticks_to_secs(self.elapsed_ticks(side, now))
    }

    pub fn outcome(&self) -> Outcome {
        match (self.player_stop, self.algorithm_stop) {
            (None, None) if self.ended.is_some() => Outcome::NoContest,
            (None, None) => Outcome::InProgress,
            (Some(_), None) if self.ended.is_some() => Outcome::Winner(Side::Player),
            (None, Some(_)) if self.ended.is_some() => Outcome::Winner(Side::Algorithm),
            (Some(_), None) => Outcome::Leading(Side::Player),
            (None, Some(_)) => Outcome::Leading(Side::Algorithm),
            (Some(p), Some(a)) => match p.cmp(&a) {
                std::cmp::Ordering::Less => Outcome::Winner(Side::Player),
                std::cmp::Ordering::Greater => Outcome::Winner(Side::Algorithm),
                std::cmp::Ordering::Equal => Outcome::Tie,
            },
        }
    }

    /// Unset every timestamp
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

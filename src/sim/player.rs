//! Human side: select two bars, swap them

use serde::{Deserialize, Serialize};

use crate::is_sorted;

/// Result of a single click on the player's panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Out of range, or the side has already finished
    Rejected,
    /// First bar of a pair picked
    Selected(usize),
    /// Same bar clicked again; pending swap cancelled
    Deselected(usize),
    /// Bars exchanged. `completed` is set on the swap that first sorts the array
    Swapped { a: usize, b: usize, completed: bool },
}

/// The player's array plus selection and swap count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSide {
    pub values: Vec<u32>,
    /// Completed swaps
    pub swaps: u32,
    selected: Option<usize>,
    last_swap: Option<(usize, usize)>,
    finished: bool,
}

impl PlayerSide {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            swaps: 0,
            selected: None,
            last_swap: None,
            finished: false,
        }
    }

    /// Bar waiting for its partner, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Most recent swapped pair
    pub fn last_swap(&self) -> Option<(usize, usize)> {
        self.last_swap
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Handle a click on bar `index`
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.finished || index >= self.values.len() {
            log::debug!("rejected selection {} (len {})", index, self.values.len());
            return SelectOutcome::Rejected;
        }

        match self.selected.take() {
            None => {
                self.selected = Some(index);
                self.last_swap = None;
                SelectOutcome::Selected(index)
            }
            Some(first) if first == index => SelectOutcome::Deselected(index),
            Some(first) => {
                self.values.swap(first, index);
                self.swaps += 1;
                self.last_swap = Some((first, index));
                let completed = self.check_finished();
                SelectOutcome::Swapped {
                    a: first,
                    b: index,
                    completed,
                }
            }
        }
    }

    /// Mark the side finished if sorted; true only the first time
    pub fn check_finished(&mut self) -> bool {
        if self.finished || !is_sorted(&self.values) {
            return false;
        }
        self.finished = true;
        self.selected = None;
        true
    }
}

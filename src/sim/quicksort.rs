//! Steppable Lomuto quicksort
//!
//! Recursion is replaced with an explicit stack of pending ranges so the sort
//! can stop after any single operation and resume exactly where it left off.
//! Pivot is always the last element of the range; `<=` sends duplicates left.

use serde::{Deserialize, Serialize};

/// One primitive operation, reported for animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortStep {
    /// Pivot selected for `low..=high`
    Pivot { index: usize, low: usize, high: usize },
    /// `values[index]` compared against `values[pivot]`
    Compare { index: usize, pivot: usize },
    /// Swap during the partition scan
    Swap { a: usize, b: usize },
    /// Pivot moved from `from` into its final slot `to`
    Place { from: usize, to: usize },
    /// Nothing left to do
    Done,
}

impl SortStep {
    /// Indices touched by this step (for highlighting)
    pub fn indices(&self) -> Option<(usize, usize)> {
        match *self {
            SortStep::Pivot { index, .. } => Some((index, index)),
            SortStep::Compare { index, pivot } => Some((index, pivot)),
            SortStep::Swap { a, b } => Some((a, b)),
            SortStep::Place { from, to } => Some((to, from)),
            SortStep::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, SortStep::Done)
    }
}

/// Current phase of the stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPhase {
    /// Between partitions; the next step pops a range
    Idle,
    /// Scanning a range against its pivot
    Partitioning,
    /// A swap is pending for the next step
    Swapping,
    /// Stack empty, array sorted
    Done,
}

/// A partition in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub low: usize,
    /// Pivot index (last element of the range)
    pub high: usize,
    /// Next slot for an element `<=` pivot
    pub store: usize,
    /// Next element to compare
    pub scan: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PendingSwap {
    Scan { a: usize, b: usize },
    Place { from: usize, to: usize },
}

/// Operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCounts {
    pub pivots: u32,
    pub compares: u32,
    pub swaps: u32,
    pub places: u32,
}

impl OpCounts {
    /// Every executed step
    pub fn total(&self) -> u32 {
        self.pivots + self.compares + self.swaps + self.places
    }

    /// Compares plus element exchanges (scan swaps and pivot placements)
    pub fn compares_and_swaps(&self) -> u32 {
        self.compares + self.swaps + self.places
    }
}

/// Suspended quicksort over an array of fixed length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSortStepper {
    len: usize,
    /// Pending `(low, high)` ranges, top is processed next
    ranges: Vec<(usize, usize)>,
    partition: Option<Partition>,
    pending: Option<PendingSwap>,
    phase: SortPhase,
    ops: OpCounts,
    last: Option<SortStep>,
}

impl QuickSortStepper {
    /// Fresh stepper covering `0..len`
    pub fn new(len: usize) -> Self {
        let mut stepper = Self {
            len,
            ranges: Vec::new(),
            partition: None,
            pending: None,
            phase: SortPhase::Idle,
            ops: OpCounts::default(),
            last: None,
        };
        if len >= 2 {
            stepper.ranges.push((0, len - 1));
        } else {
            stepper.phase = SortPhase::Done;
        }
        stepper
    }

    pub fn phase(&self) -> SortPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == SortPhase::Done
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn op_counts(&self) -> OpCounts {
        self.ops
    }

    /// Last executed step (None before the first step)
    pub fn last_step(&self) -> Option<SortStep> {
        self.last
    }

    /// Ranges still waiting to be partitioned
    pub fn pending_ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    /// Partition currently being scanned
    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// Advance by exactly one primitive operation
    ///
    /// Once done, every call returns `SortStep::Done` without touching `values`.
    ///
    /// # Panics
    /// If `values` is not the length the stepper was created for.
    pub fn step(&mut self, values: &mut [u32]) -> SortStep {
        assert_eq!(
            values.len(),
            self.len,
            "quicksort stepper built for {} elements was given {}",
            self.len,
            values.len()
        );

        let step = match self.phase {
            SortPhase::Done => return SortStep::Done,
            SortPhase::Idle => self.select_pivot(),
            SortPhase::Partitioning => self.compare(values),
            SortPhase::Swapping => self.swap(values),
        };
        self.settle();

        log::trace!("quicksort step: {:?}", step);
        self.last = Some(step);
        step
    }

    /// Run until done, returning the number of steps executed
    pub fn run_to_end(&mut self, values: &mut [u32]) -> u32 {
        let mut steps = 0;
        while !self.step(values).is_done() {
            steps += 1;
        }
        steps
    }

    fn select_pivot(&mut self) -> SortStep {
        // Idle is only entered with a non-empty stack; settle() handles the empty case
        let Some((low, high)) = self.ranges.pop() else {
            self.phase = SortPhase::Done;
            return SortStep::Done;
        };
        self.partition = Some(Partition {
            low,
            high,
            store: low,
            scan: low,
        });
        self.phase = SortPhase::Partitioning;
        self.ops.pivots += 1;
        SortStep::Pivot {
            index: high,
            low,
            high,
        }
    }

    fn compare(&mut self, values: &[u32]) -> SortStep {
        let Some(part) = self.partition.as_mut() else {
            self.phase = SortPhase::Idle;
            return SortStep::Done;
        };
        let index = part.scan;
        let pivot = part.high;
        self.ops.compares += 1;

        if values[index] <= values[pivot] {
            if part.store != index {
                self.pending = Some(PendingSwap::Scan {
                    a: part.store,
                    b: index,
                });
                self.phase = SortPhase::Swapping;
            } else {
                part.store += 1;
            }
        }
        part.scan += 1;

        SortStep::Compare { index, pivot }
    }

    fn swap(&mut self, values: &mut [u32]) -> SortStep {
        match self.pending.take() {
            Some(PendingSwap::Scan { a, b }) => {
                values.swap(a, b);
                self.ops.swaps += 1;
                if let Some(part) = self.partition.as_mut() {
                    part.store += 1;
                }
                self.phase = SortPhase::Partitioning;
                SortStep::Swap { a, b }
            }
            Some(PendingSwap::Place { from, to }) => {
                values.swap(from, to);
                self.ops.places += 1;
                self.finish_partition(to);
                SortStep::Place { from, to }
            }
            None => {
                self.phase = SortPhase::Partitioning;
                SortStep::Done
            }
        }
    }

    /// Non-operation bookkeeping after a step
    fn settle(&mut self) {
        if self.phase == SortPhase::Partitioning {
            if let Some(part) = self.partition {
                if part.scan == part.high {
                    if part.store != part.high {
                        self.pending = Some(PendingSwap::Place {
                            from: part.high,
                            to: part.store,
                        });
                        self.phase = SortPhase::Swapping;
                    } else {
                        self.finish_partition(part.store);
                    }
                }
            }
        }
        if self.phase == SortPhase::Idle && self.ranges.is_empty() {
            self.phase = SortPhase::Done;
            self.partition = None;
        }
    }

    /// Pivot landed at `pivot_index`; queue sub-ranges with at least two elements
    fn finish_partition(&mut self, pivot_index: usize) {
        if let Some(part) = self.partition.take() {
            // Right first so the left side is popped first
            if part.high > pivot_index + 1 {
                self.ranges.push((pivot_index + 1, part.high));
            }
            if pivot_index > part.low + 1 {
                self.ranges.push((part.low, pivot_index - 1));
            }
        }
        self.phase = SortPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_sorted;
    use proptest::prelude::*;

    /// Recursive Lomuto quicksort counting the same operations
    fn reference_counts(values: &mut [u32]) -> OpCounts {
        fn partition(v: &mut [u32], lo: usize, hi: usize, ops: &mut OpCounts) -> usize {
            ops.pivots += 1;
            let pivot = v[hi];
            let mut store = lo;
            for j in lo..hi {
                ops.compares += 1;
                if v[j] <= pivot {
                    if store != j {
                        v.swap(store, j);
                        ops.swaps += 1;
                    }
                    store += 1;
                }
            }
            if store != hi {
                v.swap(store, hi);
                ops.places += 1;
            }
            store
        }
        fn quicksort(v: &mut [u32], lo: usize, hi: usize, ops: &mut OpCounts) {
            if lo < hi {
                let p = partition(v, lo, hi, ops);
                if p > lo {
                    quicksort(v, lo, p - 1, ops);
                }
                quicksort(v, p + 1, hi, ops);
            }
        }
        let mut ops = OpCounts::default();
        if !values.is_empty() {
            let hi = values.len() - 1;
            quicksort(values, 0, hi, &mut ops);
        }
        ops
    }

    #[test]
    fn test_example_trace() {
        let mut values = vec![7, 2, 9, 4, 1, 8, 3, 6, 5, 11, 10, 0];
        let mut stepper = QuickSortStepper::new(values.len());
        let steps = stepper.run_to_end(&mut values);

        assert_eq!(values, (0..12).collect::<Vec<u32>>());
        assert_eq!(
            stepper.op_counts(),
            OpCounts {
                pivots: 8,
                compares: 36,
                swaps: 6,
                places: 7,
            }
        );
        assert_eq!(stepper.op_counts().compares_and_swaps(), 49);
        assert_eq!(steps, 57);
        assert!(stepper.is_done());
    }

    #[test]
    fn test_three_element_steps() {
        let mut values = vec![3, 1, 2];
        let mut stepper = QuickSortStepper::new(3);

        assert_eq!(
            stepper.step(&mut values),
            SortStep::Pivot {
                index: 2,
                low: 0,
                high: 2
            }
        );
        assert_eq!(stepper.step(&mut values), SortStep::Compare { index: 0, pivot: 2 });
        assert_eq!(stepper.step(&mut values), SortStep::Compare { index: 1, pivot: 2 });
        assert_eq!(stepper.phase(), SortPhase::Swapping);
        assert_eq!(stepper.step(&mut values), SortStep::Swap { a: 0, b: 1 });
        assert_eq!(values, vec![1, 3, 2]);
        assert_eq!(stepper.step(&mut values), SortStep::Place { from: 2, to: 1 });
        assert_eq!(values, vec![1, 2, 3]);
        // Both sub-ranges have a single element, so the last placement finishes the sort
        assert!(stepper.is_done());
        assert_eq!(stepper.step(&mut values), SortStep::Done);
    }

    #[test]
    fn test_sorted_and_reversed_inputs() {
        let mut sorted: Vec<u32> = (0..12).collect();
        let mut stepper = QuickSortStepper::new(12);
        stepper.run_to_end(&mut sorted);
        assert_eq!(sorted, (0..12).collect::<Vec<u32>>());
        assert_eq!(stepper.op_counts().compares, 66);
        assert_eq!(stepper.op_counts().swaps + stepper.op_counts().places, 0);

        let mut reversed: Vec<u32> = (0..12).rev().collect();
        let mut stepper = QuickSortStepper::new(12);
        stepper.run_to_end(&mut reversed);
        assert_eq!(reversed, (0..12).collect::<Vec<u32>>());
        assert_eq!(stepper.op_counts().compares, 66);
        assert_eq!(stepper.op_counts().places, 6);
    }

    #[test]
    fn test_step_after_done_is_noop() {
        let mut values = vec![2, 1];
        let mut stepper = QuickSortStepper::new(2);
        stepper.run_to_end(&mut values);
        assert_eq!(values, vec![1, 2]);

        let before = stepper.clone();
        for _ in 0..5 {
            assert_eq!(stepper.step(&mut values), SortStep::Done);
        }
        assert_eq!(values, vec![1, 2]);
        assert_eq!(stepper, before);
    }

    #[test]
    #[should_panic(expected = "built for 3 elements was given 4")]
    fn test_step_rejects_resized_array() {
        let mut stepper = QuickSortStepper::new(3);
        stepper.step(&mut [4, 3, 2, 1]);
    }

    #[test]
    fn test_step_indices() {
        assert_eq!(SortStep::Compare { index: 3, pivot: 7 }.indices(), Some((3, 7)));
        assert_eq!(SortStep::Place { from: 7, to: 2 }.indices(), Some((2, 7)));
        assert_eq!(SortStep::Done.indices(), None);
    }

    #[test]
    fn test_trivial_lengths_start_done() {
        assert!(QuickSortStepper::new(0).is_done());
        let mut one = vec![5];
        let mut stepper = QuickSortStepper::new(1);
        assert!(stepper.is_done());
        assert_eq!(stepper.step(&mut one), SortStep::Done);
        assert_eq!(stepper.op_counts().total(), 0);
    }

    #[test]
    fn test_fresh_stepper_covers_full_range() {
        let stepper = QuickSortStepper::new(24);
        assert_eq!(stepper.pending_ranges(), &[(0, 23)]);
        assert_eq!(stepper.phase(), SortPhase::Idle);
        assert!(stepper.partition().is_none());
        assert!(stepper.last_step().is_none());
    }

    #[test]
    fn test_duplicates_sort() {
        let mut values = vec![5, 1, 5, 3, 1, 5];
        let mut stepper = QuickSortStepper::new(values.len());
        stepper.run_to_end(&mut values);
        assert_eq!(values, vec![1, 1, 3, 5, 5, 5]);
    }

    #[test]
    fn test_resume_after_interruption_matches_uninterrupted() {
        let input = vec![7, 2, 9, 4, 1, 8, 3, 6, 5, 11, 10, 0];

        let mut straight = input.clone();
        let mut s1 = QuickSortStepper::new(12);
        let mut trace1 = Vec::new();
        loop {
            let step = s1.step(&mut straight);
            if step.is_done() {
                break;
            }
            trace1.push(step);
        }

        // Interleave by cloning state mid-way (a "pause" that snapshots)
        let mut resumed = input.clone();
        let mut s2 = QuickSortStepper::new(12);
        let mut trace2 = Vec::new();
        for _ in 0..20 {
            trace2.push(s2.step(&mut resumed));
        }
        let mut s3 = s2.clone();
        loop {
            let step = s3.step(&mut resumed);
            if step.is_done() {
                break;
            }
            trace2.push(step);
        }
        assert_eq!(trace1, trace2);
        assert_eq!(straight, resumed);
    }

    proptest! {
        #[test]
        fn prop_always_sorts(values in proptest::collection::vec(0u32..50, 0..48)) {
            let mut stepped = values.clone();
            let mut stepper = QuickSortStepper::new(stepped.len());
            stepper.run_to_end(&mut stepped);
            prop_assert!(is_sorted(&stepped));

            let mut reference = values.clone();
            let ops = reference_counts(&mut reference);
            prop_assert_eq!(stepper.op_counts(), ops);
            prop_assert_eq!(stepped, reference);
        }
    }
}

//! Deferred tick queue.
//!
//! Entries fire in order of due tick, then in submission order. There is no
//! deduplication: every submission fires exactly once.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::pos::BlockPos;

/// A pending deferred tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTick {
    /// Cell to call back.
    pub pos: BlockPos,
    /// Absolute tick at which the callback fires.
    pub due: u64,
    /// Submission counter, breaks ties between entries due on the same tick.
    pub sub_tick: u64,
}

impl Ord for ScheduledTick {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then(self.sub_tick.cmp(&other.sub_tick))
    }
}

impl PartialOrd for ScheduledTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered queue of deferred ticks.
#[derive(Debug, Default, Clone)]
pub struct TickQueue {
    heap: BinaryHeap<Reverse<ScheduledTick>>,
    next_sub_tick: u64,
}

impl TickQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a callback for `pos`, `delay` ticks after `now`. A zero delay is
    /// bumped to one so the callback always lands on a later tick.
    pub fn schedule(&mut self, pos: BlockPos, now: u64, delay: u32) -> ScheduledTick {
        let tick = ScheduledTick {
            pos,
            due: now + u64::from(delay.max(1)),
            sub_tick: self.next_sub_tick,
        };
        self.next_sub_tick += 1;
        self.heap.push(Reverse(tick));
        tick
    }

    /// Pop the earliest entry if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<ScheduledTick> {
        match self.heap.peek() {
            Some(Reverse(tick)) if tick.due <= now => self.heap.pop().map(|Reverse(t)| t),
            _ => None,
        }
    }

    /// Remove and return every entry due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<ScheduledTick> {
        let mut due = Vec::new();
        while let Some(tick) = self.pop_due(now) {
            due.push(tick);
        }
        due
    }

    /// All pending entries in firing order.
    pub fn pending(&self) -> Vec<ScheduledTick> {
        let mut ticks: Vec<_> = self.heap.iter().map(|Reverse(t)| *t).collect();
        ticks.sort();
        ticks
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fires_in_due_order() {
        let mut queue = TickQueue::new();
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(1, 0, 0);
        queue.schedule(a, 0, 20);
        queue.schedule(b, 0, 1);

        assert!(queue.drain_due(0).is_empty());
        let first = queue.drain_due(1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].pos, b);
        assert!(queue.drain_due(19).is_empty());
        assert_eq!(queue.drain_due(20)[0].pos, a);
        assert!(queue.is_empty());
    }

    #[test]
    fn same_tick_keeps_submission_order() {
        let mut queue = TickQueue::new();
        for x in 0..5 {
            queue.schedule(BlockPos::new(x, 0, 0), 10, 3);
        }
        let fired: Vec<i32> = queue.drain_due(13).iter().map(|t| t.pos.x).collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn duplicate_submissions_each_fire() {
        let mut queue = TickQueue::new();
        let pos = BlockPos::new(2, 2, 2);
        queue.schedule(pos, 0, 1);
        queue.schedule(pos, 0, 1);
        assert_eq!(queue.len(), 2);
        let fired = queue.drain_due(1);
        assert_eq!(fired.len(), 2);
        assert!(fired.iter().all(|t| t.pos == pos));
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_delay_lands_on_next_tick() {
        let mut queue = TickQueue::new();
        let tick = queue.schedule(BlockPos::ORIGIN, 5, 0);
        assert_eq!(tick.due, 6);
        assert!(queue.pop_due(5).is_none());
        assert!(queue.pop_due(6).is_some());
    }

    #[test]
    fn pending_is_sorted() {
        let mut queue = TickQueue::new();
        queue.schedule(BlockPos::new(0, 0, 0), 0, 10);
        queue.schedule(BlockPos::new(1, 0, 0), 0, 1);
        queue.schedule(BlockPos::new(2, 0, 0), 0, 5);
        let dues: Vec<u64> = queue.pending().iter().map(|t| t.due).collect();
        assert_eq!(dues, vec![1, 5, 10]);
    }

    proptest! {
        #[test]
        fn every_submission_fires_once_in_order(delays in prop::collection::vec(0u32..30, 0..40)) {
            let mut queue = TickQueue::new();
            for (i, delay) in delays.iter().enumerate() {
                queue.schedule(BlockPos::new(i as i32, 0, 0), 0, *delay);
            }

            let mut fired = Vec::new();
            for now in 0..=31 {
                for tick in queue.drain_due(now) {
                    prop_assert_eq!(tick.due, now);
                    fired.push(tick);
                }
            }
            prop_assert!(queue.is_empty());
            prop_assert_eq!(fired.len(), delays.len());
            prop_assert!(fired.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

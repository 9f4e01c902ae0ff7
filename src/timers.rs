//! Fire-and-forget timers for the single UI thread.
//!
//! Nothing here sleeps or spawns. The event loop drains due timers on every
//! idle tick, so a timer fires on the first tick at or after its deadline.
//! Timers cannot be cancelled; handlers must tolerate firing late.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::particles::ParticleId;

/// Deferred work scheduled by the card controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTimer {
    ReleaseRelocationGuard,
    ClearWiggle,
    RemoveBurstParticle(ParticleId),
}

#[derive(Debug)]
struct Entry<E> {
    deadline: Instant,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Entry<E>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, deadline: Instant, event: E) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry {
            deadline,
            seq,
            event,
        });
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) {
        self.schedule_at(now + delay, event);
    }

    /// Remove and return every event whose deadline is at or before `now`,
    /// earliest first. Events with equal deadlines keep scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<E> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|entry| entry.deadline <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.event);
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

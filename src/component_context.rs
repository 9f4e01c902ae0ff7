//! Shared component rendering context
//!
//! `ComponentContext` carries what every card element needs to draw itself:
//! the frame clock for animations and the cell metrics for converting
//! unit-space geometry back into terminal cells.

use std::time::{Duration, Instant};

use crate::geometry::CellMetrics;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    now: Instant,
    started_at: Instant,
    metrics: CellMetrics,
}

impl ComponentContext {
    pub fn new(now: Instant, started_at: Instant, metrics: CellMetrics) -> Self {
        Self {
            now,
            started_at,
            metrics,
        }
    }

    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Time since the card was opened; drives the looping animations.
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.started_at)
    }

    pub const fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Return a new `ComponentContext` at a different instant.
    pub const fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

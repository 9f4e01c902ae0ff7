//! Floating hearts.
//!
//! Ambient hearts are spawned once and loop forever on their own timing.
//! Burst hearts fly out of the screen center when the card is accepted and
//! are removed by a timer once their animation has played.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::constants::{BURST_DURATION, BURST_SPREAD};
use crate::geometry::Point;
use crate::theme::HEART_PALETTE;
use crate::timers::{CardTimer, TimerQueue};

const AMBIENT_SIZE: (f64, f64) = (10.0, 30.0);
const AMBIENT_LEFT_PCT: (f64, f64) = (0.0, 100.0);
const AMBIENT_DELAY_SECS: (f64, f64) = (0.0, 8.0);
const AMBIENT_CYCLE_SECS: (f64, f64) = (10.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientParticle {
    pub size: f64,
    /// Horizontal position as a percentage of the viewport width.
    pub left_pct: f64,
    pub delay: Duration,
    pub cycle: Duration,
    pub color: (u8, u8, u8),
}

impl AmbientParticle {
    /// How far through its current rise the heart is, in `0.0..1.0`, or
    /// `None` while it is still waiting for its first start.
    pub fn progress(&self, elapsed: Duration) -> Option<f64> {
        let running = elapsed.checked_sub(self.delay)?;
        let cycle = self.cycle.as_secs_f64();
        if cycle <= 0.0 {
            return Some(0.0);
        }
        Some((running.as_secs_f64() % cycle) / cycle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurstParticle {
    pub id: ParticleId,
    pub displacement: Point,
    pub spawned_at: Instant,
}

impl BurstParticle {
    fn linear_progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.spawned_at).as_secs_f64();
        (elapsed / BURST_DURATION.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Offset from the burst origin.
    pub fn offset_at(&self, now: Instant) -> Point {
        let t = ease_out(self.linear_progress(now));
        Point::new(self.displacement.x * t, self.displacement.y * t)
    }

    /// Opacity, fading from 1 to 0 over the burst.
    pub fn opacity_at(&self, now: Instant) -> f64 {
        1.0 - ease_out(self.linear_progress(now))
    }
}

/// Cubic ease-out.
pub fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn sample<R: Rng + ?Sized>((low, high): (f64, f64), rng: &mut R) -> f64 {
    rng.gen_range(low..=high)
}

pub fn spawn_ambient<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<AmbientParticle> {
    (0..count)
        .map(|_| AmbientParticle {
            size: sample(AMBIENT_SIZE, rng),
            left_pct: sample(AMBIENT_LEFT_PCT, rng),
            delay: Duration::from_secs_f64(sample(AMBIENT_DELAY_SECS, rng)),
            cycle: Duration::from_secs_f64(sample(AMBIENT_CYCLE_SECS, rng)),
            color: HEART_PALETTE[rng.gen_range(0..HEART_PALETTE.len())],
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct ParticleField {
    ambient: Vec<AmbientParticle>,
    bursts: Vec<BurstParticle>,
    next_id: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_ambient<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.ambient.extend(spawn_ambient(count, rng));
    }

    /// Emit `count` hearts from the screen center. Each one schedules its own
    /// removal for when its animation ends.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
        timers: &mut TimerQueue<CardTimer>,
        now: Instant,
    ) {
        let spread = (-BURST_SPREAD, BURST_SPREAD);
        for _ in 0..count {
            let id = ParticleId(self.next_id);
            self.next_id += 1;
            self.bursts.push(BurstParticle {
                id,
                displacement: Point::new(sample(spread, rng), sample(spread, rng)),
                spawned_at: now,
            });
            timers.schedule(now, BURST_DURATION, CardTimer::RemoveBurstParticle(id));
        }
        tracing::debug!(count, "burst spawned");
    }

    pub fn remove_burst(&mut self, id: ParticleId) -> bool {
        let before = self.bursts.len();
        self.bursts.retain(|particle| particle.id != id);
        self.bursts.len() != before
    }

    pub fn ambient(&self) -> &[AmbientParticle] {
        &self.ambient
    }

    pub fn bursts(&self) -> &[BurstParticle] {
        &self.bursts
    }
}

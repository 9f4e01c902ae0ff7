//! The decline button that runs away from the pointer.
//!
//! Every accepted trigger moves the decline button to a random spot inside
//! the card and grows the accept button a little more. A short debounce
//! keeps a single pointer sweep from producing a storm of relocations.
//! Touch-only input cannot hover, so there the decline button stays put and
//! answers taps with a wiggle, a vibration and a shake of the accept button.

use std::time::Instant;

use rand::Rng;

use crate::constants::{
    GROWTH_BONUS, GROWTH_STEP, GROWTH_THRESHOLD, HAPTIC_PATTERN, MAX_PLACEMENT_TRIES,
    PROXIMITY_RADIUS, RELOCATION_COOLDOWN, RELOCATION_PADDING, WIGGLE_DURATION,
};
use crate::geometry::{Bounds, Point, Size};
use crate::haptics::Haptics;
use crate::input_mode::InputMode;
use crate::timers::{CardTimer, TimerQueue};

/// Result of [`pick_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner relative to the container.
    pub position: Point,
    pub attempts: usize,
    /// `false` when every attempt overlapped and the last one was kept.
    pub collision_free: bool,
}

/// Rejection-sample a top-left position for a `target`-sized box inside a
/// `container`-sized area, avoiding `obstacle` (given relative to the
/// container).
///
/// Candidates are drawn uniformly from the padded interior. When the interior
/// is narrower than the padding allows, the axis collapses to `padding`. If
/// all `max_tries` candidates overlap the obstacle the last one is used.
pub fn pick_position<R: Rng + ?Sized>(
    container: Size,
    target: Size,
    obstacle: Bounds,
    padding: f64,
    max_tries: usize,
    rng: &mut R,
) -> Placement {
    let x_range = (padding, container.width - target.width - padding);
    let y_range = (padding, container.height - target.height - padding);
    let tries = max_tries.max(1);
    let mut last = Point::new(padding, padding);
    for attempt in 1..=tries {
        let candidate = Point::new(sample_axis(x_range, rng), sample_axis(y_range, rng));
        if !Bounds::at(candidate, target).overlaps(&obstacle) {
            return Placement {
                position: candidate,
                attempts: attempt,
                collision_free: true,
            };
        }
        last = candidate;
    }
    Placement {
        position: last,
        attempts: tries,
        collision_free: false,
    }
}

fn sample_axis<R: Rng + ?Sized>((low, high): (f64, f64), rng: &mut R) -> f64 {
    if high <= low {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

/// Accept button scale, tracked in hundredths so repeated growth is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthFactor(u32);

impl GrowthFactor {
    pub const IDENTITY: GrowthFactor = GrowthFactor(100);

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Grow by one relocation. The bonus applies once the base step has
    /// carried the factor past the threshold, so 1.60 → 1.68 → 1.76.
    #[must_use]
    pub fn step(self) -> Self {
        let mut next = self.0 + GROWTH_STEP;
        if next > GROWTH_THRESHOLD {
            next += GROWTH_BONUS;
        }
        GrowthFactor(next)
    }
}

impl Default for GrowthFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEvasionState {
    pub growth: GrowthFactor,
    pub relocating: bool,
}

/// What set off a relocation attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// The pointer entered the decline button.
    PointerEnter,
    /// The pointer moved somewhere inside the card.
    PointerMove(Point),
}

/// Absolute unit-space geometry read at trigger time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasionGeometry {
    pub container: Bounds,
    /// Decline button, where it currently is.
    pub target: Bounds,
    /// Accept button, including its growth.
    pub safe: Bounds,
}

#[derive(Debug)]
pub struct EvasionController {
    state: ButtonEvasionState,
    input_mode: InputMode,
    /// `None` while the decline button still sits in the button row.
    decline_origin: Option<Point>,
    wiggling: bool,
    shake_started: Option<Instant>,
    relocations: u64,
}

impl EvasionController {
    pub fn new(input_mode: InputMode) -> Self {
        Self {
            state: ButtonEvasionState::default(),
            input_mode,
            decline_origin: None,
            wiggling: false,
            shake_started: None,
            relocations: 0,
        }
    }

    pub fn state(&self) -> ButtonEvasionState {
        self.state
    }

    pub fn growth(&self) -> GrowthFactor {
        self.state.growth
    }

    pub fn is_relocating(&self) -> bool {
        self.state.relocating
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Position of the decline button relative to its container once it has
    /// left the button row.
    pub fn decline_origin(&self) -> Option<Point> {
        self.decline_origin
    }

    pub fn wiggling(&self) -> bool {
        self.wiggling
    }

    pub fn shake_started(&self) -> Option<Instant> {
        self.shake_started
    }

    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// Whether `trigger` would ask for a relocation, ignoring the guards.
    pub fn wants_relocation(trigger: Trigger, geometry: &EvasionGeometry) -> bool {
        match trigger {
            Trigger::PointerEnter => true,
            Trigger::PointerMove(pointer) => {
                pointer.distance_to(geometry.target.center()) < PROXIMITY_RADIUS
            }
        }
    }

    /// Handle a hover trigger. Returns the new container-relative position
    /// of the decline button when it moved.
    ///
    /// Triggers are dropped, not queued, on touch-only input and while the
    /// previous relocation is still cooling down.
    pub fn handle_trigger<R: Rng + ?Sized>(
        &mut self,
        trigger: Trigger,
        geometry: &EvasionGeometry,
        rng: &mut R,
        timers: &mut TimerQueue<CardTimer>,
        now: Instant,
    ) -> Option<Point> {
        if self.input_mode.is_touch_only() || self.state.relocating {
            return None;
        }
        if !Self::wants_relocation(trigger, geometry) {
            return None;
        }
        Some(self.relocate(geometry, rng, timers, now))
    }

    fn relocate<R: Rng + ?Sized>(
        &mut self,
        geometry: &EvasionGeometry,
        rng: &mut R,
        timers: &mut TimerQueue<CardTimer>,
        now: Instant,
    ) -> Point {
        self.state.relocating = true;
        timers.schedule(now, RELOCATION_COOLDOWN, CardTimer::ReleaseRelocationGuard);

        let obstacle = geometry.safe.relative_to(&geometry.container);
        let placement = pick_position(
            geometry.container.size(),
            geometry.target.size(),
            obstacle,
            RELOCATION_PADDING,
            MAX_PLACEMENT_TRIES,
            rng,
        );
        self.decline_origin = Some(placement.position);
        self.state.growth = self.state.growth.step();
        self.relocations += 1;
        tracing::debug!(
            x = placement.position.x,
            y = placement.position.y,
            attempts = placement.attempts,
            collision_free = placement.collision_free,
            growth = self.state.growth.value(),
            "decline button relocated"
        );
        placement.position
    }

    /// Fired by the cooldown timer.
    pub fn release_guard(&mut self) {
        tracing::trace!("relocation guard released");
        self.state.relocating = false;
    }

    /// Tap on the decline button. Only touch-only input reacts; hover input
    /// never gets here in practice because the button flees first.
    pub fn tap_decline(
        &mut self,
        haptics: &mut dyn Haptics,
        timers: &mut TimerQueue<CardTimer>,
        now: Instant,
    ) -> bool {
        if self.input_mode.supports_hover() {
            return false;
        }
        if !haptics.vibrate(&HAPTIC_PATTERN) {
            tracing::trace!("haptics unsupported");
        }
        self.wiggling = true;
        timers.schedule(now, WIGGLE_DURATION, CardTimer::ClearWiggle);
        // Restarting mid-shake starts the animation over instead of letting
        // the running one finish.
        self.shake_started = Some(now);
        true
    }

    pub fn clear_wiggle(&mut self) {
        self.wiggling = false;
    }

    /// Reset escalation after the accept button is pressed.
    pub fn accept(&mut self) {
        tracing::info!(
            relocations = self.relocations,
            growth = self.state.growth.value(),
            "accepted"
        );
        self.state.growth = GrowthFactor::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn geometry() -> EvasionGeometry {
        EvasionGeometry {
            container: Bounds::new(80.0, 64.0, 480.0, 256.0),
            target: Bounds::new(360.0, 240.0, 64.0, 48.0),
            safe: Bounds::new(200.0, 240.0, 72.0, 48.0),
        }
    }

    fn assert_within_padding(placement: &Placement, container: Size, target: Size, padding: f64) {
        let p = placement.position;
        let max_x = (container.width - target.width - padding).max(padding);
        let max_y = (container.height - target.height - padding).max(padding);
        assert!(p.x >= padding && p.x <= max_x, "x out of bounds: {p:?}");
        assert!(p.y >= padding && p.y <= max_y, "y out of bounds: {p:?}");
    }

    #[test]
    fn placement_stays_inside_padded_container() {
        let container = Size::new(480.0, 256.0);
        let target = Size::new(64.0, 48.0);
        let obstacle = Bounds::new(120.0, 176.0, 72.0, 48.0);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placement = pick_position(container, target, obstacle, 20.0, 25, &mut rng);
            assert_within_padding(&placement, container, target, 20.0);
            assert!(placement.collision_free);
        }
    }

    #[test]
    fn exhausted_tries_fall_back_inside_bounds() {
        let container = Size::new(300.0, 200.0);
        let target = Size::new(40.0, 20.0);
        // Obstacle covering the whole container: nothing can avoid it.
        let obstacle = Bounds::new(0.0, 0.0, 300.0, 200.0);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placement = pick_position(container, target, obstacle, 20.0, 25, &mut rng);
            assert_eq!(placement.attempts, 25);
            assert!(!placement.collision_free);
            assert_within_padding(&placement, container, target, 20.0);
        }
    }

    #[test]
    fn degenerate_container_collapses_to_padding() {
        let mut rng = StdRng::seed_from_u64(7);
        let placement = pick_position(
            Size::new(30.0, 10.0),
            Size::new(64.0, 48.0),
            Bounds::new(500.0, 500.0, 1.0, 1.0),
            20.0,
            25,
            &mut rng,
        );
        assert_eq!(placement.position, Point::new(20.0, 20.0));
        assert_eq!(placement.attempts, 1);
    }

    #[test]
    fn separated_obstacle_is_accepted_first_try() {
        let container = Size::new(480.0, 256.0);
        let target = Size::new(64.0, 48.0);
        let obstacles = [
            Bounds::new(-200.0, 0.0, 100.0, 256.0), // left
            Bounds::new(600.0, 0.0, 100.0, 256.0),  // right
            Bounds::new(0.0, -200.0, 480.0, 100.0), // above
            Bounds::new(0.0, 400.0, 480.0, 100.0),  // below
        ];
        for obstacle in obstacles {
            let mut rng = StdRng::seed_from_u64(3);
            let placement = pick_position(container, target, obstacle, 20.0, 25, &mut rng);
            assert_eq!(placement.attempts, 1, "obstacle {obstacle:?}");
            assert!(placement.collision_free);
        }
    }

    #[test]
    fn growth_trace_accelerates_past_threshold() {
        let mut growth = GrowthFactor::IDENTITY;
        for _ in 0..10 {
            growth = growth.step();
        }
        assert_eq!(growth.hundredths(), 160);
        assert_eq!(growth.value(), 1.6);
        growth = growth.step();
        assert_eq!(growth.hundredths(), 168);
        growth = growth.step();
        assert_eq!(growth.hundredths(), 176);
    }

    #[test]
    fn enter_trigger_relocates_and_grows() {
        let t0 = Instant::now();
        let mut ctl = EvasionController::new(InputMode::hover());
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        let moved = ctl.handle_trigger(Trigger::PointerEnter, &geometry(), &mut rng, &mut timers, t0);
        assert!(moved.is_some());
        assert_eq!(ctl.decline_origin(), moved);
        assert!(ctl.is_relocating());
        assert_eq!(ctl.growth().hundredths(), 106);
        assert_eq!(timers.next_deadline(), Some(t0 + RELOCATION_COOLDOWN));
    }

    #[test]
    fn triggers_during_cooldown_are_dropped() {
        let t0 = Instant::now();
        let mut ctl = EvasionController::new(InputMode::hover());
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(2);
        let first = ctl.handle_trigger(Trigger::PointerEnter, &geometry(), &mut rng, &mut timers, t0);
        let again = ctl.handle_trigger(
            Trigger::PointerEnter,
            &geometry(),
            &mut rng,
            &mut timers,
            t0 + Duration::from_millis(100),
        );
        assert!(again.is_none());
        assert_eq!(ctl.decline_origin(), first);
        assert_eq!(ctl.growth().hundredths(), 106);

        for event in timers.drain_due(t0 + Duration::from_millis(220)) {
            assert_eq!(event, CardTimer::ReleaseRelocationGuard);
            ctl.release_guard();
        }
        assert!(!ctl.is_relocating());
        assert!(
            ctl.handle_trigger(
                Trigger::PointerEnter,
                &geometry(),
                &mut rng,
                &mut timers,
                t0 + Duration::from_millis(221),
            )
            .is_some()
        );
        assert_eq!(ctl.growth().hundredths(), 112);
    }

    #[test]
    fn proximity_uses_radius() {
        let g = geometry();
        let center = g.target.center();
        assert!(EvasionController::wants_relocation(
            Trigger::PointerMove(Point::new(center.x + 129.0, center.y)),
            &g
        ));
        assert!(!EvasionController::wants_relocation(
            Trigger::PointerMove(Point::new(center.x + 130.0, center.y)),
            &g
        ));

        let t0 = Instant::now();
        let mut ctl = EvasionController::new(InputMode::hover());
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(4);
        let far = Trigger::PointerMove(Point::new(center.x, center.y + 200.0));
        assert!(ctl.handle_trigger(far, &g, &mut rng, &mut timers, t0).is_none());
        assert!(!ctl.is_relocating());
        assert!(timers.is_empty());
    }

    #[test]
    fn relocation_avoids_grown_accept_button() {
        let g = geometry();
        let t0 = Instant::now();
        for seed in 0..50 {
            let mut ctl = EvasionController::new(InputMode::hover());
            let mut timers = TimerQueue::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let pos = ctl
                .handle_trigger(Trigger::PointerEnter, &g, &mut rng, &mut timers, t0)
                .expect("relocated");
            let placed = Bounds::at(pos, g.target.size());
            assert!(!placed.overlaps(&g.safe.relative_to(&g.container)));
        }
    }

    #[derive(Default)]
    struct RecordingHaptics {
        patterns: Vec<Vec<Duration>>,
    }

    impl Haptics for RecordingHaptics {
        fn vibrate(&mut self, pattern: &[Duration]) -> bool {
            self.patterns.push(pattern.to_vec());
            true
        }
    }

    #[test]
    fn touch_only_ignores_hover_and_wiggles_on_tap() {
        let t0 = Instant::now();
        let mut ctl = EvasionController::new(InputMode::touch_only());
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(
            ctl.handle_trigger(Trigger::PointerEnter, &geometry(), &mut rng, &mut timers, t0)
                .is_none()
        );
        assert_eq!(ctl.growth(), GrowthFactor::IDENTITY);

        let mut haptics = RecordingHaptics::default();
        assert!(ctl.tap_decline(&mut haptics, &mut timers, t0));
        assert_eq!(haptics.patterns, vec![HAPTIC_PATTERN.to_vec()]);
        assert!(ctl.wiggling());
        assert_eq!(ctl.shake_started(), Some(t0));

        // a second tap restarts the shake
        let t1 = t0 + Duration::from_millis(100);
        ctl.tap_decline(&mut haptics, &mut timers, t1);
        assert_eq!(ctl.shake_started(), Some(t1));

        assert!(timers.drain_due(t0 + Duration::from_millis(349)).is_empty());
        let due = timers.drain_due(t0 + WIGGLE_DURATION);
        assert_eq!(due, vec![CardTimer::ClearWiggle]);
    }

    #[test]
    fn hover_input_ignores_taps() {
        let mut ctl = EvasionController::new(InputMode::hover());
        let mut timers = TimerQueue::new();
        let mut haptics = RecordingHaptics::default();
        assert!(!ctl.tap_decline(&mut haptics, &mut timers, Instant::now()));
        assert!(haptics.patterns.is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn accept_resets_growth() {
        let t0 = Instant::now();
        let mut ctl = EvasionController::new(InputMode::hover());
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..15u64 {
            let now = t0 + RELOCATION_COOLDOWN * (i as u32 + 1);
            ctl.release_guard();
            ctl.handle_trigger(Trigger::PointerEnter, &geometry(), &mut rng, &mut timers, now);
        }
        assert!(ctl.growth().value() > 1.6);
        ctl.accept();
        assert_eq!(ctl.growth(), GrowthFactor::IDENTITY);
        assert_eq!(ctl.growth().value(), 1.0);
    }
}

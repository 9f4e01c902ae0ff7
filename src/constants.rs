//! Shared crate-wide constants.
//!
//! Distances are expressed in pixel-equivalent units. Terminal cells are
//! converted into units through [`crate::geometry::CellMetrics`].

use std::time::Duration;

/// Inset kept between the evasive button and the edges of its container
/// when it is relocated.
pub const RELOCATION_PADDING: f64 = 20.0;

/// Number of random placements tried before the last candidate is used even
/// if it overlaps the accept button.
pub const MAX_PLACEMENT_TRIES: usize = 25;

/// Pointer distance from the decline button's center below which the button
/// flees, even without the pointer entering it.
///
/// Units: pixel-equivalent. With the default 8x16 cell metrics this is about
/// sixteen columns or eight rows.
pub const PROXIMITY_RADIUS: f64 = 130.0;

/// Accept button growth per relocation, in hundredths of the scale factor.
pub const GROWTH_STEP: u32 = 6;

/// Extra growth, in hundredths, once the scale factor has passed
/// [`GROWTH_THRESHOLD`].
pub const GROWTH_BONUS: u32 = 2;

/// Scale factor (in hundredths) above which growth accelerates.
pub const GROWTH_THRESHOLD: u32 = 160;

/// Debounce between two relocations of the decline button.
pub const RELOCATION_COOLDOWN: Duration = Duration::from_millis(220);

/// Length of the decline button wiggle on touch-only input.
pub const WIGGLE_DURATION: Duration = Duration::from_millis(350);

/// Length of the accept button shake.
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);

/// Vibration pattern played on a touch-only decline tap: pulse, gap, pulse.
pub const HAPTIC_PATTERN: [Duration; 3] = [
    Duration::from_millis(100),
    Duration::from_millis(50),
    Duration::from_millis(100),
];

/// Lifetime of a burst particle, both its animation and its removal delay.
pub const BURST_DURATION: Duration = Duration::from_millis(900);

/// Maximum absolute burst displacement on each axis.
pub const BURST_SPREAD: f64 = 200.0;

/// Parallax strength applied per decorative layer.
pub const PARALLAX_STRENGTH: f64 = 0.03;

/// Base rotation of the decorative mini hearts, in degrees.
pub const MINI_HEART_ROTATION_DEG: f64 = 45.0;

pub const DEFAULT_AMBIENT_PARTICLES: usize = 25;
pub const DEFAULT_BURST_PARTICLES: usize = 25;

/// Pixel size of a terminal cell when the terminal does not report one.
pub const DEFAULT_CELL_WIDTH: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 16.0;

//! Default tuning values for drones, speed trackers and the fixed clock.
//!
//! These are the values used when no configuration file is supplied. Every
//! one of them can be overridden through [`crate::config::SimConfig`].

/// Slowest cruise speed a drone may draw at spawn, in units per second.
pub const MIN_CRUISE_SPEED: f32 = 1.0;
/// Fastest cruise speed a drone may draw at spawn, in units per second.
pub const MAX_CRUISE_SPEED: f32 = 2.5;
/// Lowest altitude at which a drone stops climbing.
pub const MIN_ASCEND_CEILING: f32 = 1.0;
/// Highest altitude at which a drone stops climbing.
pub const MAX_ASCEND_CEILING: f32 = 2.5;
/// Points awarded when a drone is defeated.
pub const POINT_VALUE: u32 = 100;

/// Grace period before a speed tracker trusts its source, in seconds.
///
/// Tracking hardware tends to jump on its first frames, which would
/// otherwise register as a huge speed.
pub const SETTLING_DELAY: f32 = 0.5;
/// Raw speeds below this are treated as duplicate samples and discarded.
pub const SPEED_EPSILON: f32 = 1e-7;

/// Fixed simulation step used by the demo binary, in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 50.0;

/// Effect kind requested when a drone explodes on its target.
pub const EXPLOSION_EFFECT: &str = "Explosion";

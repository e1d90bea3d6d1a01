//! Headless fixed-step driver.
//!
//! A windowed app lets Bevy's main loop run `FixedUpdate` from real time.
//! Tools and tests instead step the fixed clock by hand so each tick sees an
//! exact, chosen elapsed time.

use std::time::Duration;

use bevy::prelude::*;

/// Advances the fixed clock by `elapsed` and runs `FixedUpdate` once.
///
/// Commands queued by observers during the tick are applied before
/// returning.
///
/// # Panics
/// Panics if the world has no `Time<Fixed>` resource or no `FixedUpdate`
/// schedule, which [`crate::DronePlugin`] installs.
pub fn step_fixed(world: &mut World, elapsed: Duration) {
    world.resource_mut::<Time<Fixed>>().advance_by(elapsed);
    world.run_schedule(FixedUpdate);
    world.flush();
}

/// Runs `ticks` fixed steps of `elapsed` each.
///
/// # Panics
/// See [`step_fixed`].
pub fn run_fixed_ticks(world: &mut World, elapsed: Duration, ticks: u32) {
    for _ in 0..ticks {
        step_fixed(world, elapsed);
    }
}

//! Spawn-time helpers for drones and speed trackers.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::{Collider, SweptBody};
use crate::config::{DroneSettings, TrackerSettings};
use crate::drone::Drone;
use crate::speed::SpeedTracker;
use crate::systems::{TickActive, TrackedPoint};

/// Collision radius given to every spawned drone.
pub const DRONE_RADIUS: f32 = 0.15;

/// Random source for per-drone spawn draws.
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(StdRng);

impl SpawnRng {
    /// Seeds deterministically when `seed` is given, otherwise from entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64))
    }

    /// Generator to draw from.
    pub const fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.0
    }
}

/// Components of a scheduled drone starting at `at`.
///
/// # Examples
/// ```
/// use bevy::prelude::*;
/// use swarmblade::drone::Drone;
/// use swarmblade::spawn::drone_bundle;
/// let mut world = World::new();
/// let target = world.spawn(GlobalTransform::default()).id();
/// let drone = world
///     .spawn(drone_bundle(Drone::new(target, 2.0, 1.0, 100), Vec3::ZERO))
///     .id();
/// assert!(world.get::<Drone>(drone).is_some());
/// ```
#[must_use]
pub fn drone_bundle(drone: Drone, at: Vec3) -> impl Bundle {
    (
        drone,
        Transform::from_translation(at),
        SweptBody::default(),
        Collider::new(DRONE_RADIUS),
        TickActive,
    )
}

/// Components of a scheduled speed tracker sampling `source`.
#[must_use]
pub fn speed_tracker_bundle(settings: &TrackerSettings, source: Entity) -> impl Bundle {
    (SpeedTracker::new(settings), TrackedPoint(source), TickActive)
}

/// Spawns a drone drawn from the [`DroneSettings`] resource.
///
/// Run as an exclusive helper during setup; it borrows the world's
/// [`SpawnRng`].
///
/// # Panics
/// Panics if [`crate::DronePlugin`] has not inserted its resources.
pub fn spawn_drone(world: &mut World, at: Vec3, target: Entity) -> Entity {
    let settings = *world.resource::<DroneSettings>();
    let drone = world.resource_scope(|_, mut rng: Mut<SpawnRng>| {
        Drone::spawn(&settings, target, rng.rng_mut())
    });
    log::debug!(
        "spawning drone at {at:?}: speed {:.2}, ceiling {:.2}",
        drone.cruise_speed(),
        drone.ascend_ceiling()
    );
    world.spawn(drone_bundle(drone, at)).id()
}

/// Spawns a speed tracker configured from the
/// [`TrackerSettings`] resource.
///
/// # Panics
/// Panics if [`crate::DronePlugin`] has not inserted its resources.
pub fn spawn_speed_tracker(world: &mut World, source: Entity) -> Entity {
    let settings = *world.resource::<TrackerSettings>();
    world.spawn(speed_tracker_bundle(&settings, source)).id()
}

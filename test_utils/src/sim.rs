//! Headless simulation fixtures.

use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use swarmblade::{
    step_fixed, Collider, Drone, DronePhase, DronePlugin, EffectRequested, PointsEarned, SimFault,
    TickActive,
};

/// Outbound notifications captured during a test.
#[derive(Resource, Default, Debug)]
pub struct Recorded {
    /// Effect requests in arrival order.
    pub effects: Vec<EffectRequested>,
    /// Point awards in arrival order.
    pub points: Vec<u32>,
    /// Faults in arrival order.
    pub faults: Vec<SimFault>,
}

fn record_effect(event: On<EffectRequested>, mut recorded: ResMut<Recorded>) {
    recorded.effects.push(event.event().clone());
}

fn record_points(event: On<PointsEarned>, mut recorded: ResMut<Recorded>) {
    recorded.points.push(event.event().amount);
}

fn record_fault(event: On<SimFault>, mut recorded: ResMut<Recorded>) {
    recorded.faults.push(event.event().clone());
}

/// Installs observers that copy notifications into [`Recorded`].
pub fn record_notifications(world: &mut World) {
    world.init_resource::<Recorded>();
    world.add_observer(record_effect);
    world.add_observer(record_points);
    world.add_observer(record_fault);
}

/// Builds a world with `plugin` installed and notifications recorded.
///
/// The world is detached from its [`App`] so it can be shared across
/// threads by behaviour-test runners.
///
/// # Examples
/// ```
/// use swarmblade::DronePlugin;
/// use test_utils::headless_world;
/// let world = headless_world(DronePlugin::default().with_seed(1));
/// assert!(world.contains_resource::<test_utils::Recorded>());
/// ```
pub fn headless_world(plugin: DronePlugin) -> World {
    let mut app = App::new();
    app.add_plugins(plugin);
    let mut world = std::mem::take(app.world_mut());
    record_notifications(&mut world);
    world
}

/// Spawns a contactable target at `at`.
pub fn spawn_target(world: &mut World, at: Vec3, radius: f32) -> Entity {
    world
        .spawn((GlobalTransform::from_translation(at), Collider::new(radius)))
        .id()
}

/// Runs one fixed step of `seconds`.
pub fn tick(world: &mut World, seconds: f32) {
    step_fixed(world, Duration::from_secs_f32(seconds));
}

/// Current phase of `drone`.
///
/// # Panics
/// Panics if `drone` has no [`Drone`] component.
pub fn phase_of(world: &World, drone: Entity) -> DronePhase {
    world
        .get::<Drone>(drone)
        .map(Drone::phase)
        .unwrap_or_else(|| panic!("{drone:?} is not a drone"))
}

/// Whether `instance` still takes part in fixed-step updates.
pub fn is_scheduled(world: &World, instance: Entity) -> bool {
    world.get::<TickActive>(instance).is_some()
}

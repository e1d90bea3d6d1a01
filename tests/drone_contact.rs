//! Integration tests for drone contact, slicing and fault handling under the
//! fixed-step schedule.

use std::time::Duration;

use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::{fixture, rstest};
use swarmblade::{
    drone_bundle, run_fixed_ticks, Drone, DronePhase, DronePlugin, FaultContext, Sliced,
};
use test_utils::{headless_world, is_scheduled, phase_of, spawn_target, tick, Recorded};

const STEP: f32 = 0.1;

#[fixture]
fn world() -> World {
    headless_world(DronePlugin::default().with_seed(11))
}

fn spawn_climber(world: &mut World, target: Entity, cruise_speed: f32) -> Entity {
    world
        .spawn(drone_bundle(
            Drone::new(target, cruise_speed, 5.0, 100),
            Vec3::ZERO,
        ))
        .id()
}

fn translation(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<Transform>(entity)
        .expect("missing Transform")
        .translation
}

#[rstest]
fn touching_the_target_destroys_the_drone_on_the_third_tick(mut world: World) {
    let target = spawn_target(&mut world, Vec3::new(0.0, 1.0, 0.0), 0.3);
    let drone = spawn_climber(&mut world, target, 2.0);

    tick(&mut world, STEP);
    tick(&mut world, STEP);
    assert_eq!(phase_of(&world, drone), DronePhase::Ascending);
    assert!(world.resource::<Recorded>().effects.is_empty());

    tick(&mut world, STEP);
    assert_eq!(phase_of(&world, drone), DronePhase::Destroyed);
    assert!(!is_scheduled(&world, drone));

    let recorded = world.resource::<Recorded>();
    assert_eq!(recorded.effects.len(), 1);
    assert_eq!(recorded.effects[0].kind, "Explosion");
    assert_relative_eq!(recorded.effects[0].at.y, 0.6, epsilon = 1e-4);
    assert_eq!(recorded.points, vec![100]);
}

#[rstest]
fn destroyed_drone_stays_put_and_reports_once(mut world: World) {
    let target = spawn_target(&mut world, Vec3::new(0.0, 1.0, 0.0), 0.3);
    let drone = spawn_climber(&mut world, target, 2.0);
    for _ in 0..3 {
        tick(&mut world, STEP);
    }
    let resting = translation(&world, drone);

    run_fixed_ticks(&mut world, Duration::from_secs_f32(STEP), 5);

    assert_eq!(translation(&world, drone), resting);
    let recorded = world.resource::<Recorded>();
    assert_eq!(recorded.effects.len(), 1);
    assert_eq!(recorded.points, vec![100]);
}

#[rstest]
fn fast_drone_cannot_pass_through_its_target(mut world: World) {
    let target = spawn_target(&mut world, Vec3::new(0.0, 1.0, 0.0), 0.1);
    let drone = spawn_climber(&mut world, target, 30.0);

    tick(&mut world, STEP);

    assert!(translation(&world, drone).y > 2.0);
    assert_eq!(phase_of(&world, drone), DronePhase::Destroyed);
    assert_eq!(world.resource::<Recorded>().points, vec![100]);
}

#[rstest]
fn bystanders_in_the_flight_path_are_ignored(mut world: World) {
    let target = spawn_target(&mut world, Vec3::new(10.0, 0.0, 0.0), 0.3);
    spawn_target(&mut world, Vec3::new(0.0, 0.4, 0.0), 0.3);
    let drone = spawn_climber(&mut world, target, 2.0);

    for _ in 0..3 {
        tick(&mut world, STEP);
    }

    assert_eq!(phase_of(&world, drone), DronePhase::Ascending);
    assert!(is_scheduled(&world, drone));
    let recorded = world.resource::<Recorded>();
    assert!(recorded.effects.is_empty());
    assert!(recorded.points.is_empty());
}

#[rstest]
fn sliced_drone_scores_once_even_after_contact(mut world: World) {
    let target = spawn_target(&mut world, Vec3::new(0.0, 1.0, 0.0), 0.3);
    let drone = spawn_climber(&mut world, target, 2.0);

    world.trigger(Sliced { drone });
    world.trigger(Sliced { drone });
    world.flush();
    assert_eq!(world.resource::<Recorded>().points, vec![100]);
    assert_eq!(phase_of(&world, drone), DronePhase::Ascending);

    for _ in 0..3 {
        tick(&mut world, STEP);
    }

    assert_eq!(phase_of(&world, drone), DronePhase::Destroyed);
    let recorded = world.resource::<Recorded>();
    assert_eq!(recorded.effects.len(), 1);
    assert_eq!(recorded.points, vec![100]);
}

#[rstest]
fn missing_target_deregisters_only_that_drone(mut world: World) {
    let lost = spawn_target(&mut world, Vec3::new(5.0, 0.0, 0.0), 0.3);
    let kept = spawn_target(&mut world, Vec3::new(-5.0, 0.0, 0.0), 0.3);
    let orphan = spawn_climber(&mut world, lost, 2.0);
    let healthy = spawn_climber(&mut world, kept, 2.0);
    world.despawn(lost);

    tick(&mut world, STEP);
    tick(&mut world, STEP);

    assert!(!is_scheduled(&world, orphan));
    assert_eq!(translation(&world, orphan), Vec3::ZERO);
    assert!(is_scheduled(&world, healthy));
    assert_relative_eq!(translation(&world, healthy).y, 0.4, epsilon = 1e-4);

    let recorded = world.resource::<Recorded>();
    assert_eq!(recorded.faults.len(), 1);
    assert_eq!(recorded.faults[0].context, FaultContext::DroneTick);
    assert_eq!(recorded.faults[0].instance, orphan);
}

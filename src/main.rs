//! Headless demo: a ring of drones homes on the player while a swinging
//! blade tip cuts any it reaches fast enough.

use std::path::PathBuf;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use swarmblade::{
    init_logging, spawn_drone, spawn_speed_tracker, step_fixed, Charged, Collider, Drone,
    DronePlugin, EffectRequested, PointsEarned, SimConfig, Sliced, SpeedTracker, TickActive,
    TriggerAxis,
};

/// Player head the drones home on.
const PLAYER_HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
/// Radius of the player's contact sphere.
const PLAYER_RADIUS: f32 = 0.3;
/// Distance from the player at which drones spawn.
const SPAWN_RING: f32 = 4.0;
/// Reach of the swinging blade tip when cutting drones.
const BLADE_REACH: f32 = 0.35;
/// Tip speed needed for a swing to cut.
const CUT_SPEED: f32 = 2.0;

/// Headless melee drone simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 500)]
    ticks: u32,
    /// Number of drones spawned around the player
    #[arg(long, default_value_t = 6)]
    drones: u32,
    /// Seed for spawn-time draws
    #[arg(long)]
    seed: Option<u64>,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Resource, Default, Debug)]
struct Score {
    points: u64,
    explosions: u32,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn tally_points(event: On<PointsEarned>, mut score: ResMut<Score>) {
    score.points += u64::from(event.event().amount);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn tally_effects(event: On<EffectRequested>, mut score: ResMut<Score>) {
    let EffectRequested { kind, at } = event.event();
    info!("effect {kind} requested at {at:?}");
    score.explosions += 1;
}

/// Trigger pressure at `seconds`: held for most of each two-second swing.
const fn trigger_at(seconds: f32) -> f32 {
    if seconds % 2.0 < 1.5 {
        1.0
    } else {
        0.0
    }
}

/// Blade tip position at `seconds` into a figure-eight swing in front of the
/// player.
fn blade_tip(seconds: f32) -> Vec3 {
    let phase = seconds * std::f32::consts::TAU * 0.5;
    PLAYER_HEAD + Vec3::new(phase.sin() * 0.7, (2.0 * phase).sin() * 0.35 - 0.3, -0.5)
}

/// Cuts every live drone within reach of a fast enough blade tip.
fn slice_near_tip(world: &mut World, tip: Vec3, speed: f32) {
    if speed < CUT_SPEED {
        return;
    }
    let mut drones = world.query_filtered::<(Entity, &Transform), (With<Drone>, With<TickActive>)>();
    let cut: Vec<Entity> = drones
        .iter(world)
        .filter(|(_, transform)| transform.translation.distance(tip) <= BLADE_REACH)
        .map(|(entity, _)| entity)
        .collect();
    for drone in cut {
        world.trigger(Sliced { drone });
        world.flush();
        world.despawn(drone);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = args
        .config
        .as_deref()
        .map(SimConfig::load)
        .transpose()?
        .unwrap_or_default();
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut app = App::new();
    app.add_plugins(DronePlugin::from_config(&config)?)
        .init_resource::<Score>()
        .add_observer(tally_points)
        .add_observer(tally_effects);
    let world = app.world_mut();

    let player = world
        .spawn((
            GlobalTransform::from_translation(PLAYER_HEAD),
            Collider::new(PLAYER_RADIUS),
        ))
        .id();
    for index in 0..args.drones {
        let angle = std::f32::consts::TAU * index as f32 / args.drones.max(1) as f32;
        let at = Vec3::new(angle.cos() * SPAWN_RING, 0.0, angle.sin() * SPAWN_RING);
        spawn_drone(world, at, player);
    }
    let tip = world
        .spawn((
            GlobalTransform::from_translation(blade_tip(0.0)),
            TriggerAxis::default(),
            Charged::default(),
        ))
        .id();
    let tracker = spawn_speed_tracker(world, tip);

    let step = config.validate_timestep()?;
    for tick in 0..args.ticks {
        let seconds = tick as f32 * config.timestep;
        let tip_at = blade_tip(seconds);
        world.entity_mut(tip).insert((
            GlobalTransform::from_translation(tip_at),
            TriggerAxis(trigger_at(seconds)),
        ));
        world.run_schedule(Update);
        step_fixed(world, step);

        let speed = world
            .get::<SpeedTracker>(tracker)
            .map_or(0.0, SpeedTracker::current_speed);
        if world.get::<Charged>(tip).is_some_and(|charged| charged.0) {
            slice_near_tip(world, tip_at, speed);
        }
        if tick % 50 == 0 {
            info!("tick {tick}: blade speed {speed:.2}");
        }
    }

    let score = world.resource::<Score>();
    info!(
        "simulation finished after {} ticks: {} points, {} explosions",
        args.ticks, score.points, score.explosions
    );
    Ok(())
}

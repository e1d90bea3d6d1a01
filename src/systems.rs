//! Fixed-step systems and observers driving drones and speed trackers.
//!
//! Only entities carrying [`TickActive`] take part in a tick. Removing the
//! marker is how an instance leaves the schedule, whether it was destroyed
//! or hit a fault.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error, info};

use crate::body::{Collider, SweptBody, SweptPose};
use crate::drone::{ContactOutcome, Drone, DroneNotifier, EffectKind};
use crate::error::TickError;
use crate::events::{Contact, EffectRequested, FaultContext, PointsEarned, SimFault, Sliced};
use crate::speed::{Sample, SpeedTracker};
use crate::vector_math::sweep_touches;

/// Marks an instance as scheduled for fixed-step updates.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickActive;

/// Entity whose world position a [`SpeedTracker`] samples.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPoint(pub Entity);

/// Routes drone notifications into observer events.
struct CommandNotifier<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl DroneNotifier for CommandNotifier<'_, '_, '_> {
    fn spawn_effect(&mut self, kind: EffectKind, at: Vec3) {
        self.commands.trigger(EffectRequested {
            kind: kind.as_str().to_owned(),
            at,
        });
    }

    fn points_earned(&mut self, amount: u32) {
        self.commands.trigger(PointsEarned { amount });
    }
}

fn deregister(commands: &mut Commands, instance: Entity, context: FaultContext, err: &TickError) {
    commands.entity(instance).remove::<TickActive>();
    commands.trigger(SimFault::new(context, instance, err.to_string()));
}

/// Advances every scheduled drone by one fixed step.
///
/// A drone whose target no longer resolves is deregistered and reported
/// through [`SimFault`]; the rest of the swarm carries on.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn advance_drones_system(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut drones: Query<(Entity, &mut Drone, &mut Transform, &mut SweptBody), With<TickActive>>,
    targets: Query<&GlobalTransform>,
) {
    let elapsed = time.delta_secs();
    for (entity, mut drone, mut transform, mut body) in &mut drones {
        let target = drone.target();
        let Ok(target_transform) = targets.get(target) else {
            let err = TickError::UnresolvedTarget {
                drone: entity,
                target,
            };
            deregister(&mut commands, entity, FaultContext::DroneTick, &err);
            continue;
        };

        let mut pose = SweptPose {
            transform: &mut *transform,
            body: &mut *body,
        };
        if let Some(phase) = drone.advance(&mut pose, target_transform.translation(), elapsed) {
            debug!("drone {entity:?} entered {phase:?}");
        }
    }
}

/// Commits queued moves, recording each as a swept segment.
pub fn commit_swept_moves_system(mut bodies: Query<(&mut Transform, &mut SweptBody)>) {
    for (mut transform, mut body) in &mut bodies {
        if let Some(sweep) = body.commit(transform.translation) {
            transform.translation = sweep.to;
        }
    }
}

/// Tests each scheduled drone's latest sweep against every other collider.
///
/// Hits are reported as [`Contact`] events; whether they matter is decided
/// by the contact observer.
pub fn detect_contacts_system(
    mut commands: Commands,
    mut drones: Query<(Entity, &mut SweptBody, &Collider), (With<Drone>, With<TickActive>)>,
    colliders: Query<(Entity, &GlobalTransform, &Collider), Without<Drone>>,
) {
    for (drone, mut body, collider) in &mut drones {
        let Some(sweep) = body.take_sweep() else {
            continue;
        };
        for (other, placement, other_collider) in &colliders {
            if sweep_touches(
                sweep.from,
                sweep.to,
                collider.radius,
                placement.translation(),
                other_collider.radius,
            ) {
                commands.trigger(Contact { drone, other });
            }
        }
    }
}

/// Samples every scheduled speed tracker from its tracked point.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn sample_speed_trackers_system(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut trackers: Query<(Entity, &TrackedPoint, &mut SpeedTracker), With<TickActive>>,
    sources: Query<&GlobalTransform>,
) {
    let elapsed = time.delta_secs();
    for (entity, &TrackedPoint(source), mut tracker) in &mut trackers {
        let Ok(source_transform) = sources.get(source) else {
            let err = TickError::UnresolvedSource {
                tracker: entity,
                source_entity: source,
            };
            deregister(&mut commands, entity, FaultContext::TrackerTick, &err);
            continue;
        };

        match tracker.sample(source_transform.translation(), elapsed) {
            Ok(Sample::Enabled) => debug!("speed tracker {entity:?} enabled"),
            Ok(_) => {}
            Err(err) => {
                deregister(
                    &mut commands,
                    entity,
                    FaultContext::TrackerTick,
                    &TickError::from(err),
                );
            }
        }
    }
}

/// Destroys a drone that touched its target and takes it off the schedule.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn handle_contact(
    contact: On<Contact>,
    mut commands: Commands,
    mut drones: Query<(&mut Drone, &Transform)>,
) {
    let Contact { drone, other } = *contact.event();
    let Ok((mut state, transform)) = drones.get_mut(drone) else {
        debug!("contact for {drone:?} which is not a drone");
        return;
    };

    let at = transform.translation;
    let mut notifier = CommandNotifier {
        commands: &mut commands,
    };
    match state.on_contact(other, at, &mut notifier) {
        ContactOutcome::Destroyed => {
            commands.entity(drone).remove::<TickActive>();
        }
        ContactOutcome::Ignored => debug!("drone {drone:?} ignored contact with {other:?}"),
    }
}

/// Awards points for a slice, once per drone.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn handle_sliced(sliced: On<Sliced>, mut commands: Commands, mut drones: Query<&mut Drone>) {
    let drone = sliced.event().drone;
    let Ok(mut state) = drones.get_mut(drone) else {
        debug!("slice for {drone:?} which is not a drone");
        return;
    };
    let mut notifier = CommandNotifier {
        commands: &mut commands,
    };
    if state.notify_defeated(&mut notifier) {
        info!("drone {drone:?} sliced");
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn log_sim_fault(fault: On<SimFault>) {
    error!("{}", fault.event());
}

//! Observer events crossing the boundary between the simulation core and
//! its collaborators.
//!
//! Inbound: [`Contact`] from the physics backend and [`Sliced`] from the
//! combat layer. Outbound: [`EffectRequested`] for the effect pool,
//! [`PointsEarned`] for scoring and [`SimFault`] for diagnostics. Outbound
//! events are fire-and-forget; nothing in the core waits on an observer.

use bevy::prelude::{Entity, Event, Vec3};
use thiserror::Error;

/// Two colliders touched during a drone's swept move.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Drone whose sweep produced the contact.
    pub drone: Entity,
    /// Entity it touched. Only the drone's own target matters.
    pub other: Entity,
}

/// A drone was cut by an external slicing action.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sliced {
    /// Drone that was cut.
    pub drone: Entity,
}

/// Request for a pooled visual effect.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EffectRequested {
    /// Pool name of the effect.
    pub kind: String,
    /// World position to play it at.
    pub at: Vec3,
}

/// Points earned by defeating a drone.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsEarned {
    /// Amount to add to the score.
    pub amount: u32,
}

/// Where a [`SimFault`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultContext {
    /// While advancing a drone.
    DroneTick,
    /// While sampling a speed tracker.
    TrackerTick,
}

/// An instance hit a broken invariant and left the fixed schedule.
#[derive(Event, Debug, Clone, PartialEq, Eq, Error)]
#[error("{context:?} fault on {instance:?}: {detail}")]
pub struct SimFault {
    /// Where the failure occurred.
    pub context: FaultContext,
    /// Instance that was deregistered.
    pub instance: Entity,
    /// Description of the underlying error.
    pub detail: String,
}

impl SimFault {
    /// Convenience constructor used by systems to emit fault events.
    pub fn new(context: FaultContext, instance: Entity, detail: impl Into<String>) -> Self {
        Self {
            context,
            instance,
            detail: detail.into(),
        }
    }
}

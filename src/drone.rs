//! Melee drone motion: climb to a ceiling, then home on the target.
//!
//! A [`Drone`] is a three-phase state machine advanced once per fixed tick.
//! It never touches the ECS directly; the pose it drives is reached through
//! a [`KinematicBody`] and its outward notifications go through a
//! [`DroneNotifier`]. The Bevy systems in [`crate::systems`] supply both.

use bevy::prelude::{Component, Entity, Transform, Vec3};
use log::{debug, info};
use rand::Rng;

use crate::config::DroneSettings;
use crate::EXPLOSION_EFFECT;

/// Motion phase of a drone. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DronePhase {
    /// Climbing straight up towards the ascend ceiling.
    Ascending,
    /// Flying along its heading towards the target.
    Approaching,
    /// Hit the target; no longer moves.
    Destroyed,
}

/// Result of handing a contact to a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The other entity is not the target, or the drone is already gone.
    Ignored,
    /// The drone hit its target and is now [`DronePhase::Destroyed`].
    Destroyed,
}

/// Visual effects a drone may request from the effect pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Explosion played where a drone struck its target.
    Explosion,
}

impl EffectKind {
    /// Pool name of the effect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explosion => EXPLOSION_EFFECT,
        }
    }
}

/// Pose a drone steers.
///
/// Implementations decide how a move is committed. The ECS backend records
/// the move as a swept segment so contact detection sees continuous motion.
pub trait KinematicBody {
    /// Current world position.
    fn translation(&self) -> Vec3;
    /// Turns the body to face `target` immediately.
    fn face(&mut self, target: Vec3);
    /// Unit forward vector of the current orientation.
    fn heading(&self) -> Vec3;
    /// Requests a move to `to`.
    fn move_position(&mut self, to: Vec3);
}

/// Teleporting body: the move lands immediately.
impl KinematicBody for Transform {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn face(&mut self, target: Vec3) {
        self.look_at(target, Vec3::Y);
    }

    fn heading(&self) -> Vec3 {
        *self.forward()
    }

    fn move_position(&mut self, to: Vec3) {
        self.translation = to;
    }
}

/// Fire-and-forget collaborators told about a drone's demise.
#[cfg_attr(test, mockall::automock)]
pub trait DroneNotifier {
    /// Asks the effect pool for `kind` at `at`.
    fn spawn_effect(&mut self, kind: EffectKind, at: Vec3);
    /// Tells the scoring collaborator that `amount` points were earned.
    fn points_earned(&mut self, amount: u32);
}

/// Per-drone motion state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Drone {
    target: Entity,
    cruise_speed: f32,
    ascend_ceiling: f32,
    point_value: u32,
    phase: DronePhase,
    scored: bool,
}

impl Drone {
    /// Creates an ascending drone with explicit parameters.
    #[must_use]
    pub const fn new(target: Entity, cruise_speed: f32, ascend_ceiling: f32, point_value: u32) -> Self {
        Self {
            target,
            cruise_speed,
            ascend_ceiling,
            point_value,
            phase: DronePhase::Ascending,
            scored: false,
        }
    }

    /// Creates a drone whose speed and ceiling are drawn from `settings`.
    pub fn spawn<R: Rng + ?Sized>(settings: &DroneSettings, target: Entity, rng: &mut R) -> Self {
        let cruise_speed = settings.cruise_speed.sample(rng);
        let ascend_ceiling = settings.ascend_ceiling.sample(rng);
        Self::new(target, cruise_speed, ascend_ceiling, settings.point_value)
    }

    /// Entity the drone is homing on. The drone never owns it.
    #[must_use]
    pub const fn target(&self) -> Entity {
        self.target
    }

    /// Current motion phase.
    #[must_use]
    pub const fn phase(&self) -> DronePhase {
        self.phase
    }

    /// Speed drawn at spawn, in units per second.
    #[must_use]
    pub const fn cruise_speed(&self) -> f32 {
        self.cruise_speed
    }

    /// Altitude drawn at spawn at which climbing stops.
    #[must_use]
    pub const fn ascend_ceiling(&self) -> f32 {
        self.ascend_ceiling
    }

    /// Whether the scoring notification has already been issued.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.scored
    }

    /// Advances the drone by one fixed step of `elapsed` seconds.
    ///
    /// The body faces `target_position`, then moves straight up while
    /// ascending or along its heading while approaching. The ceiling is
    /// checked against the new position, so the tick that reaches it also
    /// switches phase. Large steps may overshoot the ceiling; the position is
    /// not clamped.
    ///
    /// Returns the phase entered on this tick, if any.
    pub fn advance<B: KinematicBody + ?Sized>(
        &mut self,
        body: &mut B,
        target_position: Vec3,
        elapsed: f32,
    ) -> Option<DronePhase> {
        if self.phase == DronePhase::Destroyed {
            return None;
        }
        body.face(target_position);
        let direction = if self.phase == DronePhase::Approaching {
            body.heading()
        } else {
            Vec3::Y
        };

        let to = body.translation() + direction * self.cruise_speed * elapsed;
        body.move_position(to);

        if self.phase == DronePhase::Ascending && to.y >= self.ascend_ceiling {
            self.phase = DronePhase::Approaching;
            debug!(
                "drone reached ceiling {:.2} at height {:.2}",
                self.ascend_ceiling, to.y
            );
            return Some(DronePhase::Approaching);
        }
        None
    }

    /// Handles a contact with `other` while the drone is at `at`.
    ///
    /// Only the target counts. Hitting it destroys the drone, requests an
    /// explosion and awards points unless a slice already did.
    pub fn on_contact<N: DroneNotifier + ?Sized>(
        &mut self,
        other: Entity,
        at: Vec3,
        notifier: &mut N,
    ) -> ContactOutcome {
        if other != self.target || self.phase == DronePhase::Destroyed {
            return ContactOutcome::Ignored;
        }
        self.phase = DronePhase::Destroyed;
        info!("drone struck its target at {at:?}");
        notifier.spawn_effect(EffectKind::Explosion, at);
        self.award(notifier);
        ContactOutcome::Destroyed
    }

    /// Records that an external action (a sword slice) defeated the drone.
    ///
    /// Emits the scoring notification the first time only. The motion phase
    /// is left alone; whoever sliced the drone tears it down.
    ///
    /// Returns `true` when points were awarded by this call.
    pub fn notify_defeated<N: DroneNotifier + ?Sized>(&mut self, notifier: &mut N) -> bool {
        self.award(notifier)
    }

    fn award<N: DroneNotifier + ?Sized>(&mut self, notifier: &mut N) -> bool {
        if self.scored {
            return false;
        }
        self.scored = true;
        notifier.points_earned(self.point_value);
        true
    }
}

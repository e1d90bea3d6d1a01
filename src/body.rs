//! Swept kinematic body backing drones in the ECS.
//!
//! Moves requested during a tick are held as pending and committed by
//! [`crate::systems::commit_swept_moves_system`], which records the segment
//! travelled so contact detection can test the whole path rather than the
//! end point alone.

use bevy::prelude::{Component, Transform, Vec3};

use crate::drone::KinematicBody;

/// Segment travelled by a body during one committed move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Position before the move.
    pub from: Vec3,
    /// Position after the move.
    pub to: Vec3,
}

/// Move buffer owned by exactly one drone.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct SweptBody {
    pending: Option<Vec3>,
    sweep: Option<Sweep>,
}

impl SweptBody {
    /// Queues a move to `to`, replacing any earlier request this tick.
    pub const fn request(&mut self, to: Vec3) {
        self.pending = Some(to);
    }

    /// Destination queued for the next commit, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<Vec3> {
        self.pending
    }

    /// Commits the pending move starting at `from`.
    ///
    /// Returns the recorded sweep, or `None` when nothing was queued.
    pub fn commit(&mut self, from: Vec3) -> Option<Sweep> {
        let to = self.pending.take()?;
        let sweep = Sweep { from, to };
        self.sweep = Some(sweep);
        Some(sweep)
    }

    /// Hands over the last committed sweep so it is tested only once.
    pub const fn take_sweep(&mut self) -> Option<Sweep> {
        self.sweep.take()
    }
}

/// Sphere used for swept contact tests.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Radius in world units.
    pub radius: f32,
}

impl Collider {
    /// Creates a sphere collider.
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// A drone's pose paired with its swept body for one tick.
///
/// Orientation changes land on the transform at once; position changes are
/// queued on the body.
pub struct SweptPose<'a> {
    /// Drone transform.
    pub transform: &'a mut Transform,
    /// Drone move buffer.
    pub body: &'a mut SweptBody,
}

impl KinematicBody for SweptPose<'_> {
    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn face(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
    }

    fn heading(&self) -> Vec3 {
        *self.transform.forward()
    }

    fn move_position(&mut self, to: Vec3) {
        self.body.request(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn commit_without_request_records_nothing() {
        let mut body = SweptBody::default();
        assert_eq!(body.commit(Vec3::ZERO), None);
        assert_eq!(body.take_sweep(), None);
    }

    #[rstest]
    fn commit_records_sweep_once() {
        let mut body = SweptBody::default();
        body.request(Vec3::X);
        body.request(Vec3::Y);
        let sweep = body.commit(Vec3::ZERO);
        assert_eq!(
            sweep,
            Some(Sweep {
                from: Vec3::ZERO,
                to: Vec3::Y
            })
        );
        assert_eq!(body.pending(), None);
        assert_eq!(body.take_sweep(), sweep);
        assert_eq!(body.take_sweep(), None);
    }

    #[rstest]
    fn swept_pose_queues_instead_of_teleporting() {
        let mut transform = Transform::default();
        let mut body = SweptBody::default();
        let mut pose = SweptPose {
            transform: &mut transform,
            body: &mut body,
        };
        pose.face(Vec3::new(0.0, 0.0, -3.0));
        pose.move_position(Vec3::new(0.0, 0.0, -1.0));
        assert!((pose.heading() - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(pose.translation(), Vec3::ZERO);
        assert_eq!(body.pending(), Some(Vec3::new(0.0, 0.0, -1.0)));
    }
}

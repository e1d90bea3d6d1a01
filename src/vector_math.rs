//! Small helpers for swept-segment distance queries used by contact detection.
use glam::Vec3;

/// Returns the point on the segment `from..=to` closest to `point`.
///
/// A degenerate segment (both ends equal, or non-finite) collapses to
/// `from`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use swarmblade::vector_math::closest_point_on_segment;
/// let closest = closest_point_on_segment(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.0));
/// assert!((closest - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
/// ```
#[must_use]
pub fn closest_point_on_segment(from: Vec3, to: Vec3, point: Vec3) -> Vec3 {
    let span = to - from;
    let length_squared = span.length_squared();
    if !length_squared.is_finite() || length_squared <= f32::EPSILON {
        return from;
    }
    let t = ((point - from).dot(span) / length_squared).clamp(0.0, 1.0);
    from + span * t
}

/// Returns `true` when a sphere of `radius` swept along `from..=to` touches
/// a sphere of `other_radius` centred on `centre`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use swarmblade::vector_math::sweep_touches;
/// // Passes straight through the target between two samples.
/// assert!(sweep_touches(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), 0.1, Vec3::ZERO, 0.1));
/// assert!(!sweep_touches(Vec3::new(-2.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0), 0.1, Vec3::ZERO, 0.1));
/// ```
#[must_use]
pub fn sweep_touches(from: Vec3, to: Vec3, radius: f32, centre: Vec3, other_radius: f32) -> bool {
    let reach = radius + other_radius;
    closest_point_on_segment(from, to, centre).distance_squared(centre) <= reach * reach
}

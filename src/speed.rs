//! Filtered speed of a tracked point, such as a sword tip.
//!
//! The tracker ignores its source for a settling delay, then derives speed
//! from the distance travelled between accepted samples. When the source
//! updates more slowly than the fixed step, consecutive ticks see the same
//! position; those near-zero readings are discarded so the last genuine
//! speed survives.

use bevy::prelude::{Component, Vec3};

use crate::config::TrackerSettings;
use crate::error::SpeedError;

/// Fraction of a step below which leftover settling time counts as spent.
///
/// Subtracting `f32` steps accumulates rounding error; without this slack a
/// delay that is a whole number of steps can end one tick late.
const SETTLING_SLACK: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackerPhase {
    Settling { remaining: f32 },
    Ready { last_sample: Vec3 },
}

/// What a call to [`SpeedTracker::sample`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Still inside the settling delay.
    Settling,
    /// Settling finished on this tick; the position became the baseline.
    Enabled,
    /// New speed accepted.
    Accepted(f32),
    /// Raw speed fell below the threshold and was discarded.
    Rejected(f32),
}

/// Speed estimator for one tracked point.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpeedTracker {
    epsilon: f32,
    phase: TrackerPhase,
    speed: f32,
}

impl SpeedTracker {
    /// Creates a tracker that waits `settings.settling_delay()` seconds of
    /// ticks before trusting its source.
    #[must_use]
    pub const fn new(settings: &TrackerSettings) -> Self {
        Self {
            epsilon: settings.epsilon(),
            phase: TrackerPhase::Settling {
                remaining: settings.settling_delay(),
            },
            speed: 0.0,
        }
    }

    /// Last accepted speed in units per second. Never negative.
    ///
    /// # Examples
    /// ```
    /// use swarmblade::config::TrackerSettings;
    /// use swarmblade::speed::SpeedTracker;
    /// let tracker = SpeedTracker::new(&TrackerSettings::default());
    /// assert_eq!(tracker.current_speed(), 0.0);
    /// ```
    #[must_use]
    pub const fn current_speed(&self) -> f32 {
        self.speed
    }

    /// Whether the settling delay has elapsed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, TrackerPhase::Ready { .. })
    }

    /// Baseline position of the next speed computation, once ready.
    #[must_use]
    pub const fn last_sample(&self) -> Option<Vec3> {
        match self.phase {
            TrackerPhase::Ready { last_sample } => Some(last_sample),
            TrackerPhase::Settling { .. } => None,
        }
    }

    /// Feeds the position observed on this tick.
    ///
    /// # Errors
    /// Returns [`SpeedError::NonPositiveElapsed`] when `elapsed` is zero,
    /// negative or not finite. The tracker is left untouched.
    pub fn sample(&mut self, position: Vec3, elapsed: f32) -> Result<Sample, SpeedError> {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return Err(SpeedError::NonPositiveElapsed(elapsed));
        }

        match self.phase {
            TrackerPhase::Settling { remaining } => {
                let left = remaining - elapsed;
                if left > elapsed * SETTLING_SLACK {
                    self.phase = TrackerPhase::Settling { remaining: left };
                    return Ok(Sample::Settling);
                }
                self.phase = TrackerPhase::Ready {
                    last_sample: position,
                };
                Ok(Sample::Enabled)
            }
            TrackerPhase::Ready { last_sample } => {
                let raw = position.distance(last_sample) / elapsed;
                // NaN fails this comparison too and is discarded.
                if !(raw >= self.epsilon) {
                    return Ok(Sample::Rejected(raw));
                }
                self.speed = raw;
                self.phase = TrackerPhase::Ready {
                    last_sample: position,
                };
                Ok(Sample::Accepted(raw))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    const STEP: f32 = 0.02;

    fn settings(delay: f32, epsilon: f32) -> TrackerSettings {
        TrackerSettings::new(delay, epsilon).expect("valid tracker settings")
    }

    /// Tracker already enabled with its baseline at the origin.
    #[fixture]
    fn ready() -> SpeedTracker {
        let mut tracker = SpeedTracker::new(&settings(0.0, 1e-7));
        assert_eq!(tracker.sample(Vec3::ZERO, STEP), Ok(Sample::Enabled));
        tracker
    }

    #[rstest]
    fn settles_before_enabling() {
        let mut tracker = SpeedTracker::new(&settings(0.05, 1e-7));
        assert_eq!(tracker.sample(Vec3::X, STEP), Ok(Sample::Settling));
        assert_eq!(tracker.sample(Vec3::X * 5.0, STEP), Ok(Sample::Settling));
        assert!(!tracker.is_ready());

        assert_eq!(tracker.sample(Vec3::X * 9.0, STEP), Ok(Sample::Enabled));
        assert_eq!(tracker.last_sample(), Some(Vec3::X * 9.0));
        assert_eq!(tracker.current_speed(), 0.0);
    }

    #[rstest]
    #[case(0.3, 15)]
    #[case(0.14, 7)]
    #[case(0.02, 1)]
    #[case(0.5, 25)]
    fn delay_of_whole_steps_enables_on_the_last_of_them(
        #[case] delay: f32,
        #[case] ticks: usize,
    ) {
        let mut tracker = SpeedTracker::new(&settings(delay, 1e-7));
        for _ in 1..ticks {
            assert_eq!(tracker.sample(Vec3::ZERO, STEP), Ok(Sample::Settling));
        }
        assert_eq!(tracker.sample(Vec3::ZERO, STEP), Ok(Sample::Enabled));
    }

    #[rstest]
    fn first_delta_after_enabling_sets_speed(mut ready: SpeedTracker) {
        let outcome = ready.sample(Vec3::new(0.0, 0.06, 0.0), STEP);
        assert!(matches!(outcome, Ok(Sample::Accepted(_))));
        assert_relative_eq!(ready.current_speed(), 3.0, epsilon = 1e-4);
    }

    #[rstest]
    fn duplicate_sample_keeps_prior_speed(mut ready: SpeedTracker) {
        assert_eq!(ready.sample(Vec3::ZERO, STEP), Ok(Sample::Rejected(0.0)));
        assert_eq!(ready.current_speed(), 0.0);
        assert_eq!(ready.last_sample(), Some(Vec3::ZERO));
    }

    #[rstest]
    fn slow_sample_below_threshold_is_rejected() {
        let mut tracker = SpeedTracker::new(&settings(0.0, 0.5));
        tracker.sample(Vec3::ZERO, 0.1).expect("enable");
        tracker.sample(Vec3::new(0.3, 0.0, 0.0), 0.1).expect("accept");
        assert_relative_eq!(tracker.current_speed(), 3.0, epsilon = 1e-4);

        let baseline = tracker.last_sample();
        let outcome = tracker.sample(Vec3::new(0.33, 0.0, 0.0), 0.1);
        assert!(matches!(outcome, Ok(Sample::Rejected(raw)) if (raw - 0.3).abs() < 1e-3));
        assert_relative_eq!(tracker.current_speed(), 3.0, epsilon = 1e-4);
        assert_eq!(tracker.last_sample(), baseline);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.02)]
    #[case(f32::NAN)]
    fn non_positive_elapsed_is_an_error(mut ready: SpeedTracker, #[case] elapsed: f32) {
        let before = ready.clone();
        assert!(matches!(
            ready.sample(Vec3::ONE, elapsed),
            Err(SpeedError::NonPositiveElapsed(_))
        ));
        assert_eq!(ready, before);
    }

    #[rstest]
    fn speed_is_never_negative_across_a_jittery_stream(mut ready: SpeedTracker) {
        let positions = [
            Vec3::ZERO,
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(-0.2, 0.1, 0.0),
            Vec3::new(-0.2, 0.1, 0.0),
            Vec3::new(-0.2, 0.1, 0.3),
        ];
        for position in positions {
            ready.sample(position, STEP).expect("positive step");
            assert!(ready.current_speed() >= 0.0);
        }
        assert!(ready.current_speed() > 0.0);
    }
}

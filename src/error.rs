//! Error types shared by the drone and speed tracker modules.

use bevy::prelude::Entity;
use thiserror::Error;

/// Invalid configuration detected while building settings.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// A `[min, max]` range whose minimum exceeds its maximum.
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// A range bound that is NaN or infinite.
    #[error("range bounds must be finite, got [{min}, {max}]")]
    NonFiniteRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// A range too wide for its span to be represented.
    #[error("range [{min}, {max}] is too wide to sample from")]
    RangeTooWide {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// Settling delay that is negative or not finite.
    #[error("settling delay must be a finite, non-negative number of seconds, got {0}")]
    InvalidSettlingDelay(f32),
    /// Speed threshold that is negative or not finite.
    #[error("speed epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f32),
    /// Fixed timestep that is zero, negative, not finite or too long for a
    /// `Duration`.
    #[error("timestep must be a positive number of seconds that fits a duration, got {0}")]
    InvalidTimestep(f32),
}

/// Failure computing a speed sample.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpeedError {
    /// The scheduler handed over an elapsed time that cannot divide a distance.
    #[error("elapsed time must be positive and finite, got {0}")]
    NonPositiveElapsed(f32),
}

/// Per-tick failure that removes one instance from the fixed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TickError {
    /// The drone's target entity no longer has a resolvable position.
    #[error("drone {drone:?} lost its target {target:?}")]
    UnresolvedTarget {
        /// Drone being advanced.
        drone: Entity,
        /// Target handle that failed to resolve.
        target: Entity,
    },
    /// The tracked point feeding a speed tracker no longer resolves.
    #[error("speed tracker {tracker:?} lost its source {source_entity:?}")]
    UnresolvedSource {
        /// Tracker being sampled.
        tracker: Entity,
        /// Source handle that failed to resolve.
        source_entity: Entity,
    },
    /// Speed sampling rejected the tick's elapsed time.
    #[error(transparent)]
    Speed(#[from] SpeedError),
}

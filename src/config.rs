//! Validated configuration for drones, speed trackers and the fixed clock.
//!
//! Settings are checked when they are built, whether through the
//! constructors or through serde, so an invalid range never reaches a
//! spawned instance. Once inserted as resources they are read-only.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use bevy::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{
    FIXED_TIMESTEP, MAX_ASCEND_CEILING, MAX_CRUISE_SPEED, MIN_ASCEND_CEILING, MIN_CRUISE_SPEED,
    POINT_VALUE, SETTLING_DELAY, SPEED_EPSILON,
};

#[derive(Deserialize)]
struct RawRange {
    min: f32,
    max: f32,
}

/// Inclusive `[min, max]` range drawn from uniformly at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct SpawnRange {
    min: f32,
    max: f32,
}

impl TryFrom<RawRange> for SpawnRange {
    type Error = ConfigError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl SpawnRange {
    /// Builds a range, rejecting bounds it could not be sampled from.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonFiniteRange`] when either bound is NaN or
    /// infinite, [`ConfigError::InvertedRange`] when `min > max` and
    /// [`ConfigError::RangeTooWide`] when `max - min` overflows.
    ///
    /// # Examples
    /// ```
    /// use swarmblade::config::SpawnRange;
    /// assert!(SpawnRange::new(1.0, 2.5).is_ok());
    /// assert!(SpawnRange::new(3.0, 2.0).is_err());
    /// assert!(SpawnRange::new(-3.0e38, 3.0e38).is_err());
    /// ```
    pub const fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteRange { min, max });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        if !(max - min).is_finite() {
            return Err(ConfigError::RangeTooWide { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Draws a value uniformly from the range, bounds included.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Per-drone spawn configuration.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneSettings {
    /// Range the cruise speed is drawn from, in units per second.
    pub cruise_speed: SpawnRange,
    /// Range the ascend ceiling is drawn from, in world units along +Y.
    pub ascend_ceiling: SpawnRange,
    /// Points awarded when the drone is defeated.
    pub point_value: u32,
}

impl Default for DroneSettings {
    fn default() -> Self {
        Self {
            cruise_speed: SpawnRange {
                min: MIN_CRUISE_SPEED,
                max: MAX_CRUISE_SPEED,
            },
            ascend_ceiling: SpawnRange {
                min: MIN_ASCEND_CEILING,
                max: MAX_ASCEND_CEILING,
            },
            point_value: POINT_VALUE,
        }
    }
}

#[derive(Deserialize)]
struct RawTrackerSettings {
    #[serde(default = "default_settling_delay")]
    settling_delay: f32,
    #[serde(default = "default_epsilon")]
    epsilon: f32,
}

const fn default_settling_delay() -> f32 {
    SETTLING_DELAY
}

const fn default_epsilon() -> f32 {
    SPEED_EPSILON
}

/// Speed tracker configuration.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackerSettings")]
pub struct TrackerSettings {
    settling_delay: f32,
    epsilon: f32,
}

impl TryFrom<RawTrackerSettings> for TrackerSettings {
    type Error = ConfigError;

    fn try_from(raw: RawTrackerSettings) -> Result<Self, Self::Error> {
        Self::new(raw.settling_delay, raw.epsilon)
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            settling_delay: SETTLING_DELAY,
            epsilon: SPEED_EPSILON,
        }
    }
}

impl TrackerSettings {
    /// Builds tracker settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidSettlingDelay`] or
    /// [`ConfigError::InvalidEpsilon`] for negative or non-finite inputs.
    pub const fn new(settling_delay: f32, epsilon: f32) -> Result<Self, ConfigError> {
        if !settling_delay.is_finite() || settling_delay < 0.0 {
            return Err(ConfigError::InvalidSettlingDelay(settling_delay));
        }
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            settling_delay,
            epsilon,
        })
    }

    /// Seconds of simulated time before the tracker trusts its source.
    #[must_use]
    pub const fn settling_delay(&self) -> f32 {
        self.settling_delay
    }

    /// Minimum raw speed accepted as genuine motion.
    #[must_use]
    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

const fn default_timestep() -> f32 {
    FIXED_TIMESTEP
}

/// Complete simulation configuration as loaded by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Drone spawn settings.
    pub drone: DroneSettings,
    /// Speed tracker settings.
    pub tracker: TrackerSettings,
    /// Fixed step in seconds.
    #[serde(default = "default_timestep")]
    pub timestep: f32,
    /// Seed for spawn-time draws; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            drone: DroneSettings::default(),
            tracker: TrackerSettings::default(),
            timestep: default_timestep(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections fall back to the defaults in [`crate::constants`].
    ///
    /// # Errors
    /// Returns the serde error for malformed JSON or invalid settings.
    ///
    /// # Examples
    /// ```
    /// use swarmblade::config::SimConfig;
    /// let config = SimConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
    /// assert_eq!(config.seed, Some(7));
    /// assert_eq!(config.drone.point_value, 100);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    /// Fails when the file cannot be read, does not parse, or carries a
    /// non-positive timestep.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate_timestep()?;
        Ok(config)
    }

    /// Converts the fixed step into a non-zero [`Duration`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTimestep`] for negative or non-finite
    /// values, for steps that round to zero nanoseconds and for steps too
    /// long to fit a `Duration`.
    pub fn validate_timestep(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f32(self.timestep)
            .ok()
            .filter(|step| !step.is_zero())
            .ok_or(ConfigError::InvalidTimestep(self.timestep))
    }
}

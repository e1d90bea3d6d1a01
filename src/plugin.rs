//! Bevy plugin wiring drone and speed tracker systems into the schedule.

use std::time::Duration;

use bevy::prelude::*;

use crate::charge::{update_charge_system, TriggerAxis};
use crate::config::{DroneSettings, SimConfig, TrackerSettings};
use crate::error::ConfigError;
use crate::spawn::SpawnRng;
use crate::systems::{
    advance_drones_system, commit_swept_moves_system, detect_contacts_system, handle_contact,
    handle_sliced, log_sim_fault, sample_speed_trackers_system,
};

/// Bevy plugin installing the fixed-step drone and speed tracker systems.
///
/// Settings arrive already validated, so building the plugin cannot fail.
/// Drone motion runs as an ordered chain: advance, commit the swept move,
/// then test contacts. Speed trackers run beside it; the two share nothing.
#[derive(Debug, Clone, Default)]
pub struct DronePlugin {
    drone: DroneSettings,
    tracker: TrackerSettings,
    timestep: Option<Duration>,
    seed: Option<u64>,
}

impl DronePlugin {
    /// Creates a plugin with explicit settings and the default fixed step.
    #[must_use]
    pub const fn new(drone: DroneSettings, tracker: TrackerSettings) -> Self {
        Self {
            drone,
            tracker,
            timestep: None,
            seed: None,
        }
    }

    /// Creates a plugin from a loaded configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTimestep`] when the configured step
    /// does not convert to a non-zero `Duration`.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        let step = config.validate_timestep()?;
        Ok(Self {
            drone: config.drone,
            tracker: config.tracker,
            timestep: Some(step),
            seed: config.seed,
        })
    }

    /// Seeds spawn-time draws for reproducible runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Plugin for DronePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_sim_fault)
            .add_observer(handle_contact)
            .add_observer(handle_sliced);

        app.insert_resource(self.drone)
            .insert_resource(self.tracker)
            .insert_resource(SpawnRng::new(self.seed));

        let fixed = self
            .timestep
            .map_or_else(Time::<Fixed>::default, Time::<Fixed>::from_duration);
        app.insert_resource(fixed);

        app.add_systems(
            FixedUpdate,
            (
                (
                    advance_drones_system,
                    commit_swept_moves_system,
                    detect_contacts_system,
                )
                    .chain(),
                sample_speed_trackers_system,
            ),
        );
        app.add_systems(Update, update_charge_system::<TriggerAxis>);
    }
}

//! Library crate providing fixed-step melee drone and blade speed logic.
//! Re-exports common components and systems for the main application and tests.
pub mod body;
pub mod charge;
pub mod config;
pub mod constants;
pub mod drone;
pub mod error;
pub mod events;
pub mod logging;
pub mod plugin;
pub mod schedule;
pub mod spawn;
pub mod speed;
pub mod systems;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use body::{Collider, Sweep, SweptBody, SweptPose};
pub use charge::{update_charge_system, ChargeSignal, Charged, TriggerAxis};
pub use config::{DroneSettings, SimConfig, SpawnRange, TrackerSettings};
pub use drone::{ContactOutcome, Drone, DroneNotifier, DronePhase, EffectKind, KinematicBody};
pub use error::{ConfigError, SpeedError, TickError};
pub use events::{Contact, EffectRequested, FaultContext, PointsEarned, SimFault, Sliced};
pub use logging::init as init_logging;
pub use plugin::DronePlugin;
pub use schedule::{run_fixed_ticks, step_fixed};
pub use spawn::{drone_bundle, spawn_drone, spawn_speed_tracker, speed_tracker_bundle, SpawnRng};
pub use speed::{Sample, SpeedTracker};
pub use systems::{
    advance_drones_system, commit_swept_moves_system, detect_contacts_system, handle_contact,
    handle_sliced, sample_speed_trackers_system, TickActive, TrackedPoint,
};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use swarmblade::prelude::*;
    //! ```

    pub use crate::step_fixed;
    pub use crate::Collider;
    pub use crate::Contact;
    pub use crate::Drone;
    pub use crate::DronePhase;
    pub use crate::DronePlugin;
    pub use crate::SimConfig;
    pub use crate::Sliced;
    pub use crate::SpeedTracker;
    pub use crate::TickActive;
}

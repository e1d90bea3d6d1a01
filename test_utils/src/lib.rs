//! Utility helpers for tests.
//!
//! Builds headless worlds with [`swarmblade::DronePlugin`] installed and
//! records every outbound notification so tests can count them.

pub mod sim;

pub use sim::{
    headless_world, is_scheduled, phase_of, record_notifications, spawn_target, tick, Recorded,
};

//! Charge signal for the blade's charge effect.
//!
//! Input hardware differs per controller, so the system that drives
//! [`Charged`] is generic over any [`ChargeSignal`] component.

use bevy::prelude::*;

/// Source the charge state is read from.
pub trait ChargeSignal {
    /// Whether the signal currently asks for a charge.
    fn is_charged(&self) -> bool;
}

/// Analogue trigger reading in `[0, 1]`.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct TriggerAxis(pub f32);

impl ChargeSignal for TriggerAxis {
    fn is_charged(&self) -> bool {
        self.0 > 0.0
    }
}

/// Charge state consumed by animation and effects.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Charged(pub bool);

/// Copies each entity's signal `S` into its [`Charged`] flag.
///
/// The flag is only written when it changes, so `Changed<Charged>` filters
/// downstream fire on edges.
pub fn update_charge_system<S: Component + ChargeSignal>(mut query: Query<(&S, &mut Charged)>) {
    for (signal, mut charged) in &mut query {
        let now = signal.is_charged();
        if charged.0 != now {
            charged.0 = now;
        }
    }
}

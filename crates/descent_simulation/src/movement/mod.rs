//! Movement domain: горизонтальная скорость + variable-height jump
//!
//! Содержит:
//! - MovementConfig / MovementPhysics (jump state machine)
//! - системы ground probe, интеграции и derived state

use bevy::prelude::*;
use crate::controller::ControllerSet;

pub mod components;
pub mod systems;


pub use components::*;
pub use systems::*;

/// Movement Plugin
///
/// Physics tick = ground probe (Sense) + интеграция (Physics).
/// Derived state: после физики (Derive).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, probe_ground_contact.in_set(ControllerSet::Sense))
            .add_systems(FixedUpdate, integrate_motion.in_set(ControllerSet::Physics))
            .add_systems(FixedUpdate, update_derived_state.in_set(ControllerSet::Derive));
    }
}

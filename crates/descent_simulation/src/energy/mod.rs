//! Energy domain: ресурс прыжков
//!
//! Прыжок стоит `jump_cost`, восстановление только пока персонаж сидит.
//! Нехватка энергии: advisory (Depleted), не ошибка.

use bevy::prelude::*;
use crate::controller::ControllerSet;

pub mod components;
pub mod events;
pub mod systems;


pub use components::{EnergyConfig, EnergyEvent, EnergyPool, ObserverId};
pub use events::{EnergyChanged, EnergyDepleted, EnergyRestored};
pub use systems::{forward_energy_notifications, tick_energy_restore};

/// Energy Plugin
///
/// - Timers: timed restore
/// - Present: outbox → EnergyChanged / EnergyDepleted / EnergyRestored
pub struct EnergyPlugin;

impl Plugin for EnergyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnergyChanged>()
            .add_event::<EnergyDepleted>()
            .add_event::<EnergyRestored>();

        app.add_systems(FixedUpdate, tick_energy_restore.in_set(ControllerSet::Timers))
            .add_systems(
                FixedUpdate,
                forward_energy_notifications.in_set(ControllerSet::Present),
            );
    }
}

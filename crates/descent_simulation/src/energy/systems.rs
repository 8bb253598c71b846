//! Energy системы

use bevy::prelude::*;
use super::components::{EnergyEvent, EnergyPool};
use super::events::{EnergyChanged, EnergyDepleted, EnergyRestored};

/// Система: timed restore (FixedUpdate, elapsed fixed time)
pub fn tick_energy_restore(mut pools: Query<&mut EnergyPool>, time: Res<Time<Fixed>>) {
    let delta = time.delta();

    for mut pool in pools.iter_mut() {
        if pool.is_restoring() {
            pool.tick(delta);
        }
    }
}

/// Система: outbox EnergyPool → ECS события
pub fn forward_energy_notifications(
    mut pools: Query<(Entity, &mut EnergyPool)>,
    mut changed: EventWriter<EnergyChanged>,
    mut depleted: EventWriter<EnergyDepleted>,
    mut restored: EventWriter<EnergyRestored>,
) {
    for (entity, mut pool) in pools.iter_mut() {
        for event in pool.drain_notifications() {
            match event {
                EnergyEvent::Changed { current, max } => {
                    changed.write(EnergyChanged { entity, current, max });
                }
                EnergyEvent::Depleted => {
                    depleted.write(EnergyDepleted { entity });
                }
                EnergyEvent::Restored => {
                    restored.write(EnergyRestored { entity });
                }
            }
        }
    }
}

//! Energy события для UI sink (energy bar, "нет энергии" flash)

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyDepleted {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyRestored {
    pub entity: Entity,
}

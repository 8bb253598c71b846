//! Controller события для animation sink

use bevy::prelude::*;

/// Прыжок реально начался (энергия списана)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTriggered {
    pub entity: Entity,
}

/// Interaction состоялся
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractTriggered {
    pub entity: Entity,
    pub target: Entity,
}

//! Player: управляемый персонаж
//!
//! `Player`: marker + Required Components: всё, что нужно controller,
//! физике, энергии и negotiation protocol, добавляется автоматически.

use bevy::prelude::*;
use crate::controller::{PlayerInput, PresentationSignals};
use crate::energy::{EnergyConfig, EnergyPool};
use crate::interaction::{CurrentSeat, Hands, InteractionRegistry};
use crate::movement::{MovementConfig, MovementPhysics};
use crate::state::PlayerStateMachine;

/// Marker component для управляемого персонажа
///
/// Системы ядра используют `With<Player>` для персонажа и
/// `Without<Player>` для объектов мира (платформы, стулья, ключи).
///
/// # Single-player
/// Обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Transform,
    PlayerStateMachine,
    MovementPhysics,
    EnergyPool,
    PlayerInput,
    InteractionRegistry,
    Hands,
    CurrentSeat,
    PresentationSignals
)]
pub struct Player;

/// Bundle персонажа с конкретными конфигами
pub fn player_bundle(
    position: Vec3,
    movement: MovementConfig,
    energy: EnergyConfig,
) -> impl Bundle {
    (
        Player,
        Transform::from_translation(position),
        MovementPhysics::new(movement),
        EnergyPool::new(energy),
    )
}

/// Спавн персонажа с дефолтными конфигами
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn(player_bundle(
            position,
            MovementConfig::default(),
            EnergyConfig::default(),
        ))
        .id()
}

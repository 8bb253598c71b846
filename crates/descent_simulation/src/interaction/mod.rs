//! Interaction domain: registry + negotiation protocol
//!
//! - InteractionRegistry: interactables в радиусе, current = первый вошедший
//! - Interactable: Seat / LockedDoor / DescentPoint (закрытый набор)
//! - Interactor: контекст персонажа для callbacks
//! - Hands / Pickup: переноска одного предмета (ключи)
//!
//! Zone enter/exit: уведомления (Sense), interact: gated действие
//! из controller (Logic).

use bevy::prelude::*;
use crate::controller::ControllerSet;

pub mod error;
pub mod interactables;
pub mod interactor;
pub mod registry;
pub mod systems;


pub use error::InteractionRefusal;
pub use interactables::{
    DescentPoint, DescentState, DoorState, Interactable, InteractionZone, LockedDoor, Seat,
    SeatState,
};
pub use interactor::{
    CurrentSeat, Hands, HeldItem, InteractionWorld, Interactor, InteractorData, Pickup,
};
pub use registry::InteractionRegistry;
pub use systems::{
    carry_items, clear_registries_on_scene_unload, detect_interaction_zones, pick_up_items,
    release_dropped_items, sync_blocking_colliders, try_interact,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                clear_registries_on_scene_unload,
                pick_up_items,
                detect_interaction_zones,
                sync_blocking_colliders,
            )
                .chain()
                .in_set(ControllerSet::Sense),
        )
        .add_systems(
            FixedUpdate,
            (release_dropped_items, carry_items)
                .chain()
                .in_set(ControllerSet::Present),
        );
    }
}

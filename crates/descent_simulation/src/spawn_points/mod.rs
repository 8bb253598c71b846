//! Spawn points domain: прогресс (точки отдыха) + fast travel
//!
//! Реестр: process-wide сервис с явным lifecycle:
//! init на Startup, teardown на SessionEnded.

use bevy::prelude::*;
use crate::controller::ControllerSet;

pub mod registry;
pub mod systems;


pub use registry::{
    SavedSpawnPoint, SavedVec3, SpawnPointError, SpawnPointRecord, SpawnPointRegistry,
    SpawnPointSnapshot, SpawnTeleport,
};
pub use systems::{
    complete_spawn_teleport_on_scene_ready, handle_spawn_teleport_requests, init_spawn_registry,
    teardown_spawn_registry, PendingSpawnTeleport, RespawnRequested, SpawnPointConfig,
    TeleportToSpawnPoint,
};

pub struct SpawnPointPlugin;

impl Plugin for SpawnPointPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnPointConfig>()
            .init_resource::<PendingSpawnTeleport>()
            .add_event::<TeleportToSpawnPoint>()
            .add_event::<RespawnRequested>();

        app.add_systems(Startup, init_spawn_registry);

        app.add_systems(
            FixedUpdate,
            (
                handle_spawn_teleport_requests,
                complete_spawn_teleport_on_scene_ready,
                teardown_spawn_registry,
            )
                .chain()
                .in_set(ControllerSet::Timers),
        );
    }
}

//! Spawn point системы: lifecycle реестра, fast travel, respawn

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::controller::PresentationSignals;
use crate::logger;
use crate::movement::MovementPhysics;
use crate::player::Player;
use crate::scene::{ActiveScene, SceneLoadRequested, SceneReady, SessionEnded};
use crate::state::PlayerStateMachine;
use crate::timeline::{abort_task, Timeline};
use super::registry::{SpawnPointError, SpawnPointRegistry, SpawnTeleport};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct SpawnPointConfig {
    /// На SceneReady сцены текущей spawn point: переносить игрока туда
    pub move_to_spawn_on_scene_ready: bool,
}

impl Default for SpawnPointConfig {
    fn default() -> Self {
        Self {
            move_to_spawn_on_scene_ready: true,
        }
    }
}

/// Fast travel запрос (UI меню)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TeleportToSpawnPoint {
    pub id: String,
}

/// Respawn на текущей spawn point
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnRequested;

/// Teleport, ждущий загрузки сцены
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PendingSpawnTeleport {
    pub target: Option<(String, Vec3)>,
}

/// Startup: реестр живёт всю сессию
pub fn init_spawn_registry(mut commands: Commands, registry: Option<Res<SpawnPointRegistry>>) {
    if registry.is_none() {
        commands.insert_resource(SpawnPointRegistry::default());
        logger::log("SpawnPointRegistry initialized");
    }
}

/// SessionEnded: реестр уничтожается
pub fn teardown_spawn_registry(
    mut commands: Commands,
    mut session_events: EventReader<SessionEnded>,
    mut pending: ResMut<PendingSpawnTeleport>,
) {
    if session_events.read().last().is_some() {
        commands.remove_resource::<SpawnPointRegistry>();
        pending.target = None;
        logger::log_info("Session ended: SpawnPointRegistry torn down");
    }
}

/// Система: TeleportToSpawnPoint / RespawnRequested
pub fn handle_spawn_teleport_requests(
    mut teleports: EventReader<TeleportToSpawnPoint>,
    mut respawns: EventReader<RespawnRequested>,
    registry: Option<ResMut<SpawnPointRegistry>>,
    active_scene: Res<ActiveScene>,
    mut pending: ResMut<PendingSpawnTeleport>,
    mut load_requests: EventWriter<SceneLoadRequested>,
    mut timeline: ResMut<Timeline>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut MovementPhysics,
            &mut PlayerStateMachine,
            &mut PresentationSignals,
        ),
        With<Player>,
    >,
) {
    let requests: Vec<Option<String>> = teleports
        .read()
        .map(|event| Some(event.id.clone()))
        .chain(respawns.read().map(|_| None))
        .collect();

    if requests.is_empty() {
        return;
    }

    let Some(mut registry) = registry else {
        logger::log_error(&format!("{}", SpawnPointError::RegistryUnavailable));
        return;
    };

    for request in requests {
        let result = match &request {
            Some(id) => registry.teleport_to_spawn_point(id, active_scene.as_str()),
            None => registry.respawn(active_scene.as_str()),
        };

        let teleport = match result {
            Ok(teleport) => teleport,
            Err(error) => {
                logger::log_warning(&format!("Spawn teleport refused: {}", error));
                continue;
            }
        };

        // Отложенный спуск не должен перебить teleport
        for (entity, _, mut movement, mut state, mut signals) in players.iter_mut() {
            for task in timeline.take_owner(entity) {
                logger::log_info(&format!(
                    "Spawn teleport cancels scheduled task {:?} of {:?}",
                    task.id, entity
                ));
                abort_task(task.action, &mut movement, &mut state, &mut signals);
            }
        }

        match teleport {
            SpawnTeleport::Immediate(position) => {
                for (_, mut transform, mut movement, _, _) in players.iter_mut() {
                    movement.teleport(&mut transform, position);
                }
            }
            SpawnTeleport::AwaitScene { scene, position } => {
                pending.target = Some((scene.clone(), position));
                load_requests.write(SceneLoadRequested { scene });
            }
        }
    }
}

/// Система: SceneReady → отложенный teleport / перенос на current spawn
pub fn complete_spawn_teleport_on_scene_ready(
    mut ready_events: EventReader<SceneReady>,
    registry: Option<Res<SpawnPointRegistry>>,
    config: Res<SpawnPointConfig>,
    mut pending: ResMut<PendingSpawnTeleport>,
    mut players: Query<(&mut Transform, &mut MovementPhysics), With<Player>>,
) {
    for event in ready_events.read() {
        let position = match pending.target.take() {
            Some((scene, position)) if scene == event.scene => Some(position),
            other => {
                pending.target = other;
                registry
                    .as_ref()
                    .filter(|_| config.move_to_spawn_on_scene_ready)
                    .and_then(|registry| registry.current())
                    .filter(|current| current.scene == event.scene)
                    .map(|current| current.position)
            }
        };

        let Some(position) = position else {
            continue;
        };

        for (mut transform, mut movement) in players.iter_mut() {
            movement.teleport(&mut transform, position);
        }
        logger::log_info(&format!(
            "Scene '{}' ready: player moved to {:?}",
            event.scene, position
        ));
    }
}

//! SpawnPointRegistry: каталог найденных точек отдыха (session lifetime)
//!
//! - upsert по id (identity сохраняется, меняются position/scene)
//! - current хранится как id и резолвится lookup'ом, не копией
//! - teleport в другую сцену откладывается до SceneReady

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::logger;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnPointError {
    #[error("spawn point '{0}' not found")]
    NotFound(String),
    #[error("no current spawn point set")]
    NoCurrent,
    #[error("spawn point registry is not available")]
    RegistryUnavailable,
}

/// Запись каталога
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SpawnPointRecord {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub position: Vec3,
    pub scene: String,
}

/// Результат teleport: сразу или после загрузки сцены
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnTeleport {
    Immediate(Vec3),
    AwaitScene { scene: String, position: Vec3 },
}

/// Resource: реестр spawn points
///
/// Создаётся на Startup, удаляется на SessionEnded. Доступ только через
/// явный `Res`/`ResMut` handle.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct SpawnPointRegistry {
    entries: Vec<SpawnPointRecord>,
    current_id: Option<String>,
}

impl SpawnPointRegistry {
    /// Upsert: существующий id → только position/scene
    ///
    /// Возвращает true если запись новая.
    pub fn register_spawn_point(
        &mut self,
        id: &str,
        display_name: &str,
        description: &str,
        position: Vec3,
        scene: &str,
    ) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.id == id) {
            existing.position = position;
            existing.scene = scene.to_string();
            logger::log(&format!("Spawn point '{}' updated", id));
            return false;
        }

        self.entries.push(SpawnPointRecord {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            position,
            scene: scene.to_string(),
        });
        logger::log_info(&format!("Spawn point '{}' registered ({})", id, display_name));
        true
    }

    pub fn set_current_spawn_point(&mut self, id: &str) -> Result<(), SpawnPointError> {
        if !self.is_discovered(id) {
            logger::log_warning(&format!("Spawn point '{}' not found", id));
            return Err(SpawnPointError::NotFound(id.to_string()));
        }

        self.current_id = Some(id.to_string());
        logger::log_info(&format!("Current spawn point: '{}'", id));
        Ok(())
    }

    /// Вариант с position/scene: неизвестный id регистрируется
    /// (display name = id), известный обновляется, затем активируется
    pub fn set_current_spawn_point_at(&mut self, id: &str, position: Vec3, scene: &str) {
        self.register_spawn_point(id, id, "", position, scene);
        self.current_id = Some(id.to_string());
        logger::log_info(&format!(
            "Current spawn point: '{}' at {:?} in '{}'",
            id, position, scene
        ));
    }

    /// Teleport на точку: делает её current, сцена решает как двигать
    pub fn teleport_to_spawn_point(
        &mut self,
        id: &str,
        active_scene: &str,
    ) -> Result<SpawnTeleport, SpawnPointError> {
        let Some(record) = self.get(id) else {
            logger::log_warning(&format!("Cannot teleport to '{}': spawn point not found", id));
            return Err(SpawnPointError::NotFound(id.to_string()));
        };

        let teleport = if record.scene == active_scene {
            SpawnTeleport::Immediate(record.position)
        } else {
            SpawnTeleport::AwaitScene {
                scene: record.scene.clone(),
                position: record.position,
            }
        };

        self.current_id = Some(id.to_string());
        logger::log_info(&format!("Teleport to spawn point '{}': {:?}", id, teleport));
        Ok(teleport)
    }

    pub fn respawn(&mut self, active_scene: &str) -> Result<SpawnTeleport, SpawnPointError> {
        let Some(id) = self.current_id.clone() else {
            logger::log_warning("Cannot respawn: no current spawn point");
            return Err(SpawnPointError::NoCurrent);
        };

        self.teleport_to_spawn_point(&id, active_scene)
    }

    pub fn get(&self, id: &str) -> Option<&SpawnPointRecord> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn current(&self) -> Option<&SpawnPointRecord> {
        self.current_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Каталог в порядке обнаружения (fast-travel меню)
    pub fn discovered(&self) -> &[SpawnPointRecord] {
        &self.entries
    }

    pub fn is_discovered(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_id = None;
    }

    pub fn snapshot(&self) -> SpawnPointSnapshot {
        SpawnPointSnapshot {
            entries: self.entries.iter().map(SavedSpawnPoint::from_record).collect(),
            current_id: self.current_id.clone(),
        }
    }

    /// Восстановление из snapshot (дубликаты id схлопываются, висячий
    /// current_id отбрасывается)
    pub fn from_snapshot(snapshot: SpawnPointSnapshot) -> Self {
        let mut registry = Self::default();
        for saved in snapshot.entries {
            registry.register_spawn_point(
                &saved.id,
                &saved.display_name,
                &saved.description,
                saved.position.to_vec3(),
                &saved.scene,
            );
        }

        registry.current_id = snapshot
            .current_id
            .filter(|id| registry.is_discovered(id));
        registry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedVec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl SavedVec3 {
    fn from_vec3(value: Vec3) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }

    fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSpawnPoint {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub position: SavedVec3,
    pub scene: String,
}

impl SavedSpawnPoint {
    fn from_record(record: &SpawnPointRecord) -> Self {
        Self {
            id: record.id.clone(),
            display_name: record.display_name.clone(),
            description: record.description.clone(),
            position: SavedVec3::from_vec3(record.position),
            scene: record.scene.clone(),
        }
    }
}

/// Persisted shape: упорядоченный каталог + current id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnPointSnapshot {
    pub entries: Vec<SavedSpawnPoint>,
    pub current_id: Option<String>,
}

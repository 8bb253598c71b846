//! Scene boundary: контракт с внешним scene loader
//!
//! Ядро сцены НЕ грузит. Оно:
//! - просит загрузку (`SceneLoadRequested`)
//! - ждёт `SceneReady` (загрузка асинхронная)
//! - реагирует на `SceneUnloaded` / `SessionEnded` (cleanup)

use bevy::prelude::*;
use crate::controller::ControllerSet;
use crate::logger;

/// Идентификатор текущей загруженной сцены
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub struct ActiveScene(pub String);

impl ActiveScene {
    pub fn new(scene: impl Into<String>) -> Self {
        Self(scene.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ядро → scene loader: "загрузи сцену"
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneLoadRequested {
    pub scene: String,
}

/// Scene loader → ядро: сцена загружена и готова
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneReady {
    pub scene: String,
}

/// Scene loader → ядро: сцена выгружена (её entities уничтожаются)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneUnloaded {
    pub scene: String,
}

/// Конец игровой сессии (выход в меню)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnded;

/// Система: SceneReady → ActiveScene
pub fn apply_scene_ready(
    mut ready_events: EventReader<SceneReady>,
    mut active_scene: ResMut<ActiveScene>,
) {
    for event in ready_events.read() {
        if active_scene.0 != event.scene {
            logger::log_info(&format!(
                "Active scene: '{}' -> '{}'",
                active_scene.0, event.scene
            ));
            active_scene.0 = event.scene.clone();
        }
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveScene>()
            .add_event::<SceneLoadRequested>()
            .add_event::<SceneReady>()
            .add_event::<SceneUnloaded>()
            .add_event::<SessionEnded>();

        app.add_systems(FixedUpdate, apply_scene_ready.in_set(ControllerSet::Sense));
    }
}

//! DESCENT Simulation Core
//!
//! ECS-симуляция персонажа 2D side-scroller на Bevy 0.16 (headless).
//!
//! Ядро:
//! - PlayerStateMachine: gating всего, что персонаж может сделать за тик
//! - MovementPhysics: горизонталь + variable-height jump
//! - EnergyPool: ресурс прыжков, restore только сидя
//! - InteractionRegistry + negotiation protocol (стул / дверь / трос)
//! - Timeline: cancellable отложенный спуск
//! - SpawnPointRegistry: точки отдыха, fast travel, respawn
//!
//! Рендер, анимации, UI и загрузка сцен: внешние collaborators:
//! ядро только публикует сигналы/события и ждёт `SceneReady`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod controller;
pub mod energy;
pub mod interaction;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;
pub mod scene;
pub mod spawn_points;
pub mod state;
pub mod timeline;

// Re-export основных типов
pub use controller::{
    ControllerConfig, ControllerPlugin, ControllerSet, InteractTriggered, JumpTriggered,
    PlayerInput, PresentationSignals,
};
pub use energy::{
    EnergyChanged, EnergyConfig, EnergyDepleted, EnergyEvent, EnergyPlugin, EnergyPool,
    EnergyRestored,
};
pub use interaction::{
    DescentPoint, Hands, Interactable, InteractionPlugin, InteractionRefusal,
    InteractionRegistry, InteractionZone, LockedDoor, Pickup, Seat,
};
pub use movement::{MovementConfig, MovementPhysics, MovementPlugin};
pub use physics::{BlockingCollider, GroundSurface};
pub use player::{player_bundle, spawn_player, Player};
pub use scene::{ActiveScene, SceneLoadRequested, ScenePlugin, SceneReady, SceneUnloaded, SessionEnded};
pub use spawn_points::{
    PendingSpawnTeleport, RespawnRequested, SpawnPointConfig, SpawnPointError, SpawnPointPlugin,
    SpawnPointRegistry, TeleportToSpawnPoint,
};
pub use state::{PlayerState, PlayerStateMachine};
pub use timeline::{Timeline, TimelinePlugin};

/// Частота simulation тика (input + физика)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz, независимо от частоты рендера
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .add_plugins((
                ControllerPlugin,
                ScenePlugin,
                MovementPlugin,
                EnergyPlugin,
                InteractionPlugin,
                TimelinePlugin,
                SpawnPointPlugin,
            ));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);

    app
}

/// Headless App, где каждый `update()` = ровно один simulation тик
///
/// Время продвигается вручную, без wall clock (тесты, скрипты).
pub fn create_stepped_app() -> App {
    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / SIMULATION_HZ,
    )));

    // Первый update инициализирует часы (delta = 0), fixed тиков ещё нет
    app.update();
    app
}

/// Байтовый снимок всех компонентов `T` (Transform, PlayerStateMachine, ...)
///
/// Два прогона одного input скрипта должны дать одинаковые байты.
/// Порядок по `Entity::to_bits`, не по порядку обхода archetype'ов.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &T)>();
    let mut rows: Vec<(u64, String)> = query
        .iter(world)
        .map(|(entity, component)| (entity.to_bits(), format!("{:?}", component)))
        .collect();
    rows.sort_by_key(|(bits, _)| *bits);

    rows.into_iter()
        .flat_map(|(bits, text)| bits.to_le_bytes().into_iter().chain(text.into_bytes()))
        .collect()
}

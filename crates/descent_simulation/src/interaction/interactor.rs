//! Interactor: сторона персонажа в negotiation protocol
//!
//! Interactable получает `&mut Interactor` и через него двигает персонажа
//! (sit / leave / descent) и пользуется руками (ключ для двери).

use std::time::Duration;

use bevy::ecs::query::QueryData;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::controller::{ControllerConfig, PresentationSignals};
use crate::energy::EnergyPool;
use crate::logger;
use crate::movement::MovementPhysics;
use crate::physics::Aabb2;
use crate::scene::ActiveScene;
use crate::spawn_points::SpawnPointRegistry;
use crate::state::{PlayerState, PlayerStateMachine};
use crate::timeline::{ScheduledAction, Timeline};
use super::error::InteractionRefusal;
use super::registry::InteractionRegistry;

/// Предмет в руках
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct HeldItem {
    pub entity: Entity,
    pub tag: String,
}

/// Component: руки персонажа (максимум один предмет)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hands {
    carried: Option<HeldItem>,
}

impl Hands {
    pub fn carried_item(&self) -> Option<&HeldItem> {
        self.carried.as_ref()
    }

    pub fn has_carried_item(&self) -> bool {
        self.carried.is_some()
    }

    pub fn is_carrying(&self, tag: &str) -> bool {
        self.carried.as_ref().is_some_and(|item| item.tag == tag)
    }

    /// Занятые руки → false, предмет остаётся в мире
    pub fn pick_up(&mut self, item: HeldItem) -> bool {
        if self.carried.is_some() {
            return false;
        }
        self.carried = Some(item);
        true
    }

    /// Забрать предмет из рук (consume или drop решает вызывающий)
    pub fn take(&mut self) -> Option<HeldItem> {
        self.carried.take()
    }
}

/// Предмет в мире, который можно подобрать входом в его зону
///
/// После drop зона "взводится" снова только когда персонаж из неё вышел.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Pickup {
    pub tag: String,
    pub half_extents: Vec2,
    pub armed: bool,
    pub held: bool,
}

impl Pickup {
    pub fn new(tag: impl Into<String>, half_extents: Vec2) -> Self {
        Self {
            tag: tag.into(),
            half_extents,
            armed: true,
            held: false,
        }
    }

    pub fn bounds(&self, transform: &Transform) -> Aabb2 {
        Aabb2::from_center(transform.translation.truncate(), self.half_extents)
    }
}

/// Component: на каком стуле сидит персонаж
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CurrentSeat(pub Option<Entity>);

/// Компоненты персонажа, нужные negotiation protocol
#[derive(QueryData)]
#[query_data(mutable)]
pub struct InteractorData {
    pub entity: Entity,
    pub transform: &'static mut Transform,
    pub state: &'static mut PlayerStateMachine,
    pub movement: &'static mut MovementPhysics,
    pub energy: &'static mut EnergyPool,
    pub hands: &'static mut Hands,
    pub signals: &'static mut PresentationSignals,
    pub registry: &'static mut InteractionRegistry,
    pub seat: &'static mut CurrentSeat,
}

/// Ресурсы, нужные negotiation protocol
#[derive(SystemParam)]
pub struct InteractionWorld<'w> {
    pub timeline: ResMut<'w, Timeline>,
    pub spawn_registry: Option<ResMut<'w, SpawnPointRegistry>>,
    pub active_scene: Res<'w, ActiveScene>,
    pub config: Res<'w, ControllerConfig>,
}

impl InteractorDataItem<'_> {
    /// Разделить на registry и Interactor (оба нужны одновременно)
    pub fn split<'a>(
        &'a mut self,
        world: &'a mut InteractionWorld,
    ) -> (&'a mut InteractionRegistry, Interactor<'a>) {
        let interactor = Interactor {
            entity: self.entity,
            transform: &mut *self.transform,
            state: &mut *self.state,
            movement: &mut *self.movement,
            energy: &mut *self.energy,
            hands: &mut *self.hands,
            signals: &mut *self.signals,
            current_seat: &mut *self.seat,
            timeline: &mut *world.timeline,
            spawn_registry: world.spawn_registry.as_deref_mut(),
            active_scene: world.active_scene.as_str(),
            config: &*world.config,
            consumed_items: Vec::new(),
        };
        (&mut *self.registry, interactor)
    }
}

/// Контекст одного вызова protocol (enter / exit / interact / leave)
pub struct Interactor<'a> {
    pub entity: Entity,
    pub transform: &'a mut Transform,
    pub state: &'a mut PlayerStateMachine,
    pub movement: &'a mut MovementPhysics,
    pub energy: &'a mut EnergyPool,
    pub hands: &'a mut Hands,
    pub signals: &'a mut PresentationSignals,
    pub current_seat: &'a mut CurrentSeat,
    pub timeline: &'a mut Timeline,
    pub spawn_registry: Option<&'a mut SpawnPointRegistry>,
    pub active_scene: &'a str,
    pub config: &'a ControllerConfig,
    /// Использованные предметы: система их despawn'ит после вызова
    pub consumed_items: Vec<HeldItem>,
}

impl Interactor<'_> {
    pub fn is_sitting(&self) -> bool {
        self.state.is(PlayerState::Sitting)
    }

    pub fn carried_item(&self) -> Option<&HeldItem> {
        self.hands.carried_item()
    }

    /// Использовать предмет из рук (уничтожается, не дублируется)
    pub fn use_carried_item(&mut self) -> Option<HeldItem> {
        let item = self.hands.take()?;
        logger::log(&format!("Used carried item '{}' ({:?})", item.tag, item.entity));
        self.consumed_items.push(item.clone());
        Some(item)
    }

    /// Сесть: якорь стула, гравитация off, скорость 0, Sitting, restore энергии
    pub fn sit_at(&mut self, seat: Entity, anchor: Vec3) {
        self.movement.teleport(self.transform, anchor);
        self.movement.set_gravity_enabled(false);
        self.state.change_state(PlayerState::Sitting);
        self.energy.start_restore();
        self.current_seat.0 = Some(seat);
    }

    /// Встать (отдельное "leave" действие, не событие зоны)
    ///
    /// Небольшой толчок вверх чтобы не перезайти в зону стула сразу же.
    /// Возвращает стул, с которого встали.
    pub fn leave_seat(&mut self) -> Result<Option<Entity>, InteractionRefusal> {
        if !self.is_sitting() {
            return Err(InteractionRefusal::NotSitting);
        }

        self.transform.translation.y += self.config.seat_exit_nudge;
        self.movement.set_gravity_enabled(true);
        self.state.change_state(PlayerState::Idle);
        self.energy.stop_restore();
        Ok(self.current_seat.0.take())
    }

    /// Начать спуск: Descending, невидим, без гравитации, отложенный finish
    pub fn start_descent(&mut self, target: Vec3) -> Result<(), InteractionRefusal> {
        if self.timeline.has_pending(self.entity) {
            return Err(InteractionRefusal::DescentAlreadyScheduled);
        }

        if self.is_sitting() {
            self.energy.stop_restore();
            self.current_seat.0 = None;
        }

        self.state.change_state(PlayerState::Descending);
        self.signals.visible = false;
        self.movement.stop_movement();
        self.movement.set_gravity_enabled(false);

        let delay = Duration::try_from_secs_f32(self.config.descent_duration).unwrap_or(Duration::ZERO);
        self.timeline
            .schedule(self.entity, delay, ScheduledAction::FinishDescent { target });

        logger::log_info(&format!(
            "Descent started: {:?} -> {:?} in {:?}",
            self.entity, target, delay
        ));
        Ok(())
    }
}

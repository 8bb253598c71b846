//! Interactable объекты: стул, запертая дверь, точка спуска
//!
//! Закрытый набор вариантов, один и тот же контракт из трёх callbacks:
//! - `on_enter_zone` / `on_exit_zone`: уведомления (prompts, auto-trigger)
//! - `interact`: gated действие по кнопке
//!
//! Новый вид interactable = новый вариант enum.

use bevy::prelude::*;
use crate::logger;
use crate::physics::Aabb2;
use crate::spawn_points::{SpawnPointError, SpawnPointRegistry};
use super::error::InteractionRefusal;
use super::interactor::Interactor;

/// Trigger-зона вокруг interactable (центр = Transform)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct InteractionZone {
    pub half_extents: Vec2,
}

impl InteractionZone {
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    pub fn bounds(&self, transform: &Transform) -> Aabb2 {
        Aabb2::from_center(transform.translation.truncate(), self.half_extents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SeatState {
    #[default]
    Available,
    Occupied,
}

/// Стул: точка отдыха + spawn point
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Seat {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Куда сажаем персонажа (без якоря сесть нельзя)
    pub anchor: Option<Vec3>,
    pub state: SeatState,
    pub sit_prompt: bool,
    pub leave_prompt: bool,
}

impl Seat {
    /// Стул с id по умолчанию `seat_{name}_{x}_{y}` и display name = name
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        let name = name.into();
        Self {
            id: format!("seat_{}_{:.0}_{:.0}", name, position.x, position.y),
            display_name: name.clone(),
            name,
            description: String::new(),
            anchor: None,
            state: SeatState::Available,
            sit_prompt: false,
            leave_prompt: false,
        }
    }

    /// Пустой id игнорируется (остаётся сгенерированный)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.id = id;
        }
        self
    }

    /// Пустое имя игнорируется (остаётся имя объекта)
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        if !display_name.is_empty() {
            self.display_name = display_name;
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Для индикатора "активная spawn point"
    pub fn is_current_spawn_point(&self, registry: &SpawnPointRegistry) -> bool {
        registry.current_id() == Some(self.id.as_str())
    }

    /// Персонаж встал (leave action)
    pub fn on_occupant_left(&mut self, still_in_zone: bool) {
        self.state = SeatState::Available;
        self.leave_prompt = false;
        self.sit_prompt = still_in_zone;
    }

    fn save_progress(&self, anchor: Vec3, interactor: &mut Interactor) {
        let Some(registry) = interactor.spawn_registry.as_deref_mut() else {
            logger::log_warning(&format!(
                "Seat '{}': progress not saved ({})",
                self.id,
                SpawnPointError::RegistryUnavailable
            ));
            return;
        };

        registry.register_spawn_point(
            &self.id,
            &self.display_name,
            &self.description,
            anchor,
            interactor.active_scene,
        );
        registry.set_current_spawn_point_at(&self.id, anchor, interactor.active_scene);
        logger::log_info(&format!("Progress saved at '{}' ({})", self.display_name, self.id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DoorState {
    #[default]
    Locked,
    Open,
}

/// Запертая дверь: открывается автоматически при входе в зону с ключом
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct LockedDoor {
    pub required_key_tag: String,
    pub state: DoorState,
    pub need_key_prompt: bool,
}

impl LockedDoor {
    pub fn new(required_key_tag: impl Into<String>) -> Self {
        Self {
            required_key_tag: required_key_tag.into(),
            state: DoorState::Locked,
            need_key_prompt: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DescentState {
    #[default]
    Armed,
    Spent,
}

/// Трос: одноразовый timed спуск к target
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct DescentPoint {
    pub target: Option<Vec3>,
    pub state: DescentState,
    pub use_prompt: bool,
}

impl DescentPoint {
    pub fn new(target: Vec3) -> Self {
        Self {
            target: Some(target),
            state: DescentState::Armed,
            use_prompt: false,
        }
    }

    /// Трос без настроенного target (interact будет отклонён)
    pub fn unconfigured() -> Self {
        Self {
            target: None,
            state: DescentState::Armed,
            use_prompt: false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.state == DescentState::Spent
    }
}

/// Component: interactable объект мира
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum Interactable {
    Seat(Seat),
    LockedDoor(LockedDoor),
    DescentPoint(DescentPoint),
}

impl Interactable {
    /// Spent трос выключает свою зону
    pub fn zone_enabled(&self) -> bool {
        match self {
            Interactable::DescentPoint(point) => !point.is_spent(),
            _ => true,
        }
    }

    /// Физически блокирует движение (закрытая дверь)
    pub fn blocks_movement(&self) -> bool {
        matches!(self, Interactable::LockedDoor(door) if !door.is_open())
    }

    pub fn on_enter_zone(&mut self, interactor: &mut Interactor) {
        match self {
            Interactable::Seat(seat) => {
                if !interactor.is_sitting() {
                    seat.sit_prompt = true;
                }
            }
            Interactable::LockedDoor(door) => {
                if door.is_open() {
                    return;
                }

                if interactor.hands.is_carrying(&door.required_key_tag) {
                    interactor.use_carried_item();
                    door.state = DoorState::Open;
                    door.need_key_prompt = false;
                    logger::log_info(&format!("Door opened with '{}'", door.required_key_tag));
                } else {
                    door.need_key_prompt = true;
                }
            }
            Interactable::DescentPoint(point) => {
                if !point.is_spent() {
                    point.use_prompt = true;
                }
            }
        }
    }

    pub fn on_exit_zone(&mut self, interactor: &mut Interactor) {
        match self {
            Interactable::Seat(seat) => {
                // Сидящий персонаж зону не покидает
                if !interactor.is_sitting() {
                    seat.on_occupant_left(false);
                }
            }
            Interactable::LockedDoor(door) => {
                if !door.is_open() {
                    door.need_key_prompt = false;
                }
            }
            Interactable::DescentPoint(point) => {
                point.use_prompt = false;
            }
        }
    }

    /// Gated действие по кнопке interact
    ///
    /// `this`: entity самого interactable.
    pub fn interact(
        &mut self,
        this: Entity,
        interactor: &mut Interactor,
    ) -> Result<(), InteractionRefusal> {
        match self {
            Interactable::Seat(seat) => {
                if interactor.is_sitting() {
                    return Err(InteractionRefusal::AlreadySitting);
                }
                let anchor = seat.anchor.ok_or(InteractionRefusal::MissingSeatAnchor)?;

                interactor.sit_at(this, anchor);
                seat.state = SeatState::Occupied;
                seat.sit_prompt = false;
                seat.leave_prompt = true;
                seat.save_progress(anchor, interactor);
                Ok(())
            }
            Interactable::LockedDoor(_) => Err(InteractionRefusal::NotInteractive),
            Interactable::DescentPoint(point) => {
                if point.is_spent() {
                    return Err(InteractionRefusal::Spent);
                }
                let target = point.target.ok_or(InteractionRefusal::MissingDescentTarget)?;

                interactor.start_descent(target)?;
                point.state = DescentState::Spent;
                point.use_prompt = false;
                Ok(())
            }
        }
    }
}

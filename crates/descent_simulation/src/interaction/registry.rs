//! InteractionRegistry: какие interactables сейчас в радиусе
//!
//! Порядок = порядок входа в зоны. `current`: первый зарегистрированный,
//! при его удалении продвигается следующий (или None).

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InteractionRegistry {
    in_range: Vec<Entity>,
    current: Option<Entity>,
}

impl InteractionRegistry {
    /// Идемпотентное добавление; current назначается только если его нет
    pub fn register(&mut self, interactable: Entity) -> bool {
        if self.in_range.contains(&interactable) {
            return false;
        }

        self.in_range.push(interactable);
        if self.current.is_none() {
            self.current = Some(interactable);
        }
        true
    }

    pub fn unregister(&mut self, interactable: Entity) -> bool {
        let before = self.in_range.len();
        self.in_range.retain(|entity| *entity != interactable);
        if self.in_range.len() == before {
            return false;
        }

        if self.current == Some(interactable) {
            self.current = self.in_range.first().copied();
        }
        true
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn contains(&self, interactable: Entity) -> bool {
        self.in_range.contains(&interactable)
    }

    pub fn in_range(&self) -> &[Entity] {
        &self.in_range
    }

    pub fn has_nearby(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.in_range.clear();
        self.current = None;
    }
}

//! EnergyPool: ограниченный целочисленный ресурс для прыжков
//!
//! - consume на старте прыжка
//! - timed restore пока персонаж отдыхает (сидит)
//! - прямые мутаторы (add / restore_all / set_max)
//!
//! Все изменения уходят observers (в порядке подписки) и в outbox,
//! который система `forward_energy_notifications` превращает в ECS события.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::logger;

/// Параметры энергии персонажа
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct EnergyConfig {
    pub max_energy: u32,
    pub starting_energy: u32,
    pub jump_cost: u32,
    /// Единиц в секунду пока идёт restore (0 = никогда)
    pub restore_rate: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_energy: 4,
            starting_energy: 4,
            jump_cost: 1,
            restore_rate: 1.0,
        }
    }
}

/// Уведомление об изменении энергии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyEvent {
    Changed { current: u32, max: u32 },
    /// Попытка прыжка без энергии (advisory)
    Depleted,
    /// Переход в "полностью восстановлено" (один раз на переход)
    Restored,
}

/// Handle подписки (для unsubscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

type EnergyObserver = Box<dyn FnMut(&EnergyEvent) + Send + Sync>;

/// Component: энергия персонажа
///
/// Инвариант: `0 <= current <= max` после любой операции.
#[derive(Component)]
pub struct EnergyPool {
    current: u32,
    max: u32,
    jump_cost: u32,
    restore_rate: f32,
    restoring: bool,
    restore_elapsed: Duration,
    observers: Vec<(ObserverId, EnergyObserver)>,
    next_observer_id: u32,
    outbox: Vec<EnergyEvent>,
}

impl fmt::Debug for EnergyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnergyPool")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("jump_cost", &self.jump_cost)
            .field("restore_rate", &self.restore_rate)
            .field("restoring", &self.restoring)
            .field("restore_elapsed", &self.restore_elapsed)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for EnergyPool {
    fn default() -> Self {
        Self::new(EnergyConfig::default())
    }
}

impl EnergyPool {
    /// Создание из конфига (невалидные значения клампятся, не падаем)
    pub fn new(config: EnergyConfig) -> Self {
        let restore_rate = if config.restore_rate.is_finite() {
            config.restore_rate.max(0.0)
        } else {
            0.0
        };

        Self {
            current: config.starting_energy.min(config.max_energy),
            max: config.max_energy,
            jump_cost: config.jump_cost,
            restore_rate,
            restoring: false,
            restore_elapsed: Duration::ZERO,
            observers: Vec::new(),
            next_observer_id: 0,
            outbox: Vec::new(),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn jump_cost(&self) -> u32 {
        self.jump_cost
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Доля [0, 1] для energy bar (0 если max == 0)
    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn has_energy_to_jump(&self) -> bool {
        self.current >= self.jump_cost
    }

    /// Списать энергию за прыжок
    ///
    /// Не хватает → Depleted, `current` не меняется, прыжок не стартует.
    pub fn consume_jump_energy(&mut self) -> bool {
        if !self.has_energy_to_jump() {
            logger::log(&format!(
                "Energy depleted: {}/{} (jump cost {})",
                self.current, self.max, self.jump_cost
            ));
            self.notify(EnergyEvent::Depleted);
            return false;
        }

        self.current -= self.jump_cost;
        self.notify_changed();
        true
    }

    pub fn start_restore(&mut self) {
        if !self.restoring {
            self.restoring = true;
            self.restore_elapsed = Duration::ZERO;
        }
    }

    pub fn stop_restore(&mut self) {
        self.restoring = false;
        self.restore_elapsed = Duration::ZERO;
    }

    /// Timed restore: каждые `1/restore_rate` секунд ровно одна единица
    ///
    /// Остаток аккумулятора сохраняется между тиками. Пока энергия полная,
    /// время не копится.
    pub fn tick(&mut self, delta: Duration) {
        if !self.restoring || self.restore_rate <= 0.0 {
            return;
        }

        if self.is_full() {
            self.restore_elapsed = Duration::ZERO;
            return;
        }

        let Ok(interval) = Duration::try_from_secs_f64(1.0 / self.restore_rate as f64) else {
            return;
        };
        self.restore_elapsed += delta;

        while self.restore_elapsed >= interval && !self.is_full() {
            self.restore_elapsed -= interval;
            self.current += 1;
            self.notify_changed();

            if self.is_full() {
                self.restore_elapsed = Duration::ZERO;
                self.notify(EnergyEvent::Restored);
            }
        }
    }

    pub fn add_energy(&mut self, amount: u32) {
        let was_full = self.is_full();
        let next = self.current.saturating_add(amount).min(self.max);
        if next == self.current {
            return;
        }

        self.current = next;
        self.notify_changed();
        if !was_full && self.is_full() {
            self.notify(EnergyEvent::Restored);
        }
    }

    pub fn restore_all(&mut self) {
        self.add_energy(self.max - self.current);
    }

    /// Новый максимум; `current` клампится вниз если теперь больше
    pub fn set_max(&mut self, new_max: u32) {
        self.max = new_max;
        self.current = self.current.min(self.max);
        self.notify_changed();
    }

    /// Подписка на уведомления (fire order = порядок подписки)
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&EnergyEvent) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Teardown: никаких уведомлений после despawn владельца
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Забрать накопленные уведомления (для ECS forwarding)
    pub fn drain_notifications(&mut self) -> Vec<EnergyEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn notify_changed(&mut self) {
        self.notify(EnergyEvent::Changed {
            current: self.current,
            max: self.max,
        });
    }

    fn notify(&mut self, event: EnergyEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
        self.outbox.push(event);
    }
}

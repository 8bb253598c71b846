//! Timeline: отложенные действия на simulation времени
//!
//! Никаких busy loop и корутин: задача = таймер + действие + владелец.
//! Каждый FixedUpdate тик таймеры продвигаются на fixed delta,
//! готовые задачи возвращаются в порядке планирования.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Что сделать когда таймер истёк
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    /// Конец спуска: телепорт в target, вернуть гравитацию и видимость, Idle
    FinishDescent { target: Vec3 },
}

#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Entity, против которого resume выполнится (проверяется на валидность)
    pub owner: Entity,
    pub action: ScheduledAction,
    timer: Timer,
}

impl ScheduledTask {
    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }
}

/// Resource: очередь отложенных задач
#[derive(Resource, Debug, Default)]
pub struct Timeline {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl Timeline {
    pub fn schedule(&mut self, owner: Entity, delay: Duration, action: ScheduledAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        self.tasks.push(ScheduledTask {
            id,
            owner,
            action,
            timer: Timer::new(delay, TimerMode::Once),
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Отменить все задачи entity (despawn / unload)
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != owner);
        before - self.tasks.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        cancelled
    }

    /// Забрать все задачи entity без выполнения (вызывающий откатывает их эффекты)
    pub fn take_owner(&mut self, owner: Entity) -> Vec<ScheduledTask> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.owner == owner);
        self.tasks = kept;
        taken
    }

    pub fn take_all(&mut self) -> Vec<ScheduledTask> {
        std::mem::take(&mut self.tasks)
    }

    pub fn has_pending(&self, owner: Entity) -> bool {
        self.tasks.iter().any(|task| task.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Продвинуть таймеры, вернуть истёкшие задачи (удаляются из очереди)
    pub fn tick(&mut self, delta: Duration) -> Vec<ScheduledTask> {
        for task in self.tasks.iter_mut() {
            task.timer.tick(delta);
        }

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.timer.finished());
        self.tasks = pending;
        due
    }
}

//! Timeline системы: resume готовых задач, cleanup на unload

use bevy::prelude::*;
use crate::controller::PresentationSignals;
use crate::logger;
use crate::movement::MovementPhysics;
use crate::scene::SceneUnloaded;
use crate::state::{PlayerState, PlayerStateMachine};
use super::components::{ScheduledAction, Timeline};

/// Система: продвинуть timeline и выполнить истёкшие задачи
///
/// Owner уже уничтожен → задача тихо выбрасывается (никакого resume
/// против несуществующего entity).
pub fn advance_timeline(
    time: Res<Time<Fixed>>,
    mut timeline: ResMut<Timeline>,
    mut owners: Query<(
        &mut Transform,
        &mut MovementPhysics,
        &mut PlayerStateMachine,
        &mut PresentationSignals,
    )>,
) {
    for task in timeline.tick(time.delta()) {
        let Ok((mut transform, mut movement, mut state, mut signals)) = owners.get_mut(task.owner)
        else {
            logger::log_warning(&format!(
                "Scheduled task {:?} dropped: owner {:?} no longer exists",
                task.id, task.owner
            ));
            continue;
        };

        match task.action {
            ScheduledAction::FinishDescent { target } => {
                movement.teleport(&mut transform, target);
                movement.set_gravity_enabled(true);
                signals.visible = true;
                state.change_state(PlayerState::Idle);

                logger::log_info(&format!(
                    "Descent finished: {:?} arrived at {:?}",
                    task.owner, target
                ));
            }
        }
    }
}

/// Откат отменённой задачи у живого владельца
///
/// Отменённый спуск не должен оставить персонажа в Descending:
/// гравитация и видимость возвращаются, state → Idle, позиция не меняется.
pub fn abort_task(
    action: ScheduledAction,
    movement: &mut MovementPhysics,
    state: &mut PlayerStateMachine,
    signals: &mut PresentationSignals,
) {
    match action {
        ScheduledAction::FinishDescent { .. } => {
            movement.set_gravity_enabled(true);
            signals.visible = true;
            if state.is(PlayerState::Descending) {
                state.change_state(PlayerState::Idle);
            }
        }
    }
}

/// Система: SceneUnloaded → отменить все отложенные задачи
///
/// Владельцы, пережившие unload, возвращаются в управляемое состояние.
pub fn cancel_tasks_on_scene_unload(
    mut unloaded: EventReader<SceneUnloaded>,
    mut timeline: ResMut<Timeline>,
    mut owners: Query<(
        &mut MovementPhysics,
        &mut PlayerStateMachine,
        &mut PresentationSignals,
    )>,
) {
    for event in unloaded.read() {
        let cancelled = timeline.take_all();
        if cancelled.is_empty() {
            continue;
        }

        logger::log_info(&format!(
            "Scene '{}' unloaded: cancelled {} scheduled task(s)",
            event.scene,
            cancelled.len()
        ));

        for task in cancelled {
            if let Ok((mut movement, mut state, mut signals)) = owners.get_mut(task.owner) {
                abort_task(task.action, &mut movement, &mut state, &mut signals);
            }
        }
    }
}

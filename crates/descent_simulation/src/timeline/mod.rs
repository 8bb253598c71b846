//! Timeline domain: cancellable отложенные действия (спуск по тросу)
//!
//! Инвариант: resume выполняется только против живого owner entity.
//! Scene unload отменяет всё, что ещё не сработало.

use bevy::prelude::*;
use crate::controller::ControllerSet;

pub mod components;
pub mod systems;

#[cfg(test)]
mod timeline_tests;

pub use components::{ScheduledAction, ScheduledTask, TaskId, Timeline};
pub use systems::{abort_task, advance_timeline, cancel_tasks_on_scene_unload};

pub struct TimelinePlugin;

impl Plugin for TimelinePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Timeline>();

        app.add_systems(
            FixedUpdate,
            cancel_tasks_on_scene_unload.in_set(ControllerSet::Sense),
        )
        .add_systems(FixedUpdate, advance_timeline.in_set(ControllerSet::Timers));
    }
}

//! Controller (composition root)
//!
//! Читает input, гоняет MovementPhysics и PlayerStateMachine, запускает
//! negotiation protocol. Задаёт порядок всего FixedUpdate тика:
//!
//! Sense → Logic → Physics → Derive → Timers → Present
//!
//! - Sense: ground probe, события сцены, зоны, подбор предметов, коллайдеры дверей
//! - Logic: input + interaction
//! - Physics: гравитация + интеграция + коллизии
//! - Derive: derived state после физики
//! - Timers: restore энергии, отложенные задачи, spawn teleports
//! - Present: сигналы для animation/UI sink

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

#[cfg(test)]
mod controller_tests;

pub use components::{ControllerConfig, PlayerInput, PresentationSignals};
pub use events::{InteractTriggered, JumpTriggered};
pub use systems::{process_player_input, sanitize_controller_config, sync_presentation_signals};

/// Фазы simulation тика (FixedUpdate, строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    Sense,
    Logic,
    Physics,
    Derive,
    Timers,
    Present,
}

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerConfig>()
            .add_event::<JumpTriggered>()
            .add_event::<InteractTriggered>();

        app.configure_sets(
            FixedUpdate,
            (
                ControllerSet::Sense,
                ControllerSet::Logic,
                ControllerSet::Physics,
                ControllerSet::Derive,
                ControllerSet::Timers,
                ControllerSet::Present,
            )
                .chain(),
        );

        app.add_systems(Startup, sanitize_controller_config)
            .add_systems(FixedUpdate, process_player_input.in_set(ControllerSet::Logic))
            .add_systems(
                FixedUpdate,
                sync_presentation_signals.in_set(ControllerSet::Present),
            );
    }
}

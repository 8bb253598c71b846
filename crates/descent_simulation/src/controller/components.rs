//! Controller компоненты: config, input, presentation sink

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры controller (composition root)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct ControllerConfig {
    /// Длительность спуска по тросу (секунды simulation времени)
    pub descent_duration: f32,
    /// Толчок вверх при вставании со стула
    pub seat_exit_nudge: f32,
    /// Порог "стоим / летим вверх" для derived state
    pub motion_epsilon: f32,
    /// Где висит предмет в руках относительно центра персонажа
    pub hold_offset: Vec2,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            descent_duration: 1.0,
            seat_exit_nudge: 0.5,
            motion_epsilon: 0.1,
            hold_offset: Vec2::new(0.0, 0.6),
        }
    }
}

impl ControllerConfig {
    /// Отрицательные / NaN значения → безопасные
    pub fn sanitized(self) -> Self {
        let non_negative = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };

        Self {
            descent_duration: non_negative(self.descent_duration),
            seat_exit_nudge: non_negative(self.seat_exit_nudge),
            motion_epsilon: non_negative(self.motion_epsilon),
            hold_offset: if self.hold_offset.is_finite() {
                self.hold_offset
            } else {
                Vec2::ZERO
            },
        }
    }
}

/// Component: input персонажа на текущий тик
///
/// Host пишет сюда каждый кадр. `*_pressed` / `*_released`: edges,
/// сбрасываются после обработки тика (даже если input заблокирован).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Горизонтальная ось [-1, 1]
    pub horizontal: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub interact_pressed: bool,
    pub leave_pressed: bool,
    pub drop_pressed: bool,
}

impl PlayerInput {
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.interact_pressed = false;
        self.leave_pressed = false;
        self.drop_pressed = false;
    }

    /// Нажать прыжок (press + hold)
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
        self.jump_held = true;
    }

    pub fn release_jump(&mut self) {
        self.jump_held = false;
        self.jump_released = true;
    }
}

/// Component: семантические сигналы для presentation слоя
///
/// Ядро только пишет, обратно никогда не читает.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PresentationSignals {
    pub speed: f32,
    pub grounded: bool,
    pub sitting: bool,
    pub facing_right: bool,
    pub visible: bool,
}

impl Default for PresentationSignals {
    fn default() -> Self {
        Self {
            speed: 0.0,
            grounded: false,
            sitting: false,
            facing_right: true,
            visible: true,
        }
    }
}

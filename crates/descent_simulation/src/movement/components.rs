//! Movement компоненты: горизонтальная скорость + variable-height jump

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры движения персонажа (world units, секунды)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Горизонтальная скорость при полном отклонении оси
    pub move_speed: f32,
    /// Начальная вертикальная скорость прыжка
    pub jump_force: f32,
    /// Дополнительное ускорение вверх пока кнопка прыжка удерживается
    pub jump_hold_acceleration: f32,
    /// Сколько секунд удержание ещё добавляет высоту
    pub max_jump_hold_time: f32,
    /// Множитель вертикальной скорости при раннем отпускании (< 1)
    pub jump_cut_multiplier: f32,
    /// Ускорение свободного падения (отрицательное)
    pub gravity: f32,
    /// Сконфигурированный масштаб гравитации (восстанавливается после sit/descent)
    pub gravity_scale: f32,
    /// Смещение точки ground probe от центра персонажа (обычно ноги)
    pub ground_check_offset: Vec2,
    pub ground_check_radius: f32,
    /// Половинные размеры тела для blocking коллайдеров
    pub body_half_extents: Vec2,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 8.0,
            jump_hold_acceleration: 15.0,
            max_jump_hold_time: 0.3,
            jump_cut_multiplier: 0.5,
            gravity: -9.81,
            gravity_scale: 1.0,
            ground_check_offset: Vec2::new(0.0, -0.5),
            ground_check_radius: 0.2,
            body_half_extents: Vec2::new(0.3, 0.5),
        }
    }
}

/// Movement state персонажа
///
/// Инвариант: `is_jumping` == true только между start_jump и одним из:
/// - hold time исчерпан
/// - вертикальная скорость больше не положительная
/// - кнопку отпустили
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementPhysics {
    pub config: MovementConfig,
    velocity: Vec2,
    grounded: bool,
    is_jumping: bool,
    jump_hold_timer: f32,
    gravity_enabled: bool,
}

impl Default for MovementPhysics {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl MovementPhysics {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
            grounded: false,
            is_jumping: false,
            jump_hold_timer: 0.0,
            gravity_enabled: true,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn jump_hold_timer(&self) -> f32 {
        self.jump_hold_timer
    }

    /// Результат ground probe, кешируется на весь тик
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Горизонтальное движение: velocity.x = axis * move_speed, y не трогаем
    pub fn move_horizontal(&mut self, axis: f32) {
        let axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
        self.velocity.x = axis * self.config.move_speed;
    }

    /// Старт прыжка (только с земли)
    ///
    /// Возвращает false если персонаж в воздухе.
    pub fn start_jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }

        self.velocity.y = self.config.jump_force;
        self.grounded = false;
        self.is_jumping = true;
        self.jump_hold_timer = 0.0;
        true
    }

    /// Вызывается каждый тик пока кнопка прыжка удерживается
    ///
    /// Высота прыжка растёт непрерывно с длительностью удержания (до cap).
    pub fn continue_jump(&mut self, delta: f32) {
        if !self.is_jumping {
            return;
        }

        if self.jump_hold_timer < self.config.max_jump_hold_time && self.velocity.y > 0.0 {
            self.velocity.y += self.config.jump_hold_acceleration * delta;
            self.jump_hold_timer += delta;
        } else {
            self.is_jumping = false;
        }
    }

    /// Кнопку отпустили: короткий tap → короткий hop
    pub fn stop_jump(&mut self) {
        if self.is_jumping && self.velocity.y > 0.0 {
            self.velocity.y *= self.config.jump_cut_multiplier;
        }
        self.is_jumping = false;
    }

    pub fn stop_movement(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Мгновенный перенос позиции, скорость обнуляется
    pub fn teleport(&mut self, transform: &mut Transform, position: Vec3) {
        transform.translation = position;
        self.stop_movement();
        self.is_jumping = false;
    }

    /// Включить/выключить гравитацию (sit, descent)
    ///
    /// Включение восстанавливает сконфигурированный `gravity_scale`.
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Новый сконфигурированный масштаб (применяется сразу если гравитация включена)
    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.config.gravity_scale = scale.max(0.0);
    }

    pub fn effective_gravity_scale(&self) -> f32 {
        if self.gravity_enabled {
            self.config.gravity_scale
        } else {
            0.0
        }
    }

    pub fn apply_gravity(&mut self, delta: f32) {
        self.velocity.y += self.config.gravity * self.effective_gravity_scale() * delta;
    }

    /// Приземлились: вертикальная скорость гасится
    pub(crate) fn land(&mut self) {
        self.velocity.y = 0.0;
        self.grounded = true;
        self.is_jumping = false;
    }

    pub(crate) fn block_horizontal(&mut self) {
        self.velocity.x = 0.0;
    }

    pub fn ground_probe_point(&self, translation: Vec3) -> Vec2 {
        translation.truncate() + self.config.ground_check_offset
    }
}

//! Movement системы: ground probe, интеграция, derived state

use bevy::prelude::*;
use crate::controller::ControllerConfig;
use crate::physics::{probe_ground, Aabb2, BlockingCollider, GroundSurface};
use crate::player::Player;
use crate::state::{PlayerState, PlayerStateMachine};
use super::components::MovementPhysics;

/// Допуск на численную ошибку при проверке "ноги были над поверхностью"
const LANDING_TOLERANCE: f32 = 1e-3;

/// Система: ground probe (раз за physics tick)
///
/// Результат кешируется в `MovementPhysics::grounded` до следующего тика.
/// Пока персонаж летит вверх, контакт не засчитывается.
pub fn probe_ground_contact(
    mut players: Query<(&Transform, &mut MovementPhysics), With<Player>>,
    surfaces: Query<(&Transform, &GroundSurface), Without<Player>>,
) {
    for (transform, mut movement) in players.iter_mut() {
        let point = movement.ground_probe_point(transform.translation);
        let radius = movement.config.ground_check_radius;
        let grounded =
            movement.velocity().y <= 0.0 && probe_ground(point, radius, surfaces.iter());
        movement.set_grounded(grounded);
    }
}

/// Система: gravity + velocity → Transform
///
/// Горизонталь останавливается enabled blocking коллайдерами,
/// вертикаль приземляется на верх ground поверхностей.
pub fn integrate_motion(
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut Transform, &mut MovementPhysics), With<Player>>,
    surfaces: Query<(&Transform, &GroundSurface), Without<Player>>,
    blockers: Query<(&Transform, &BlockingCollider), Without<Player>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut transform, mut movement) in players.iter_mut() {
        movement.apply_gravity(delta);

        let velocity = movement.velocity();
        let position = transform.translation.truncate();
        let mut next = position;

        // Горизонталь
        next.x += velocity.x * delta;
        let body = Aabb2::from_center(next, movement.config.body_half_extents);
        let blocked = blockers
            .iter()
            .any(|(blocker_transform, blocker)| {
                blocker.enabled && blocker.bounds(blocker_transform).overlaps(&body)
            });
        if blocked {
            next.x = position.x;
            movement.block_horizontal();
        }

        // Вертикаль
        let offset = movement.config.ground_check_offset;
        let feet_before = Vec2::new(next.x, position.y) + offset;
        next.y += velocity.y * delta;

        if velocity.y <= 0.0 {
            let feet_after = next + offset;
            if let Some(top) = landing_height(feet_before, feet_after, surfaces.iter()) {
                next.y = top - offset.y;
                movement.land();
            }
        }

        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

/// Самая высокая поверхность, которую ноги пересекли сверху вниз за этот тик
fn landing_height<'a>(
    feet_before: Vec2,
    feet_after: Vec2,
    surfaces: impl Iterator<Item = (&'a Transform, &'a GroundSurface)>,
) -> Option<f32> {
    surfaces
        .map(|(transform, surface)| surface.bounds(transform))
        .filter(|bounds| feet_after.x >= bounds.min.x && feet_after.x <= bounds.max.x)
        .map(|bounds| bounds.top())
        .filter(|top| *top <= feet_before.y + LANDING_TOLERANCE && *top >= feet_after.y)
        .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))))
}

/// Derived-state policy (после физики)
///
/// - grounded + горизонтальная скорость → Moving
/// - grounded + стоим → Idle
/// - в воздухе + летим вверх быстрее epsilon → Jumping
/// - в воздухе иначе → Falling
pub fn derive_movement_state(grounded: bool, velocity: Vec2, epsilon: f32) -> PlayerState {
    if !grounded {
        if velocity.y > epsilon {
            PlayerState::Jumping
        } else {
            PlayerState::Falling
        }
    } else if velocity.x.abs() > epsilon {
        PlayerState::Moving
    } else {
        PlayerState::Idle
    }
}

/// Система: обновить state machine из movement state
///
/// Sitting / Descending / Cutscene управляются явно: их не трогаем.
pub fn update_derived_state(
    config: Res<ControllerConfig>,
    mut players: Query<(&MovementPhysics, &mut PlayerStateMachine), With<Player>>,
) {
    for (movement, mut state) in players.iter_mut() {
        if matches!(
            state.current(),
            PlayerState::Sitting | PlayerState::Descending | PlayerState::Cutscene
        ) {
            continue;
        }

        let derived = derive_movement_state(
            movement.is_grounded(),
            movement.velocity(),
            config.motion_epsilon,
        );
        state.change_state(derived);
    }
}

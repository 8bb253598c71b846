//! Interaction системы: зоны, подбор предметов, коллайдеры дверей

use bevy::prelude::*;
use crate::controller::ControllerConfig;
use crate::logger;
use crate::movement::MovementPhysics;
use crate::physics::{Aabb2, BlockingCollider};
use crate::player::Player;
use crate::scene::SceneUnloaded;
use super::error::InteractionRefusal;
use super::interactables::{Interactable, InteractionZone};
use super::interactor::{Hands, HeldItem, InteractionWorld, Interactor, InteractorData, Pickup};
use super::registry::InteractionRegistry;

/// Тело персонажа для trigger-проверок
fn body_bounds(transform: &Transform, movement: &MovementPhysics) -> Aabb2 {
    Aabb2::from_center(
        transform.translation.truncate(),
        movement.config.body_half_extents,
    )
}

/// `try_interact`: делегировать current interactable
///
/// Возвращает entity объекта, с которым interaction состоялся.
pub fn try_interact(
    registry: &InteractionRegistry,
    interactables: &mut Query<&mut Interactable, Without<Player>>,
    interactor: &mut Interactor,
) -> Result<Entity, InteractionRefusal> {
    let current = registry.current().ok_or(InteractionRefusal::NothingInRange)?;
    let mut interactable = interactables
        .get_mut(current)
        .map_err(|_| InteractionRefusal::NothingInRange)?;

    interactable.interact(current, interactor)?;
    Ok(current)
}

/// Система: enter/exit interaction зон (Sense)
///
/// Выключенная зона (spent трос) считается покинутой.
/// Despawned interactables тихо убираются из registry.
pub fn detect_interaction_zones(
    mut commands: Commands,
    mut players: Query<InteractorData, With<Player>>,
    mut interactables: Query<
        (Entity, &Transform, &InteractionZone, &mut Interactable),
        Without<Player>,
    >,
    mut world: InteractionWorld,
) {
    for mut player in players.iter_mut() {
        let body = body_bounds(&player.transform, &player.movement);

        let stale: Vec<Entity> = player
            .registry
            .in_range()
            .iter()
            .copied()
            .filter(|entity| !interactables.contains(*entity))
            .collect();
        for entity in stale {
            player.registry.unregister(entity);
        }

        let (registry, mut interactor) = player.split(&mut world);

        for (entity, transform, zone, mut interactable) in interactables.iter_mut() {
            let inside = interactable.zone_enabled() && zone.bounds(transform).overlaps(&body);
            let was_inside = registry.contains(entity);

            if inside && !was_inside {
                registry.register(entity);
                interactable.on_enter_zone(&mut interactor);
                logger::log(&format!("Entered interaction zone {:?}", entity));
            } else if !inside && was_inside {
                registry.unregister(entity);
                interactable.on_exit_zone(&mut interactor);
                logger::log(&format!("Left interaction zone {:?}", entity));
            }
        }

        despawn_consumed(&mut commands, &mut interactor.consumed_items);
    }
}

pub(crate) fn despawn_consumed(commands: &mut Commands, consumed: &mut Vec<HeldItem>) {
    for item in consumed.drain(..) {
        commands.entity(item.entity).despawn();
    }
}

/// Система: подбор предметов пустыми руками (Sense)
///
/// Брошенный предмет взводится снова только после выхода персонажа из зоны.
pub fn pick_up_items(
    mut players: Query<(&Transform, &MovementPhysics, &mut Hands), With<Player>>,
    mut pickups: Query<(Entity, &Transform, &mut Pickup), Without<Player>>,
) {
    for (transform, movement, mut hands) in players.iter_mut() {
        let body = body_bounds(transform, movement);

        for (entity, pickup_transform, mut pickup) in pickups.iter_mut() {
            let inside = pickup.bounds(pickup_transform).overlaps(&body);

            if !pickup.armed {
                if !pickup.held && !inside {
                    pickup.armed = true;
                }
                continue;
            }

            if inside && !hands.has_carried_item() {
                let item = HeldItem {
                    entity,
                    tag: pickup.tag.clone(),
                };
                if hands.pick_up(item) {
                    pickup.armed = false;
                    pickup.held = true;
                    logger::log_info(&format!("Picked up '{}' ({:?})", pickup.tag, entity));
                }
            }
        }
    }
}

/// Система: предмет в руках следует за hold offset (Present)
pub fn carry_items(
    config: Res<ControllerConfig>,
    players: Query<(&Transform, &Hands), With<Player>>,
    mut items: Query<&mut Transform, (With<Pickup>, Without<Player>)>,
) {
    for (transform, hands) in players.iter() {
        let Some(item) = hands.carried_item() else {
            continue;
        };
        if let Ok(mut item_transform) = items.get_mut(item.entity) {
            item_transform.translation = transform.translation + config.hold_offset.extend(0.0);
        }
    }
}

/// Система: брошенные предметы возвращаются в мир (Present)
pub fn release_dropped_items(
    hands: Query<&Hands, With<Player>>,
    mut pickups: Query<(Entity, &mut Pickup)>,
) {
    for (entity, mut pickup) in pickups.iter_mut() {
        if !pickup.held {
            continue;
        }

        let still_carried = hands
            .iter()
            .any(|hands| hands.carried_item().is_some_and(|item| item.entity == entity));
        if !still_carried {
            pickup.held = false;
            logger::log_info(&format!("Dropped '{}' ({:?})", pickup.tag, entity));
        }
    }
}

/// Система: blocking коллайдер двери следует её состоянию (Sense, сразу после зон)
///
/// Дверь, открытая на входе в зону, не блокирует Physics того же тика.
pub fn sync_blocking_colliders(
    mut colliders: Query<(&Interactable, &mut BlockingCollider), Changed<Interactable>>,
) {
    for (interactable, mut collider) in colliders.iter_mut() {
        let blocks = interactable.blocks_movement();
        if collider.enabled != blocks {
            collider.enabled = blocks;
        }
    }
}

/// Система: SceneUnloaded → registries пустые (interactables уничтожаются)
pub fn clear_registries_on_scene_unload(
    mut unloaded: EventReader<SceneUnloaded>,
    mut registries: Query<&mut InteractionRegistry>,
) {
    if unloaded.read().last().is_none() {
        return;
    }

    for mut registry in registries.iter_mut() {
        registry.clear();
    }
}

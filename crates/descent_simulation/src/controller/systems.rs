//! Controller системы: input → movement / state / interaction

use bevy::prelude::*;
use crate::interaction::systems::despawn_consumed;
use crate::interaction::{
    try_interact, Interactable, InteractionRefusal, InteractionWorld, InteractorData,
};
use crate::logger;
use crate::movement::MovementPhysics;
use crate::player::Player;
use crate::state::{PlayerState, PlayerStateMachine};
use super::components::{ControllerConfig, PlayerInput, PresentationSignals};
use super::events::{InteractTriggered, JumpTriggered};

fn log_refusal(action: &str, refusal: InteractionRefusal) {
    let message = format!("{} refused: {}", action, refusal);
    if refusal.is_configuration_missing() {
        logger::log_error(&message);
    } else {
        logger::log(&message);
    }
}

/// Система: обработка input за тик (Logic)
///
/// Порядок: locked? → move → jump → drop → interact / leave.
/// Edges input сбрасываются всегда, даже при заблокированном input.
pub fn process_player_input(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut players: Query<(InteractorData, &mut PlayerInput), With<Player>>,
    mut interactables: Query<&mut Interactable, Without<Player>>,
    mut world: InteractionWorld,
    mut jump_events: EventWriter<JumpTriggered>,
    mut interact_events: EventWriter<InteractTriggered>,
) {
    let delta = time.delta_secs();
    let epsilon = world.config.motion_epsilon;

    for (mut player, mut input) in players.iter_mut() {
        let tick_input = *input;
        input.clear_edges();

        if player.state.is_input_locked() {
            continue;
        }

        // Горизонталь
        if player.state.can_move() {
            player.movement.move_horizontal(tick_input.horizontal);
            if tick_input.horizontal > epsilon {
                player.signals.facing_right = true;
            } else if tick_input.horizontal < -epsilon {
                player.signals.facing_right = false;
            }
        } else {
            player.movement.move_horizontal(0.0);
        }

        // Прыжок: энергия списывается только если прыжок реально стартует
        if tick_input.jump_pressed && player.state.can_jump() && player.movement.is_grounded() {
            if player.energy.consume_jump_energy() && player.movement.start_jump() {
                player.state.change_state(PlayerState::Jumping);
                jump_events.write(JumpTriggered {
                    entity: player.entity,
                });
            }
        }
        if tick_input.jump_held {
            player.movement.continue_jump(delta);
        }
        if tick_input.jump_released {
            player.movement.stop_jump();
        }

        if tick_input.drop_pressed {
            if let Some(item) = player.hands.take() {
                logger::log(&format!("Drop requested for '{}'", item.tag));
            }
        }

        if !tick_input.interact_pressed && !tick_input.leave_pressed {
            continue;
        }

        if !player.state.can_interact() {
            log_refusal(
                "Interaction",
                InteractionRefusal::StateForbids(player.state.current()),
            );
            continue;
        }

        let entity = player.entity;
        let (registry, mut interactor) = player.split(&mut world);

        if tick_input.interact_pressed {
            match try_interact(registry, &mut interactables, &mut interactor) {
                Ok(target) => {
                    interact_events.write(InteractTriggered { entity, target });
                }
                Err(refusal) => log_refusal("Interact", refusal),
            }
        }

        if tick_input.leave_pressed {
            match interactor.leave_seat() {
                Ok(Some(seat)) => {
                    if let Ok(mut interactable) = interactables.get_mut(seat) {
                        if let Interactable::Seat(seat_data) = &mut *interactable {
                            seat_data.on_occupant_left(registry.contains(seat));
                        }
                    }
                }
                Ok(None) => {}
                Err(refusal) => log_refusal("Leave", refusal),
            }
        }

        despawn_consumed(&mut commands, &mut interactor.consumed_items);
    }
}

/// Система: PresentationSignals из movement/state (Present)
pub fn sync_presentation_signals(
    mut players: Query<
        (&MovementPhysics, &PlayerStateMachine, &mut PresentationSignals),
        With<Player>,
    >,
) {
    for (movement, state, mut signals) in players.iter_mut() {
        signals.speed = movement.velocity().x.abs();
        signals.grounded = movement.is_grounded();
        signals.sitting = state.is(PlayerState::Sitting);
    }
}

/// Startup: конфиг из host'а приводится к безопасным значениям
pub fn sanitize_controller_config(mut config: ResMut<ControllerConfig>) {
    let sanitized = config.sanitized();
    if *config != sanitized {
        logger::log_warning("ControllerConfig contained invalid values, clamped");
        *config = sanitized;
    }
}

//! Tests for per-tick input handling and presentation signals.

#[cfg(test)]
mod tests {
    use super::super::{ControllerConfig, JumpTriggered, PlayerInput, PresentationSignals};
    use crate::energy::{EnergyConfig, EnergyPool};
    use crate::movement::{MovementConfig, MovementPhysics};
    use crate::physics::GroundSurface;
    use crate::player::player_bundle;
    use crate::state::{PlayerState, PlayerStateMachine};
    use crate::create_stepped_app;
    use bevy::prelude::*;

    fn app_with_player(energy: EnergyConfig) -> (App, Entity) {
        let mut app = create_stepped_app();
        app.world_mut().spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            GroundSurface::new(Vec2::new(50.0, 0.5)),
        ));
        let player = app
            .world_mut()
            .spawn(player_bundle(
                Vec3::new(0.0, 0.5, 0.0),
                MovementConfig::default(),
                energy,
            ))
            .id();

        // Тик чтобы ground probe увидел пол
        app.update();
        (app, player)
    }

    fn input(app: &mut App, player: Entity) -> Mut<'_, PlayerInput> {
        app.world_mut().get_mut::<PlayerInput>(player).unwrap()
    }

    fn state(app: &App, player: Entity) -> PlayerState {
        app.world().get::<PlayerStateMachine>(player).unwrap().current()
    }

    fn jump_events(app: &mut App) -> usize {
        app.world_mut()
            .resource_mut::<Events<JumpTriggered>>()
            .drain()
            .count()
    }

    #[test]
    fn test_player_rests_on_ground_idle() {
        let (mut app, player) = app_with_player(EnergyConfig::default());
        app.update();

        let movement = app.world().get::<MovementPhysics>(player).unwrap();
        assert!(movement.is_grounded());
        assert_eq!(state(&app, player), PlayerState::Idle);

        let transform = app.world().get::<Transform>(player).unwrap();
        assert!((transform.translation.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_walking_sets_moving_and_facing() {
        let (mut app, player) = app_with_player(EnergyConfig::default());

        input(&mut app, player).horizontal = -1.0;
        for _ in 0..10 {
            app.update();
        }

        assert_eq!(state(&app, player), PlayerState::Moving);
        let signals = app.world().get::<PresentationSignals>(player).unwrap();
        assert!(!signals.facing_right);
        assert_eq!(signals.speed, 5.0);
        assert!(signals.grounded);

        let x = app.world().get::<Transform>(player).unwrap().translation.x;
        assert!(x < -0.5);
    }

    #[test]
    fn test_jump_spends_energy_and_emits_event() {
        let (mut app, player) = app_with_player(EnergyConfig::default());
        jump_events(&mut app);

        input(&mut app, player).press_jump();
        app.update();

        assert_eq!(jump_events(&mut app), 1);
        assert_eq!(app.world().get::<EnergyPool>(player).unwrap().current(), 3);
        assert_eq!(state(&app, player), PlayerState::Jumping);

        // Edge сброшен: повторного прыжка нет, даже если кнопку держат
        app.update();
        assert_eq!(jump_events(&mut app), 0);
        assert_eq!(app.world().get::<EnergyPool>(player).unwrap().current(), 3);
    }

    #[test]
    fn test_jump_without_energy_does_not_start() {
        let (mut app, player) = app_with_player(EnergyConfig {
            starting_energy: 0,
            ..Default::default()
        });

        input(&mut app, player).press_jump();
        app.update();

        assert_eq!(jump_events(&mut app), 0);
        let movement = app.world().get::<MovementPhysics>(player).unwrap();
        assert!(movement.is_grounded());
        assert!(!movement.is_jumping());
        assert_eq!(state(&app, player), PlayerState::Idle);
    }

    #[test]
    fn test_no_energy_spent_on_air_jump() {
        let (mut app, player) = app_with_player(EnergyConfig::default());

        input(&mut app, player).press_jump();
        app.update();
        input(&mut app, player).press_jump();
        app.update();

        assert_eq!(app.world().get::<EnergyPool>(player).unwrap().current(), 3);
    }

    #[test]
    fn test_locked_input_is_ignored_and_edges_cleared() {
        let (mut app, player) = app_with_player(EnergyConfig::default());
        app.world_mut()
            .get_mut::<PlayerStateMachine>(player)
            .unwrap()
            .change_state(PlayerState::Cutscene);

        {
            let mut input = input(&mut app, player);
            input.horizontal = 1.0;
            input.press_jump();
        }
        app.update();

        let movement = app.world().get::<MovementPhysics>(player).unwrap();
        assert_eq!(movement.velocity().x, 0.0);
        assert_eq!(app.world().get::<EnergyPool>(player).unwrap().current(), 4);
        assert_eq!(state(&app, player), PlayerState::Cutscene);

        let input = app.world().get::<PlayerInput>(player).unwrap();
        assert!(!input.jump_pressed);
        assert!(input.jump_held);
    }

    #[test]
    fn test_config_sanitized() {
        let config = ControllerConfig {
            descent_duration: -1.0,
            seat_exit_nudge: f32::NAN,
            motion_epsilon: 0.2,
            hold_offset: Vec2::new(0.0, f32::INFINITY),
        }
        .sanitized();

        assert_eq!(config.descent_duration, 0.0);
        assert_eq!(config.seat_exit_nudge, 0.0);
        assert_eq!(config.motion_epsilon, 0.2);
        assert_eq!(config.hold_offset, Vec2::ZERO);
    }
}

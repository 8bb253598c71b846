//! Controller integration test
//!
//! Полный FixedUpdate тик (Sense → ... → Present) через `create_stepped_app`:
//! - прыжки тратят энергию, на нуле: EnergyDepleted
//! - отдых на стуле восстанавливает энергию и сохраняет spawn point
//! - спуск по тросу: Descending → Idle на target через descent_duration
//! - SceneUnloaded отменяет отложенный спуск, игрок снова управляемый

use bevy::prelude::*;
use descent_simulation::*;

const FLOOR_HALF: Vec2 = Vec2::new(50.0, 0.5);

/// Helper: пол на y=0 + игрок на нём + активная сцена "deck"
fn create_level_app(energy: EnergyConfig) -> (App, Entity) {
    let mut app = create_stepped_app();
    app.insert_resource(ActiveScene::new("deck"));

    app.world_mut()
        .spawn((Transform::from_xyz(0.0, -0.5, 0.0), GroundSurface::new(FLOOR_HALF)));
    let player = app
        .world_mut()
        .spawn(player_bundle(
            Vec3::new(0.0, 0.5, 0.0),
            MovementConfig::default(),
            energy,
        ))
        .id();

    // Ground probe + зоны видят мир
    app.update();
    (app, player)
}

fn spawn_seat(app: &mut App, name: &str, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            InteractionZone::new(Vec2::new(1.0, 1.0)),
            Interactable::Seat(Seat::new(name, position).with_anchor(position)),
        ))
        .id()
}

fn spawn_descent_point(app: &mut App, position: Vec3, target: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            InteractionZone::new(Vec2::new(1.0, 1.0)),
            Interactable::DescentPoint(DescentPoint::new(target)),
        ))
        .id()
}

fn input(app: &mut App, player: Entity) -> Mut<'_, PlayerInput> {
    app.world_mut().get_mut::<PlayerInput>(player).unwrap()
}

fn state(app: &App, player: Entity) -> PlayerState {
    app.world().get::<PlayerStateMachine>(player).unwrap().current()
}

fn energy(app: &App, player: Entity) -> u32 {
    app.world().get::<EnergyPool>(player).unwrap().current()
}

fn position(app: &App, player: Entity) -> Vec3 {
    app.world().get::<Transform>(player).unwrap().translation
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// Прыжок: нажать, подержать `hold` тиков, отпустить и дождаться приземления
fn jump_and_land(app: &mut App, player: Entity, hold: usize) {
    input(app, player).press_jump();
    for _ in 0..hold {
        app.update();
    }
    input(app, player).release_jump();
    for _ in 0..240 {
        app.update();
        if app.world().get::<MovementPhysics>(player).unwrap().is_grounded() {
            break;
        }
    }
}

/// Test: 4 прыжка опустошают пул, пятый не стартует, Depleted ровно один раз
#[test]
fn test_jumps_drain_energy_until_depleted() {
    let (mut app, player) = create_level_app(EnergyConfig::default());
    drain::<EnergyDepleted>(&mut app);

    let mut changed = 0;
    for expected in (0..4).rev() {
        jump_and_land(&mut app, player, 10);
        changed += drain::<EnergyChanged>(&mut app).len();
        assert_eq!(energy(&app, player), expected);
        assert_eq!(state(&app, player), PlayerState::Idle);
    }
    assert_eq!(changed, 4);
    assert!(drain::<EnergyDepleted>(&mut app).is_empty());

    // Пятый прыжок: энергии нет
    input(&mut app, player).press_jump();
    app.update();

    let depleted = drain::<EnergyDepleted>(&mut app);
    assert_eq!(depleted.len(), 1);
    assert_eq!(depleted[0].entity, player);
    assert!(drain::<JumpTriggered>(&mut app).is_empty());
    assert_eq!(state(&app, player), PlayerState::Idle);
    assert!((position(&app, player).y - 0.5).abs() < 1e-3);
}

/// Test: сидя энергия восстанавливается 1/сек, стул становится spawn point
#[test]
fn test_sitting_restores_energy_and_saves_progress() {
    let (mut app, player) = create_level_app(EnergyConfig {
        starting_energy: 0,
        ..Default::default()
    });
    let seat = spawn_seat(&mut app, "bench", Vec3::new(0.0, 0.5, 0.0));
    app.update();

    let registry = app.world().get::<InteractionRegistry>(player).unwrap();
    assert_eq!(registry.current(), Some(seat));

    input(&mut app, player).interact_pressed = true;
    app.update();
    drain::<EnergyChanged>(&mut app);

    assert_eq!(state(&app, player), PlayerState::Sitting);
    assert!(app.world().get::<PresentationSignals>(player).unwrap().sitting);
    assert!(!app.world().get::<MovementPhysics>(player).unwrap().is_gravity_enabled());

    let spawn_registry = app.world().resource::<SpawnPointRegistry>();
    let current = spawn_registry.current().unwrap();
    assert!(current.id.starts_with("seat_bench_"));
    assert_eq!(current.scene, "deck");

    // 2.5 секунды → ровно 2 единицы
    let mut changed = 0;
    for _ in 0..150 {
        app.update();
        changed += drain::<EnergyChanged>(&mut app).len();
    }
    assert_eq!(energy(&app, player), 2);
    assert_eq!(changed, 2);

    // Встаём: restore прекращается
    input(&mut app, player).leave_pressed = true;
    app.update();
    assert_eq!(state(&app, player), PlayerState::Idle);
    assert!(!app.world().get::<EnergyPool>(player).unwrap().is_restoring());

    for _ in 0..120 {
        app.update();
    }
    assert_eq!(energy(&app, player), 2);
}

/// Test: отдых до полного пула: EnergyRestored один раз
#[test]
fn test_full_restore_emits_restored_once() {
    let (mut app, player) = create_level_app(EnergyConfig {
        starting_energy: 3,
        ..Default::default()
    });
    spawn_seat(&mut app, "cot", Vec3::new(0.0, 0.5, 0.0));
    app.update();
    drain::<EnergyRestored>(&mut app);

    input(&mut app, player).interact_pressed = true;
    let mut restored = 0;
    for _ in 0..300 {
        app.update();
        restored += drain::<EnergyRestored>(&mut app).len();
    }

    assert_eq!(energy(&app, player), 4);
    assert_eq!(restored, 1);
}

/// Test: трос: input заблокирован, через ~1 секунду игрок внизу и видим
#[test]
fn test_descent_finishes_at_target() {
    let (mut app, player) = create_level_app(EnergyConfig::default());
    let target = Vec3::new(20.0, 0.5, 0.0);
    let rope = spawn_descent_point(&mut app, Vec3::new(0.0, 0.5, 0.0), target);
    app.update();

    input(&mut app, player).interact_pressed = true;
    app.update();

    let triggered = drain::<InteractTriggered>(&mut app);
    assert_eq!(triggered.len(), 1);
    assert_eq!(triggered[0].target, rope);
    assert_eq!(state(&app, player), PlayerState::Descending);
    assert!(!app.world().get::<PresentationSignals>(player).unwrap().visible);

    // Input во время спуска игнорируется
    input(&mut app, player).horizontal = 1.0;
    for _ in 0..50 {
        app.update();
    }
    assert_eq!(state(&app, player), PlayerState::Descending);
    assert_eq!(position(&app, player).x, 0.0);

    input(&mut app, player).horizontal = 0.0;
    for _ in 0..20 {
        app.update();
    }

    assert_eq!(state(&app, player), PlayerState::Idle);
    assert!(app.world().get::<PresentationSignals>(player).unwrap().visible);
    assert!(app.world().get::<MovementPhysics>(player).unwrap().is_gravity_enabled());
    let landed = position(&app, player);
    assert_eq!(landed.x, target.x);
    assert!((landed.y - target.y).abs() < 1e-3);
    assert!(app.world().resource::<Timeline>().is_empty());

    // Трос одноразовый: зона выключена
    let interactable = app.world().get::<Interactable>(rope).unwrap();
    assert!(!interactable.zone_enabled());
}

/// Test: SceneUnloaded отменяет отложенный спуск
#[test]
fn test_scene_unload_cancels_pending_descent() {
    let (mut app, player) = create_level_app(EnergyConfig::default());
    spawn_descent_point(&mut app, Vec3::new(0.0, 0.5, 0.0), Vec3::new(20.0, 0.5, 0.0));
    app.update();

    input(&mut app, player).interact_pressed = true;
    app.update();
    assert_eq!(app.world().resource::<Timeline>().len(), 1);

    app.world_mut().send_event(SceneUnloaded {
        scene: "deck".to_string(),
    });
    app.update();

    assert!(app.world().resource::<Timeline>().is_empty());
    assert!(app.world().get::<InteractionRegistry>(player).unwrap().in_range().is_empty());

    // Игрок пережил unload: снова управляемый, видимый, с гравитацией
    assert_eq!(state(&app, player), PlayerState::Idle);
    assert!(app.world().get::<PresentationSignals>(player).unwrap().visible);
    assert!(app.world().get::<MovementPhysics>(player).unwrap().is_gravity_enabled());

    for _ in 0..90 {
        app.update();
    }
    // Спуск не доиграл: позиция та же
    assert_eq!(position(&app, player).x, 0.0);

    app.world_mut().send_event(SceneReady {
        scene: "deck".to_string(),
    });
    input(&mut app, player).horizontal = 1.0;
    for _ in 0..60 {
        app.update();
    }
    assert_eq!(state(&app, player), PlayerState::Moving);
    assert!(position(&app, player).x > 4.0);
}

/// Test: игрок уничтожен во время спуска: задача тихо отбрасывается
#[test]
fn test_despawned_owner_drops_descent_task() {
    let (mut app, player) = create_level_app(EnergyConfig::default());
    spawn_descent_point(&mut app, Vec3::new(0.0, 0.5, 0.0), Vec3::new(20.0, 0.5, 0.0));
    app.update();

    input(&mut app, player).interact_pressed = true;
    app.update();
    app.world_mut().despawn(player);

    for _ in 0..90 {
        app.update();
    }
    assert!(app.world().resource::<Timeline>().is_empty());
}

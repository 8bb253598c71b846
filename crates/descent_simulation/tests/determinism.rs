//! Property-based тесты детерминизма
//!
//! Один и тот же input скрипт (seeded RNG) → идентичный мир после N тиков

use bevy::prelude::*;
use descent_simulation::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TICK_COUNT: usize = 900;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED, TICK_COUNT);
    let second = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let first = run_simulation(1, TICK_COUNT);
    let second = run_simulation(2, TICK_COUNT);

    assert_ne!(first, second, "Разные input скрипты дали одинаковый мир");
}

/// Случайный input на тик: ходьба, прыжки, interact / leave
fn random_input(rng: &mut ChaCha8Rng, input: &mut PlayerInput) {
    if rng.gen_bool(0.05) {
        input.horizontal = rng.gen_range(-1.0..=1.0);
    }
    if !input.jump_held && rng.gen_bool(0.03) {
        input.press_jump();
    } else if input.jump_held && rng.gen_bool(0.1) {
        input.release_jump();
    }
    if rng.gen_bool(0.02) {
        input.interact_pressed = true;
    }
    if rng.gen_bool(0.01) {
        input.leave_pressed = true;
    }
}

/// Уровень: пол, стул, дверь с ключом, трос вниз
fn build_level(world: &mut World) {
    world.spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        GroundSurface::new(Vec2::new(30.0, 0.5)),
    ));
    world.spawn((
        Transform::from_xyz(0.0, -10.5, 0.0),
        GroundSurface::new(Vec2::new(30.0, 0.5)),
    ));
    world.spawn((
        Transform::from_xyz(-3.0, 0.5, 0.0),
        Pickup::new("key", Vec2::splat(0.3)),
    ));

    let seat = Vec3::new(3.0, 0.5, 0.0);
    world.spawn((
        Transform::from_translation(seat),
        InteractionZone::new(Vec2::new(1.0, 1.0)),
        Interactable::Seat(Seat::new("bench", seat).with_anchor(seat)),
    ));
    world.spawn((
        Transform::from_xyz(6.0, 0.5, 0.0),
        InteractionZone::new(Vec2::new(1.5, 1.0)),
        Interactable::LockedDoor(LockedDoor::new("key")),
        BlockingCollider::new(Vec2::new(0.25, 1.0)),
    ));
    world.spawn((
        Transform::from_xyz(-6.0, 0.5, 0.0),
        InteractionZone::new(Vec2::new(1.0, 1.0)),
        Interactable::DescentPoint(DescentPoint::new(Vec3::new(-6.0, -9.5, 0.0))),
    ));
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut app = create_stepped_app();
    app.insert_resource(ActiveScene::new("shaft"));

    build_level(app.world_mut());
    let player = app
        .world_mut()
        .spawn(player_bundle(
            Vec3::new(0.0, 0.5, 0.0),
            MovementConfig::default(),
            EnergyConfig::default(),
        ))
        .id();

    for _ in 0..tick_count {
        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            random_input(&mut rng, &mut input);
        }
        app.update();
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Transform>(world);
    snapshot.extend(world_snapshot::<PlayerStateMachine>(world));
    snapshot.extend(world_snapshot::<MovementPhysics>(world));
    snapshot.extend(world_snapshot::<EnergyPool>(world));
    snapshot.extend(world_snapshot::<Interactable>(world));
    snapshot
}

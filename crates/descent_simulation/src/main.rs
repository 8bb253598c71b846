//! Headless симуляция DESCENT
//!
//! Скриптованный сценарий без рендера: пробежка, прыжки до нуля энергии,
//! отдых на стуле, ключ → дверь, спуск по тросу.

use bevy::prelude::*;
use descent_simulation::{
    create_stepped_app, logger, player_bundle, ActiveScene, BlockingCollider, DescentPoint,
    EnergyConfig, EnergyPool, GroundSurface, Interactable, InteractionZone, LockedDoor,
    MovementConfig, Pickup, PlayerInput, PlayerStateMachine, Seat, SpawnPointRegistry,
};

const TICKS: u32 = 1000;

/// Input скрипта на конкретный тик
fn scripted_input(tick: u32, input: &mut PlayerInput) {
    match tick {
        // Бежим вправо, подбираем ключ
        0..=59 => input.horizontal = 1.0,
        // Прыжки на месте (пятый: уже без энергии)
        60 | 160 | 260 | 360 | 460 => {
            input.horizontal = 0.0;
            input.press_jump();
        }
        75 | 175 | 275 | 375 | 475 => input.release_jump(),
        // Садимся на стул, отдыхаем 3 секунды
        560 => input.interact_pressed = true,
        // Встаём, идём через дверь к тросу
        740 => input.leave_pressed = true,
        750..=833 => input.horizontal = 1.0,
        // Спуск
        840 => {
            input.horizontal = 0.0;
            input.interact_pressed = true;
        }
        _ => {}
    }
}

fn build_level(world: &mut World) {
    // Пол верхнего яруса и нижний ярус
    world.spawn((
        Transform::from_xyz(10.0, -0.5, 0.0),
        GroundSurface::new(Vec2::new(20.0, 0.5)),
    ));
    world.spawn((
        Transform::from_xyz(10.0, -20.5, 0.0),
        GroundSurface::new(Vec2::new(20.0, 0.5)),
    ));

    world.spawn((
        Transform::from_xyz(2.0, 0.5, 0.0),
        Pickup::new("key1", Vec2::splat(0.3)),
    ));

    let seat_position = Vec3::new(5.0, 0.5, 0.0);
    world.spawn((
        Transform::from_translation(seat_position),
        InteractionZone::new(Vec2::new(1.0, 1.0)),
        Interactable::Seat(
            Seat::new("bench", seat_position)
                .with_display_name("Upper Bench")
                .with_description("Top of the shaft")
                .with_anchor(seat_position),
        ),
    ));

    world.spawn((
        Transform::from_xyz(9.0, 0.5, 0.0),
        InteractionZone::new(Vec2::new(1.5, 1.0)),
        Interactable::LockedDoor(LockedDoor::new("key1")),
        BlockingCollider::new(Vec2::new(0.25, 1.0)),
    ));

    world.spawn((
        Transform::from_xyz(12.0, 0.5, 0.0),
        InteractionZone::new(Vec2::new(1.0, 1.0)),
        Interactable::DescentPoint(DescentPoint::new(Vec3::new(12.0, -19.5, 0.0))),
    ));
}

fn main() {
    println!("Starting DESCENT headless simulation ({} ticks)", TICKS);
    logger::set_log_level(logger::LogLevel::Info);

    let mut app = create_stepped_app();
    app.insert_resource(ActiveScene::new("shaft_top"));

    build_level(app.world_mut());
    let player = app
        .world_mut()
        .spawn(player_bundle(
            Vec3::new(0.0, 0.5, 0.0),
            MovementConfig::default(),
            EnergyConfig::default(),
        ))
        .id();

    for tick in 0..TICKS {
        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            scripted_input(tick, &mut input);
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let position = world
                .get::<Transform>(player)
                .map(|transform| transform.translation)
                .unwrap_or_default();
            let state = world
                .get::<PlayerStateMachine>(player)
                .map(|state| state.current());
            let energy = world
                .get::<EnergyPool>(player)
                .map(|pool| (pool.current(), pool.max()));

            println!(
                "Tick {}: pos ({:.2}, {:.2}) state {:?} energy {:?}",
                tick, position.x, position.y, state, energy
            );
        }
    }

    if let Some(registry) = app.world().get_resource::<SpawnPointRegistry>() {
        for spawn in registry.discovered() {
            println!(
                "Spawn point '{}' ({}) in '{}' at {:?}",
                spawn.id, spawn.display_name, spawn.scene, spawn.position
            );
        }
    }

    println!("Simulation complete!");
}

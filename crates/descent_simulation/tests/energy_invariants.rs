//! Energy инварианты на случайных последовательностях операций
//!
//! Проверяем после каждой операции:
//! - 0 <= current <= max
//! - неудачный consume ничего не меняет
//! - Restored только на переходе в полный пул

use std::time::Duration;

use descent_simulation::{EnergyConfig, EnergyEvent, EnergyPool};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 5] = [1, 7, 42, 1337, 90210];
const STEPS: usize = 2000;

fn random_pool(rng: &mut ChaCha8Rng) -> EnergyPool {
    let mut pool = EnergyPool::new(EnergyConfig {
        max_energy: rng.gen_range(0..8),
        starting_energy: rng.gen_range(0..10),
        jump_cost: rng.gen_range(0..3),
        restore_rate: rng.gen_range(0.0..4.0),
    });
    pool.start_restore();
    pool
}

fn check_bounds(pool: &EnergyPool, seed: u64, step: usize) {
    assert!(
        pool.current() <= pool.max(),
        "seed {} step {}: current {} > max {}",
        seed,
        step,
        pool.current(),
        pool.max()
    );
    let percentage = pool.percentage();
    assert!(
        (0.0..=1.0).contains(&percentage),
        "seed {} step {}: percentage {}",
        seed,
        step,
        percentage
    );
}

#[test]
fn test_random_operations_keep_energy_in_bounds() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pool = random_pool(&mut rng);

        for step in 0..STEPS {
            let before = pool.current();
            let was_full = pool.is_full();
            pool.drain_notifications();

            match rng.gen_range(0..6) {
                0 => {
                    let can_jump = pool.has_energy_to_jump();
                    let consumed = pool.consume_jump_energy();
                    assert_eq!(consumed, can_jump);
                    if consumed {
                        assert_eq!(pool.current(), before - pool.jump_cost());
                    } else {
                        assert_eq!(pool.current(), before);
                        assert_eq!(pool.drain_notifications(), vec![EnergyEvent::Depleted]);
                    }
                }
                1 => pool.tick(Duration::from_millis(rng.gen_range(0..700))),
                2 => pool.add_energy(rng.gen_range(0..5)),
                3 => pool.set_max(rng.gen_range(0..8)),
                4 => pool.restore_all(),
                _ => {
                    if rng.gen_bool(0.5) {
                        pool.start_restore();
                    } else {
                        pool.stop_restore();
                    }
                }
            }

            check_bounds(&pool, seed, step);

            let restored = pool
                .drain_notifications()
                .iter()
                .filter(|event| **event == EnergyEvent::Restored)
                .count();
            assert!(restored <= 1, "seed {} step {}: Restored {} раз", seed, step, restored);
            if restored == 1 {
                assert!(!was_full && pool.is_full(), "seed {} step {}", seed, step);
            }
        }
    }
}

#[test]
fn test_restore_is_monotonic_while_sitting() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pool = EnergyPool::new(EnergyConfig {
            starting_energy: 0,
            restore_rate: rng.gen_range(0.5..3.0),
            ..Default::default()
        });
        pool.start_restore();

        let mut previous = pool.current();
        for _ in 0..600 {
            pool.tick(Duration::from_secs_f64(1.0 / 60.0));
            assert!(pool.current() >= previous);
            assert!(pool.current() - previous <= 1);
            previous = pool.current();
        }
        assert!(pool.is_full(), "seed {}: 10 секунд отдыха не хватило", seed);
    }
}

//! Scenario tests against the public world API.

use prey_vs_predator::{Command, Config, EntityKind, Phase, SimEvent, Vec2, World};

const DT: f64 = 1.0 / 60.0;

fn empty_config() -> Config {
    let mut config = Config::default();
    config.world.initial_prey = 0;
    config.world.initial_predators = 0;
    config
}

fn running_world(config: Config, seed: u64) -> World {
    let mut world = World::seeded(config, seed);
    world.apply(Command::StartOrRestart);
    world.drain_events();
    world
}

#[test]
fn predator_on_top_of_prey_eats_it_first_tick() {
    let mut world = running_world(empty_config(), 1);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(0.0, 0.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(0.0, 0.0),
    });

    // Pin both in place so the check is exactly 0 < 10.
    world.prey_mut()[0].body.velocity = Vec2::ZERO;
    let predator = &mut world.predators_mut()[0];
    predator.body.velocity = Vec2::ZERO;
    predator.body.size = 10.0;
    world.drain_events();

    world.tick(DT);

    assert_eq!(world.prey_count(), 0);
    assert_eq!(world.predator_count(), 1);
    assert_eq!(world.predators()[0].hunt_count, 1);
    assert_eq!(world.predators()[0].last_meal, world.elapsed_secs());
    assert_eq!(world.stats().prey_eaten, 1);
    assert!(world.drain_events().contains(&SimEvent::Eaten));
}

#[test]
fn two_predators_cannot_eat_the_same_prey() {
    let mut world = running_world(empty_config(), 2);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(200.0, 200.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(200.0, 200.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(200.0, 200.0),
    });
    world.prey_mut()[0].body.velocity = Vec2::ZERO;
    for predator in world.predators_mut() {
        predator.body.velocity = Vec2::ZERO;
        predator.body.size = 10.0;
    }

    world.tick(DT);

    assert_eq!(world.prey_count(), 0);
    let meals: u32 = world.predators().iter().map(|p| p.hunt_count).sum();
    assert_eq!(meals, 1);
    assert_eq!(world.predators()[0].hunt_count, 1);
}

#[test]
fn despawn_last_prey_empties_world() {
    let mut world = running_world(empty_config(), 3);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(50.0, 50.0),
    });
    world.drain_events();

    world.apply(Command::DespawnRandom);

    assert_eq!(world.prey_count(), 0);
    assert_eq!(world.predator_count(), 0);
    assert_eq!(world.drain_events(), vec![SimEvent::Despawned(EntityKind::Prey)]);
}

#[test]
fn despawn_random_removes_exactly_one() {
    let mut world = running_world(Config::default(), 4);
    for _ in 0..5 {
        let before = world.prey_count() + world.predator_count();
        world.apply(Command::DespawnRandom);
        assert_eq!(world.prey_count() + world.predator_count(), before - 1);
    }
}

#[test]
fn empty_running_world_ends_on_next_tick() {
    let mut world = running_world(empty_config(), 5);
    assert_eq!(world.phase(), Phase::Running);

    world.tick(DT);

    assert_eq!(world.phase(), Phase::Ended);
    assert_eq!(world.drain_events(), vec![SimEvent::SimulationEnded]);

    // Further ticks do nothing once ended.
    let elapsed = world.elapsed_secs();
    world.tick(DT);
    assert_eq!(world.elapsed_secs(), elapsed);
}

#[test]
fn restart_from_ended_repopulates() {
    let mut config = Config::default();
    config.world.initial_prey = 7;
    config.world.initial_predators = 3;
    let mut world = running_world(config, 6);

    while world.prey_count() + world.predator_count() > 0 {
        world.apply(Command::DespawnRandom);
    }
    world.tick(DT);
    assert_eq!(world.phase(), Phase::Ended);

    world.apply(Command::StartOrRestart);

    assert_eq!(world.phase(), Phase::Running);
    assert_eq!(world.prey_count(), 7);
    assert_eq!(world.predator_count(), 3);
    assert_eq!(world.elapsed_secs(), 0.0);
    assert_eq!(world.stats().total_deaths, 0);
}

#[test]
fn spawn_is_ignored_after_the_end() {
    let mut world = running_world(empty_config(), 7);
    world.tick(DT);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(5.0, 5.0),
    });
    assert_eq!(world.prey_count(), 0);
}

#[test]
fn prey_dies_on_the_tick_its_lifespan_is_crossed() {
    let mut config = empty_config();
    config.prey.birth_chance = 0.0;
    let mut world = running_world(config, 8);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(300.0, 300.0),
    });
    world.prey_mut()[0].lifespan = 1.0;
    world.drain_events();

    // 0.25 s steps: age hits exactly 1.0 after four ticks, which is not past the lifespan.
    for _ in 0..4 {
        world.tick(0.25);
        assert_eq!(world.prey_count(), 1);
    }
    world.tick(0.25);
    assert_eq!(world.prey_count(), 0);
    assert!(world.drain_events().contains(&SimEvent::Despawned(EntityKind::Prey)));
}

#[test]
fn unfed_predator_starves() {
    let mut world = running_world(empty_config(), 9);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(300.0, 300.0),
    });
    world.predators_mut()[0].hunt_interval = 0.5;

    world.tick(0.5);
    assert_eq!(world.predator_count(), 1);
    world.tick(0.5);
    assert_eq!(world.predator_count(), 0);
    assert_eq!(world.phase(), Phase::Ended);
}

#[test]
fn prey_that_expires_this_tick_cannot_be_eaten() {
    let mut config = empty_config();
    config.prey.birth_chance = 0.0;
    let mut world = running_world(config, 15);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(100.0, 100.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(100.0, 100.0),
    });
    let prey = &mut world.prey_mut()[0];
    prey.body.velocity = Vec2::ZERO;
    prey.lifespan = 0.0;
    let predator = &mut world.predators_mut()[0];
    predator.body.velocity = Vec2::ZERO;
    predator.body.size = 10.0;
    world.drain_events();

    world.tick(DT);

    let events = world.drain_events();
    assert_eq!(world.prey_count(), 0);
    assert_eq!(world.stats().prey_eaten, 0);
    assert_eq!(world.predators()[0].hunt_count, 0);
    assert!(!events.contains(&SimEvent::Eaten));
    assert!(events.contains(&SimEvent::Despawned(EntityKind::Prey)));
}

#[test]
fn mature_prey_breeds_when_chance_is_certain() {
    let mut config = empty_config();
    config.prey.birth_chance = 1.0;
    config.prey.maturity_age = 0.0;
    let mut world = running_world(config, 10);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(300.0, 300.0),
    });
    world.drain_events();

    world.tick(DT);

    assert_eq!(world.prey_count(), 2);
    assert_eq!(world.stats().total_births, 1);
    assert_eq!(world.drain_events(), vec![SimEvent::Born(EntityKind::Prey)]);
}

#[test]
fn well_fed_predator_breeds_once_and_resets() {
    let mut config = empty_config();
    config.predator.birth_chance = 1.0;
    let mut world = running_world(config, 11);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(100.0, 100.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(100.0, 100.0),
    });
    let predator = &mut world.predators_mut()[0];
    predator.hunt_count = 4;
    predator.body.velocity = Vec2::ZERO;
    predator.body.size = 10.0;
    world.prey_mut()[0].body.velocity = Vec2::ZERO;

    world.tick(DT);

    assert_eq!(world.predator_count(), 2);
    assert_eq!(world.predators()[0].hunt_count, 0);
    assert_eq!(world.predators()[1].position(), Vec2::new(100.0, 100.0));
}

#[test]
fn predator_without_lucky_draw_keeps_count() {
    let mut config = empty_config();
    config.predator.birth_chance = 0.0;
    let mut world = running_world(config, 12);
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Predator,
        position: Vec2::new(100.0, 100.0),
    });
    world.apply(Command::SpawnEntity {
        kind: EntityKind::Prey,
        position: Vec2::new(100.0, 100.0),
    });
    let predator = &mut world.predators_mut()[0];
    predator.hunt_count = 5;
    predator.body.velocity = Vec2::ZERO;
    predator.body.size = 10.0;
    world.prey_mut()[0].body.velocity = Vec2::ZERO;

    world.tick(DT);

    assert_eq!(world.predator_count(), 1);
    assert_eq!(world.predators()[0].hunt_count, 6);
}

#[test]
fn positions_stay_in_bounds_over_a_long_run() {
    let mut config = Config::default();
    config.world.width = 200.0;
    config.world.height = 150.0;
    config.world.initial_prey = 30;
    config.world.initial_predators = 6;
    let mut world = running_world(config, 13);
    let bounds = world.bounds();

    for _ in 0..2_000 {
        world.tick(DT);
        for view in world.snapshot() {
            assert!(bounds.contains(view.position), "{:?} escaped {:?}", view, bounds);
        }
        if world.phase() != Phase::Running {
            break;
        }
    }
}

#[test]
fn same_seed_replays_the_same_run() {
    let run = |seed| {
        let mut world = running_world(Config::default(), seed);
        world.run(1_500, DT);
        world.snapshot().collect::<Vec<_>>()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn restart_while_running_clears_pause() {
    let mut world = running_world(Config::default(), 14);
    world.apply(Command::TogglePause);
    world.tick(1.0);
    world.apply(Command::StartOrRestart);
    assert!(!world.is_paused());
    assert_eq!(world.elapsed_secs(), 0.0);
    assert_eq!(world.prey_count(), 10);
}

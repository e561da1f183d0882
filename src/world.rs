use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::entity::{Bounds, EntityKind};
use crate::events::{Command, EntityView, Hud, SimEvent};
use crate::predator::Predator;
use crate::prey::Prey;
use crate::simulation_stats::SimulationStats;
use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start
    Title,
    Running,
    /// Both populations died out
    Ended,
}

/// The whole simulation: both populations, the clock and the phase.
pub struct World<R = SmallRng> {
    config: Config,
    bounds: Bounds,
    phase: Phase,
    paused: bool,
    /// Seconds since the run started. Entity timestamps use this clock.
    elapsed: f64,
    prey: Vec<Prey>,
    predators: Vec<Predator>,
    events: Vec<SimEvent>,
    stats: SimulationStats,
    rng: R,
}

impl World<SmallRng> {
    pub fn seeded(config: Config, seed: u64) -> Self {
        World::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> World<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        let bounds = Bounds::new(config.world.width, config.world.height);
        World {
            config,
            bounds,
            phase: Phase::Title,
            paused: false,
            elapsed: 0.0,
            prey: Vec::new(),
            predators: Vec::new(),
            events: Vec::new(),
            stats: SimulationStats::new(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    pub fn prey_mut(&mut self) -> &mut [Prey] {
        &mut self.prey
    }

    pub fn predators_mut(&mut self) -> &mut [Predator] {
        &mut self.predators
    }

    pub fn prey_count(&self) -> usize {
        self.prey.len()
    }

    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            prey: self.prey.len(),
            predators: self.predators.len(),
            elapsed_secs: self.elapsed,
        }
    }

    /// Everything the renderer needs, prey first.
    pub fn snapshot(&self) -> impl Iterator<Item = EntityView> + '_ {
        let prey = self.prey.iter().map(|p| EntityView {
            kind: EntityKind::Prey,
            position: p.body.position,
            size: p.body.size,
        });
        let predators = self.predators.iter().map(|p| EntityView {
            kind: EntityKind::Predator,
            position: p.body.position,
            size: p.body.size,
        });
        prey.chain(predators)
    }

    /// Events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");
        match command {
            Command::StartOrRestart => self.start_or_restart(),
            Command::SpawnEntity { kind, position } => self.spawn(kind, position),
            Command::DespawnRandom => self.despawn_random(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Title starts a run; Running and Ended throw the current run away and start over.
    pub fn start_or_restart(&mut self) {
        match self.phase {
            Phase::Title => info!("starting simulation"),
            Phase::Running | Phase::Ended => info!(
                survived = %crate::events::format_clock(self.elapsed),
                "restarting simulation"
            ),
        }

        self.prey.clear();
        self.predators.clear();
        self.elapsed = 0.0;
        self.paused = false;
        self.stats = SimulationStats::new();
        self.phase = Phase::Running;
        self.populate();
        self.events.push(SimEvent::Started);
    }

    fn populate(&mut self) {
        let (w, h) = (self.bounds.width, self.bounds.height);
        for _ in 0..self.config.world.initial_prey {
            let position =
                Vec2::new(self.rng.random_range(0.0..=w), self.rng.random_range(0.0..=h));
            let prey = Prey::new(position, self.elapsed, &self.config.prey, &mut self.rng);
            self.prey.push(prey);
        }
        for _ in 0..self.config.world.initial_predators {
            let position =
                Vec2::new(self.rng.random_range(0.0..=w), self.rng.random_range(0.0..=h));
            let predator =
                Predator::new(position, self.elapsed, &self.config.predator, &mut self.rng);
            self.predators.push(predator);
        }
        debug!(
            prey = self.prey.len(),
            predators = self.predators.len(),
            "spawned initial populations"
        );
    }

    /// Places a new entity. Ignored outside a running simulation.
    pub fn spawn(&mut self, kind: EntityKind, position: Vec2) {
        if self.phase != Phase::Running {
            debug!(?kind, phase = ?self.phase, "ignoring spawn outside a running simulation");
            return;
        }
        let position = self.bounds.wrap(position);
        match kind {
            EntityKind::Prey => {
                let prey = Prey::new(position, self.elapsed, &self.config.prey, &mut self.rng);
                self.prey.push(prey);
            }
            EntityKind::Predator => {
                let predator =
                    Predator::new(position, self.elapsed, &self.config.predator, &mut self.rng);
                self.predators.push(predator);
            }
        }
        debug!(?kind, x = position.x, y = position.y, "spawned");
        self.events.push(SimEvent::Spawned(kind));
    }

    /// Removes one entity picked uniformly from both populations, prey indexed first.
    pub fn despawn_random(&mut self) {
        let total = self.prey.len() + self.predators.len();
        if total == 0 {
            return;
        }
        let index = self.rng.random_range(0..total);
        let kind = if index < self.prey.len() {
            self.prey.remove(index);
            EntityKind::Prey
        } else {
            self.predators.remove(index - self.prey.len());
            EntityKind::Predator
        };
        debug!(?kind, index, "despawned random entity");
        self.stats.total_deaths += 1;
        self.events.push(SimEvent::Despawned(kind));
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    /// Advances one frame of `dt` seconds. Does nothing outside a running simulation.
    pub fn tick(&mut self, dt: f64) {
        if self.phase != Phase::Running {
            return;
        }
        self.elapsed += dt;

        if !self.paused {
            self.tick_prey();
            self.tick_predators();
            self.stats.record_population(self.prey.len(), self.predators.len());
            trace!(
                t = self.elapsed,
                prey = self.prey.len(),
                predators = self.predators.len(),
                "tick"
            );
        }

        if self.prey.is_empty() && self.predators.is_empty() {
            self.phase = Phase::Ended;
            self.events.push(SimEvent::SimulationEnded);
            info!(
                survived = %crate::events::format_clock(self.elapsed),
                births = self.stats.total_births,
                deaths = self.stats.total_deaths,
                eaten = self.stats.prey_eaten,
                "both populations extinct"
            );
        }
    }

    /// Runs `ticks` frames of `dt`, stopping early once the simulation ends.
    pub fn run(&mut self, ticks: u64, dt: f64) -> u64 {
        for done in 0..ticks {
            if self.phase != Phase::Running {
                return done;
            }
            self.tick(dt);
        }
        ticks
    }

    fn tick_prey(&mut self) {
        let now = self.elapsed;
        let bounds = self.bounds;
        let tuning = &self.config.prey;

        // Movement reads only the predator positions, so it runs in parallel.
        let threats: Vec<Vec2> = self.predators.iter().map(Predator::position).collect();
        self.prey
            .par_iter_mut()
            .for_each(|p| p.advance(&threats, bounds, tuning));

        // Draws stay sequential so a seed replays the same run.
        let mut expired = vec![false; self.prey.len()];
        let mut born = Vec::new();
        for (idx, p) in self.prey.iter().enumerate() {
            let outcome = p.lifecycle(now, tuning, &mut self.rng);
            expired[idx] = outcome.expired;
            born.extend(outcome.offspring);
        }

        for _ in expired.iter().filter(|&&e| e) {
            self.events.push(SimEvent::Despawned(EntityKind::Prey));
            self.stats.total_deaths += 1;
        }
        for _ in &born {
            self.events.push(SimEvent::Born(EntityKind::Prey));
            self.stats.total_births += 1;
        }
        if !born.is_empty() {
            debug!(count = born.len(), "prey born");
        }

        remove_marked(&mut self.prey, &expired);
        self.prey.extend(born);
    }

    fn tick_predators(&mut self) {
        let now = self.elapsed;
        let bounds = self.bounds;
        let tuning = &self.config.predator;

        let mut taken = vec![false; self.prey.len()];
        let mut starved = vec![false; self.predators.len()];
        let mut born = Vec::new();

        for (idx, predator) in self.predators.iter_mut().enumerate() {
            let outcome = predator.tick(now, &self.prey, &taken, bounds, tuning, &mut self.rng);
            if !outcome.eaten.is_empty() {
                debug!(idx, eaten = outcome.eaten.len(), "predator fed");
            }
            for &eaten in &outcome.eaten {
                taken[eaten] = true;
                self.events.push(SimEvent::Eaten);
                self.stats.prey_eaten += 1;
            }
            if outcome.starved {
                debug!(idx, hunt_count = predator.hunt_count, "predator starved");
                self.events.push(SimEvent::Despawned(EntityKind::Predator));
                self.stats.total_deaths += 1;
            }
            starved[idx] = outcome.starved;
            for _ in &outcome.offspring {
                self.events.push(SimEvent::Born(EntityKind::Predator));
                self.stats.total_births += 1;
            }
            born.extend(outcome.offspring);
        }

        remove_marked(&mut self.prey, &taken);
        remove_marked(&mut self.predators, &starved);
        self.predators.extend(born);
    }
}

/// Drops every item whose mark is set, keeping the rest in order.
fn remove_marked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
}

use rand::Rng;

use crate::config::PredatorConfig;
use crate::entity::{Body, Bounds};
use crate::prey::Prey;
use crate::vector::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct Predator {
    pub body: Body,
    /// World clock, seconds
    pub last_meal: f64,
    /// Seconds without food before starving
    pub hunt_interval: f64,
    /// Meals since the last birth
    pub hunt_count: u32,
}

/// What a predator asks the world to do after its tick.
#[derive(Debug, Default)]
pub struct PredatorOutcome {
    pub starved: bool,
    pub offspring: Vec<Predator>,
    /// Indices into the prey slice, in the order they were eaten
    pub eaten: Vec<usize>,
}

impl Predator {
    pub fn new(position: Vec2, now: f64, tuning: &PredatorConfig, rng: &mut impl Rng) -> Self {
        let s = tuning.initial_speed;
        let velocity = Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s));
        let size = rng.random_range(tuning.size_min..=tuning.size_max);
        let hunt_interval = rng.random_range(tuning.hunt_interval_min..=tuning.hunt_interval_max);

        Predator {
            body: Body::new(position, velocity, size, now),
            last_meal: now,
            hunt_interval,
            hunt_count: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// `taken[i]` marks prey already eaten this tick by another predator; those
    /// are invisible to this one.
    pub fn tick(
        &mut self,
        now: f64,
        prey: &[Prey],
        taken: &[bool],
        bounds: Bounds,
        tuning: &PredatorConfig,
        rng: &mut impl Rng,
    ) -> PredatorOutcome {
        self.body.integrate(bounds);

        let mut outcome = PredatorOutcome::default();
        self.hunt(now, prey, taken, tuning, rng, &mut outcome);
        outcome.starved = now - self.last_meal > self.hunt_interval;
        outcome
    }

    fn hunt(
        &mut self,
        now: f64,
        prey: &[Prey],
        taken: &[bool],
        tuning: &PredatorConfig,
        rng: &mut impl Rng,
        outcome: &mut PredatorOutcome,
    ) {
        let here = self.body.position;
        let mut nearest: Option<(f64, Vec2)> = None;

        for (idx, p) in prey.iter().enumerate() {
            if taken.get(idx).copied().unwrap_or(false) {
                continue;
            }
            let distance = here.distance(p.position());

            // Eaten prey still count as a target. Ties go to the earlier prey.
            if nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, p.position()));
            }

            if distance < self.body.size {
                outcome.eaten.push(idx);
                self.last_meal = now;
                self.hunt_count += 1;
                if self.hunt_count >= tuning.meals_to_breed
                    && rng.random::<f64>() < tuning.birth_chance
                {
                    outcome.offspring.push(Predator::new(here, now, tuning, rng));
                    self.hunt_count = 0;
                }
            }
        }

        if let Some((_, target)) = nearest {
            let desired = (target - here).set_magnitude(tuning.pursuit_strength);
            self.body.velocity = (self.body.velocity + desired).limit(tuning.max_speed);
        }
    }
}

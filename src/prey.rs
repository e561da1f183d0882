use rand::Rng;

use crate::config::PreyConfig;
use crate::entity::{Body, Bounds};
use crate::vector::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct Prey {
    pub body: Body,
    /// Seconds
    pub lifespan: f64,
}

/// What a prey asks the world to do after its tick.
#[derive(Debug, Default)]
pub struct PreyOutcome {
    pub expired: bool,
    pub offspring: Option<Prey>,
}

impl Prey {
    pub fn new(position: Vec2, now: f64, tuning: &PreyConfig, rng: &mut impl Rng) -> Self {
        let s = tuning.initial_speed;
        let velocity = Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s));
        let size = rng.random_range(tuning.size_min..=tuning.size_max);
        let lifespan = rng.random_range(tuning.lifespan_min..=tuning.lifespan_max);

        Prey {
            body: Body::new(position, velocity, size, now),
            lifespan,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn tick(
        &mut self,
        now: f64,
        predators: &[Vec2],
        bounds: Bounds,
        tuning: &PreyConfig,
        rng: &mut impl Rng,
    ) -> PreyOutcome {
        self.advance(predators, bounds, tuning);
        self.lifecycle(now, tuning, rng)
    }

    /// Movement half of the tick. Uses no randomness, so the world can run it
    /// for every prey in parallel.
    pub fn advance(&mut self, predators: &[Vec2], bounds: Bounds, tuning: &PreyConfig) {
        self.body.integrate(bounds);
        self.body.velocity += self.flee_vector(predators, tuning);
        if let Some(cap) = tuning.max_speed {
            self.body.velocity = self.body.velocity.limit(cap);
        }
    }

    /// Summed push away from every predator inside the flee radius, capped at `max_flee`.
    pub fn flee_vector(&self, predators: &[Vec2], tuning: &PreyConfig) -> Vec2 {
        let here = self.body.position;
        let mut flee = Vec2::ZERO;
        for &predator in predators {
            if here.distance(predator) < tuning.flee_radius {
                flee += (here - predator).set_magnitude(tuning.flee_strength);
            }
        }
        flee.limit(tuning.max_flee)
    }

    /// Ageing and breeding half of the tick.
    pub fn lifecycle(&self, now: f64, tuning: &PreyConfig, rng: &mut impl Rng) -> PreyOutcome {
        let age = self.body.age(now);
        let expired = age > self.lifespan;

        // Expiry does not cancel a birth on the same tick.
        let offspring = if age > tuning.maturity_age && rng.random::<f64>() < tuning.birth_chance {
            Some(Prey::new(self.body.position, now, tuning, rng))
        } else {
            None
        };

        PreyOutcome { expired, offspring }
    }
}

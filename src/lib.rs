//! # Prey vs Predator
//!
//! A small 2D agent simulation. Prey wander and flee from nearby predators;
//! predators chase the nearest prey, eat whatever they touch and starve if
//! they go too long without a meal. Both sides breed.
//!
//! ```rust,no_run
//! use prey_vs_predator::{Command, Config, World};
//!
//! let mut world = World::seeded(Config::default(), 42);
//! world.apply(Command::StartOrRestart);
//! world.run(600, 1.0 / 60.0);
//! println!("prey: {}, predators: {}", world.prey_count(), world.predator_count());
//! ```

pub mod config;
pub mod entity;
pub mod events;
pub mod predator;
pub mod prey;
pub mod simulation_stats;
pub mod vector;
pub mod world;

#[cfg(test)]
mod test_support;

pub use config::{Config, ConfigError};
pub use entity::{Body, Bounds, EntityKind};
pub use events::{Command, EntityView, Hud, SimEvent, format_clock};
pub use predator::Predator;
pub use prey::Prey;
pub use simulation_stats::SimulationStats;
pub use vector::Vec2;
pub use world::{Phase, World};

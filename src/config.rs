//! Tuning parameters, loaded from `tuning.toml` so the balance can be adjusted
//! without recompiling. Every section falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub prey: PreyConfig,
    pub predator: PredatorConfig,
}

/// World bounds and starting populations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub initial_prey: usize,
    pub initial_predators: usize,
}

/// Prey movement, lifespan and breeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyConfig {
    /// Initial velocity components are drawn from `[-initial_speed, initial_speed]`
    pub initial_speed: f64,
    pub size_min: f64,
    pub size_max: f64,
    /// Seconds
    pub lifespan_min: f64,
    pub lifespan_max: f64,
    pub flee_radius: f64,
    /// Push away from each nearby predator
    pub flee_strength: f64,
    /// Cap on the summed push
    pub max_flee: f64,
    /// Seconds before a prey may breed
    pub maturity_age: f64,
    /// Per-tick chance of breeding once mature
    pub birth_chance: f64,
    /// Optional velocity cap after fleeing. Unset keeps velocity unbounded.
    pub max_speed: Option<f64>,
}

/// Predator movement, hunger and breeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    pub initial_speed: f64,
    pub size_min: f64,
    pub size_max: f64,
    /// Seconds without a meal before starving
    pub hunt_interval_min: f64,
    pub hunt_interval_max: f64,
    pub pursuit_strength: f64,
    pub max_speed: f64,
    pub meals_to_breed: u32,
    /// Chance of breeding per meal once `meals_to_breed` is reached
    pub birth_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            initial_prey: 10,
            initial_predators: 5,
        }
    }
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 0.5,
            size_min: 5.0,
            size_max: 10.0,
            lifespan_min: 100.0,
            lifespan_max: 180.0,
            flee_radius: 50.0,
            flee_strength: 0.5,
            max_flee: 1.0,
            maturity_age: 60.0,
            birth_chance: 0.01,
            max_speed: None,
        }
    }
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            size_min: 10.0,
            size_max: 15.0,
            hunt_interval_min: 60.0,
            hunt_interval_max: 90.0,
            pursuit_strength: 1.0,
            max_speed: 2.0,
            meals_to_breed: 5,
            birth_chance: 0.2,
        }
    }
}

impl Config {
    /// Load and validate a tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "tuning file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(w.width > 0.0 && w.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world bounds must be positive, got {}x{}",
                w.width, w.height
            )));
        }

        let p = &self.prey;
        check_range("prey.size", p.size_min, p.size_max)?;
        check_range("prey.lifespan", p.lifespan_min, p.lifespan_max)?;
        check_non_negative("prey.initial_speed", p.initial_speed)?;
        check_non_negative("prey.flee_radius", p.flee_radius)?;
        check_non_negative("prey.flee_strength", p.flee_strength)?;
        check_non_negative("prey.max_flee", p.max_flee)?;
        check_non_negative("prey.maturity_age", p.maturity_age)?;
        check_probability("prey.birth_chance", p.birth_chance)?;
        if let Some(cap) = p.max_speed {
            check_non_negative("prey.max_speed", cap)?;
        }

        let q = &self.predator;
        check_range("predator.size", q.size_min, q.size_max)?;
        check_range("predator.hunt_interval", q.hunt_interval_min, q.hunt_interval_max)?;
        check_non_negative("predator.initial_speed", q.initial_speed)?;
        check_non_negative("predator.pursuit_strength", q.pursuit_strength)?;
        check_non_negative("predator.max_speed", q.max_speed)?;
        check_probability("predator.birth_chance", q.birth_chance)?;
        Ok(())
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    check_non_negative(&format!("{name}_min"), min)?;
    if min > max || !max.is_finite() {
        return Err(ConfigError::Invalid(format!(
            "{name}_min ({min}) must not exceed {name}_max ({max})"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be a non-negative number, got {value}")))
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

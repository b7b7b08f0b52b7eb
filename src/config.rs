//! Configuration for the instability simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub cells: CellConfig,
    pub mutation: MutationConfig,
    pub treatment: TreatmentConfig,
    pub run: RunConfig,
    pub logging: LoggingConfig,
}

/// World/lattice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Lattice width in sites
    pub width: usize,
    /// Lattice height in sites
    pub height: usize,
    /// Number of cells to seed the population with
    pub initial_population: usize,
    /// Spatial model. When false, division bypasses the neighborhood
    /// search and any empty capacity counts as room (stub fallback).
    pub spatial: bool,
}

/// Per-cell dynamics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    /// Probability of stochastic death per step
    pub death_prob: f64,
    /// Maximum fitness, for division probability and the mutation clamp
    pub max_fitness: f64,
    /// Multiplier applied to fitness when computing division probability
    pub fitness_mult: f64,
    /// Fitness assigned to seed cells
    pub initial_fitness: f64,
}

/// Mutation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Shape of the gamma distribution of fitness effects
    pub gamma_k: f64,
    /// Scale of the gamma distribution of fitness effects
    pub gamma_mean: f64,
    /// Shift added to each gamma deviate
    pub gamma_shift: f64,
    /// Width factor scaling each fitness effect
    pub gamma_width: f64,
    /// Probability of a fitness-effect mutation per daughter
    pub mut_prob: f64,
    /// Probability of each stability mutation (increase and decrease
    /// are independent draws with this same probability)
    pub stability_mut_prob: f64,
}

/// Mid-run treatment switch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentConfig {
    /// Population size that triggers treatment
    pub start: usize,
    /// Mutation probability in effect after the trigger (one-way)
    pub mut_prob: f64,
}

/// Run controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of time steps to run for
    pub time_steps: u64,
}

/// Logging and data recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Updates between statistics snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            cells: CellConfig::default(),
            mutation: MutationConfig::default(),
            treatment: TreatmentConfig::default(),
            run: RunConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            initial_population: 1,
            spatial: true,
        }
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            death_prob: 0.01,
            max_fitness: 10.0,
            fitness_mult: 1.0,
            initial_fitness: 0.1,
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            gamma_k: 1.0,
            gamma_mean: 1.0,
            gamma_shift: -1.0,
            gamma_width: 0.1,
            mut_prob: 0.01,
            stability_mut_prob: 0.01,
        }
    }
}

impl Default for TreatmentConfig {
    fn default() -> Self {
        Self {
            start: 10_000,
            mut_prob: 0.1,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { time_steps: 1000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Called before any simulation step; an invalid configuration is
    /// never partially applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::invalid("grid dimensions must be > 0"));
        }
        if self.world.initial_population == 0 {
            return Err(ConfigError::invalid("initial_population must be > 0"));
        }
        if self.world.initial_population > self.world.width * self.world.height {
            return Err(ConfigError::invalid(
                "initial_population cannot exceed grid capacity",
            ));
        }
        for (name, p) in [
            ("death_prob", self.cells.death_prob),
            ("mut_prob", self.mutation.mut_prob),
            ("stability_mut_prob", self.mutation.stability_mut_prob),
            ("treatment mut_prob", self.treatment.mut_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.cells.max_fitness <= 0.0 {
            return Err(ConfigError::invalid("max_fitness must be > 0"));
        }
        if self.mutation.gamma_k <= 0.0 || self.mutation.gamma_mean <= 0.0 {
            return Err(ConfigError::invalid(
                "gamma shape and scale must both be > 0",
            ));
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::invalid("stats_interval must be > 0"));
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    InvalidValue(String),
}

impl ConfigError {
    fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidValue(msg.into())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "YAML error: {}", e),
            Self::InvalidValue(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

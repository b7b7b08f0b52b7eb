//! # instability
//!
//! Stochastic spatial model of clonal evolution under genomic
//! instability.
//!
//! Cells live on a 2-D lattice and each update every occupied site is
//! swept once: the cell dies with a fixed probability, otherwise it
//! may divide into an empty Moore neighbor with probability
//! proportional to its fitness, producing two independently mutated
//! daughters; otherwise it quiesces unchanged. Mutations shift fitness
//! by a shifted, scaled gamma deviate whose magnitude is modulated by
//! a second heritable trait, stability. Once the population reaches a
//! trigger size, a one-way "treatment" switch changes the active
//! mutation probability.
//!
//! ## Features
//!
//! - **Reproducible**: seeded ChaCha8 random number generation with a
//!   strict per-cell draw order
//! - **Configurable**: YAML configuration files
//! - **Observable**: read-only statistics snapshots and division hooks
//!
//! ## Quick start
//!
//! ```rust
//! use instability::{Config, World};
//!
//! let mut config = Config::default();
//! config.world.width = 50;
//! config.world.height = 50;
//! config.run.time_steps = 100;
//!
//! let mut world = World::new_with_seed(config, 42).unwrap();
//! let outcome = world.run();
//!
//! println!("Population: {}", world.population());
//! println!("Outcome: {}", outcome);
//! ```

pub mod cell;
pub mod config;
pub mod grid;
pub mod mutation;
pub mod stats;
pub mod world;

// Re-export main types
pub use cell::Cell;
pub use config::{Config, ConfigError};
pub use grid::Grid;
pub use world::{DivisionObserver, Outcome, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

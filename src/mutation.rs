//! Heritable trait mutation for daughter cells.

use crate::cell::Cell;
use crate::config::{ConfigError, MutationConfig};
use rand::Rng;
use rand_distr::{Distribution, Gamma};

/// Size of a single stability-shifting mutation
const STABILITY_STEP: f64 = 0.1;

/// Transforms a parent's trait values into a mutated offspring's.
///
/// Three mutation categories are tried in strict priority order, each
/// consuming one Bernoulli draw, with at most one applied per call:
///
/// 1. fitness effect (gamma-distributed, scaled by parent stability)
/// 2. stability increase
/// 3. stability decrease
///
/// Draws are consumed lazily: once a category succeeds, no further
/// draws happen. This keeps the RNG stream aligned across runs with
/// the same seed.
pub struct MutationEngine {
    gamma: Gamma<f64>,
    gamma_shift: f64,
    gamma_width: f64,
    stability_mut_prob: f64,
    max_fitness: f64,
}

impl MutationEngine {
    /// Build the engine, constructing the gamma distribution up front.
    ///
    /// Fails fast on gamma parameters the distribution cannot accept.
    pub fn new(mutation: &MutationConfig, max_fitness: f64) -> Result<Self, ConfigError> {
        let gamma = Gamma::new(mutation.gamma_k, mutation.gamma_mean).map_err(|e| {
            ConfigError::InvalidValue(format!(
                "gamma distribution (shape {}, scale {}): {}",
                mutation.gamma_k, mutation.gamma_mean, e
            ))
        })?;

        Ok(Self {
            gamma,
            gamma_shift: mutation.gamma_shift,
            gamma_width: mutation.gamma_width,
            stability_mut_prob: mutation.stability_mut_prob,
            max_fitness,
        })
    }

    /// Produce a daughter cell from `parent`.
    ///
    /// `mut_prob` is passed per call because the treatment switch can
    /// change the active fitness-mutation probability mid-run. Returns
    /// the offspring and whether any mutation was applied.
    pub fn mutate<R: Rng>(&self, parent: &Cell, mut_prob: f64, rng: &mut R) -> (Cell, bool) {
        let mut child = *parent;

        if rng.gen_bool(mut_prob) {
            let g = self.gamma.sample(rng);
            let effect = (g + self.gamma_shift) * self.gamma_width * parent.stability;
            // Upper clamp only: fitness may go negative, which maps to
            // zero division probability downstream.
            child.fitness = (parent.fitness + effect).min(self.max_fitness);
            return (child, true);
        }

        if rng.gen_bool(self.stability_mut_prob) {
            child.stability += STABILITY_STEP;
            return (child, true);
        }

        if rng.gen_bool(self.stability_mut_prob) {
            child.stability -= STABILITY_STEP;
            return (child, true);
        }

        (child, false)
    }
}

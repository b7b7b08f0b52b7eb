//! Cell structure: one organism occupying one lattice site.

use serde::{Deserialize, Serialize};

/// A living cell on the lattice.
///
/// Cells are immutable once placed: division produces brand-new values
/// (copied from the parent, then mutated), and a site is only ever
/// changed by full replacement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Reproductive fitness; drives division probability
    pub fitness: f64,
    /// Genomic stability; scales the magnitude of fitness-affecting mutations
    pub stability: f64,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            fitness: 0.1,
            stability: 1.0,
        }
    }
}

impl Cell {
    /// Create a cell with the given fitness and default stability
    pub fn with_fitness(fitness: f64) -> Self {
        Self {
            fitness,
            ..Self::default()
        }
    }
}

//! Read-only statistics over the population grid.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for one update
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Update counter when the snapshot was taken
    pub update: u64,
    /// Occupied-site count
    pub population: usize,
    /// Mean fitness across occupied cells
    pub fitness_mean: f64,
    /// Population variance of fitness
    pub fitness_variance: f64,
    /// Minimum fitness
    pub fitness_min: f64,
    /// Maximum fitness
    pub fitness_max: f64,
    /// Mean stability across occupied cells
    pub stability_mean: f64,
    /// Divisions this step
    pub births: usize,
    /// Deaths this step
    pub deaths: usize,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the fitness/stability distribution from the grid.
    ///
    /// Never mutates grid or cell state.
    pub fn sample(&mut self, grid: &Grid, update: u64) {
        self.update = update;
        self.population = grid.count();

        if self.population == 0 {
            self.fitness_mean = 0.0;
            self.fitness_variance = 0.0;
            self.fitness_min = 0.0;
            self.fitness_max = 0.0;
            self.stability_mean = 0.0;
            return;
        }

        let n = self.population as f64;
        let mut sum = 0.0;
        let mut stability_sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (_, cell) in grid.iter_occupied() {
            sum += cell.fitness;
            stability_sum += cell.stability;
            min = min.min(cell.fitness);
            max = max.max(cell.fitness);
        }

        let mean = sum / n;
        let mut sq_dev = 0.0;
        for (_, cell) in grid.iter_occupied() {
            sq_dev += (cell.fitness - mean) * (cell.fitness - mean);
        }

        self.fitness_mean = mean;
        self.fitness_variance = sq_dev / n;
        self.fitness_min = min;
        self.fitness_max = max;
        self.stability_mean = stability_sum / n;
    }

    /// Save stats to JSON file
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "U:{:6} | Pop:{:6} | Fit:{:.3} (var {:.3}, min {:.3}, max {:.3}) | Stab:{:.2} | B:{} D:{}",
            self.update,
            self.population,
            self.fitness_mean,
            self.fitness_variance,
            self.fitness_min,
            self.fitness_max,
            self.stability_mean,
            self.births,
            self.deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in updates
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.update, s.population))
            .collect()
    }

    /// Get mean fitness over time
    pub fn fitness_series(&self) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.update, s.fitness_mean))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

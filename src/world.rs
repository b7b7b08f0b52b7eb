//! Simulation world: step scheduler, division-site search, and run
//! controller.

use crate::cell::Cell;
use crate::config::{Config, ConfigError};
use crate::grid::Grid;
use crate::mutation::MutationEngine;
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Updates without a birth before a run is declared stagnant
const STAGNATION_WINDOW: u64 = 1000;

/// Why a run stopped.
///
/// The original model printed "Success!" for stagnation and "Failure!"
/// for saturation; those labels carry no correctness meaning and are
/// kept here as opaque termination tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Population reached zero
    Extinction,
    /// No births for over `STAGNATION_WINDOW` consecutive updates
    Stagnation,
    /// Population filled the entire grid
    Saturation,
    /// Time-step budget ran out
    BudgetExhausted,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extinction => write!(f, "extinction"),
            Self::Stagnation => write!(f, "stagnation (no births for over 1000 updates)"),
            Self::Saturation => write!(f, "saturation (grid full)"),
            Self::BudgetExhausted => write!(f, "time budget exhausted"),
        }
    }
}

/// Hooks fired synchronously around each division, once per daughter.
///
/// Extension point for optional instrumentation such as lineage
/// tracking. The default implementation does nothing.
pub trait DivisionObserver {
    /// Called before a daughter is mutated from the parent at `site`
    fn before_division(&mut self, _site: usize) {}
    /// Called once the mutated daughter is ready, before placement
    fn offspring_ready(&mut self, _offspring: &Cell, _site: usize) {}
}

/// Default observer: does nothing
pub struct NoopObserver;

impl DivisionObserver for NoopObserver {}

/// The simulation world.
///
/// Owns the population grid for the whole run and is the only
/// component that writes to it. Execution is single-threaded and fully
/// sequential: sites are processed in ascending index order and every
/// RNG draw is deterministic given the seed.
pub struct World {
    /// Population lattice
    pub grid: Grid,
    /// Run configuration (read-only after validation)
    pub config: Config,
    /// Simulation clock, incremented once per completed sweep
    pub update: u64,
    /// Latest statistics snapshot
    pub stats: Stats,
    /// Recorded snapshots at the configured cadence
    pub stats_history: StatsHistory,

    mutation: MutationEngine,
    /// Active fitness-mutation probability; switched once by treatment
    active_mut_prob: f64,
    treated: bool,
    /// Update of the most recent division
    last_birth: u64,

    rng: ChaCha8Rng,
    seed: u64,

    births_this_step: usize,
    deaths_this_step: usize,

    observer: Box<dyn DivisionObserver>,
}

impl World {
    /// Create a new world with a random seed
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility.
    ///
    /// Fails fast on an invalid configuration; nothing is partially
    /// applied.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutation = MutationEngine::new(&config.mutation, config.cells.max_fitness)?;
        let mut grid = Grid::new(config.world.width, config.world.height);

        // Seed cells land at uniformly drawn sites; collisions
        // overwrite, so the realized count may be lower than requested.
        for _ in 0..config.world.initial_population {
            let spot = rng.gen_range(0..grid.capacity());
            grid.place(spot, Cell::with_fitness(config.cells.initial_fitness));
        }

        let stats_history = StatsHistory::new(config.logging.stats_interval);
        let active_mut_prob = config.mutation.mut_prob;

        let mut world = Self {
            grid,
            config,
            update: 0,
            stats: Stats::new(),
            stats_history,
            mutation,
            active_mut_prob,
            treated: false,
            last_birth: 0,
            rng,
            seed,
            births_this_step: 0,
            deaths_this_step: 0,
            observer: Box::new(NoopObserver),
        };

        world.stats.sample(&world.grid, 0);
        Ok(world)
    }

    /// Install a division observer, replacing the previous one
    pub fn set_observer(&mut self, observer: Box<dyn DivisionObserver>) {
        self.observer = observer;
    }

    /// Find an empty site in the Moore neighborhood of `source`.
    ///
    /// Enumeration is x-major, y-minor over the bounds-clamped 3x3
    /// block (no wraparound), and the winner is one uniform draw over
    /// the candidates. Both the order and the draw are load-bearing
    /// for seeded reproducibility. The source site itself never
    /// appears because it is occupied by the caller.
    fn find_division_target(&mut self, source: usize) -> Option<usize> {
        let width = self.grid.width();
        let height = self.grid.height();
        let (x, y) = self.grid.coords(source);

        let mut open_spots: Vec<usize> = Vec::with_capacity(8);
        for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                let site = self.grid.index(nx, ny);
                if !self.grid.is_occupied(site) {
                    open_spots.push(site);
                }
            }
        }

        if open_spots.is_empty() {
            return None;
        }
        Some(open_spots[self.rng.gen_range(0..open_spots.len())])
    }

    /// Division: two daughters, each independently mutated from the
    /// same parent snapshot, one at `target` and one replacing the
    /// parent at `source`.
    fn divide(&mut self, source: usize, target: usize, parent: &Cell) {
        assert!(
            target == source || !self.grid.is_occupied(target),
            "division from {} would overwrite occupied site {}",
            source,
            target
        );

        self.observer.before_division(source);
        let (daughter, _) = self.mutation.mutate(parent, self.active_mut_prob, &mut self.rng);
        self.observer.offspring_ready(&daughter, source);
        self.grid.place(target, daughter);

        self.observer.before_division(source);
        let (daughter, _) = self.mutation.mutate(parent, self.active_mut_prob, &mut self.rng);
        self.observer.offspring_ready(&daughter, source);
        self.grid.place(source, daughter);

        self.births_this_step += 1;
    }

    /// Apply death, division, mutation and quiescence to every site
    /// once, then advance the clock.
    pub fn step(&mut self) {
        // Treatment switch: one-way, checked against the pre-sweep
        // population, idempotent once triggered.
        if !self.treated && self.grid.count() >= self.config.treatment.start {
            self.active_mut_prob = self.config.treatment.mut_prob;
            self.treated = true;
            log::info!(
                "treatment triggered at update {} (population {})",
                self.update,
                self.grid.count()
            );
        }

        self.births_this_step = 0;
        self.deaths_this_step = 0;

        for site in 0..self.grid.capacity() {
            let Some(parent) = self.grid.get(site) else {
                // Empty sites consume no draws
                continue;
            };

            // Death before reproduction within the same sweep
            if self.rng.gen_bool(self.config.cells.death_prob) {
                self.grid.clear(site);
                self.deaths_this_step += 1;
                continue;
            }

            // The candidate draw happens before the division roll and
            // is consumed even when the roll then fails; reordering
            // would desynchronize seeded runs.
            let target = if self.config.world.spatial {
                self.find_division_target(site)
            } else {
                // Non-spatial stub: any empty capacity counts as room
                self.grid.first_open_site()
            };

            let divide_prob = (self.config.cells.fitness_mult * parent.fitness
                / self.config.cells.max_fitness)
                .clamp(0.0, 1.0);

            match target {
                Some(target) if self.rng.gen_bool(divide_prob) => {
                    self.divide(site, target, &parent);
                }
                _ => {
                    // Quiescence: the survivor is re-placed unchanged
                    self.grid.place(site, parent);
                }
            }
        }

        if self.births_this_step > 0 {
            self.last_birth = self.update;
        }
        self.update += 1;

        self.stats.births = self.births_this_step;
        self.stats.deaths = self.deaths_this_step;
        self.stats.sample(&self.grid, self.update);
        if self.update % self.stats_history.interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    fn check_termination(&self) -> Option<Outcome> {
        if self.grid.count() == 0 {
            return Some(Outcome::Extinction);
        }
        if self.update - self.last_birth > STAGNATION_WINDOW {
            return Some(Outcome::Stagnation);
        }
        if self.grid.count() >= self.grid.capacity() {
            return Some(Outcome::Saturation);
        }
        None
    }

    /// Run for up to the configured number of time steps
    pub fn run(&mut self) -> Outcome {
        self.run_with_callback(|_| {})
    }

    /// Run with a read-only per-step callback (recording, rendering)
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Outcome
    where
        F: FnMut(&World),
    {
        for _ in 0..self.config.run.time_steps {
            self.step();
            callback(self);

            if let Some(outcome) = self.check_termination() {
                log::info!("run stopped at update {}: {}", self.update, outcome);
                return outcome;
            }
        }

        log::info!("run stopped at update {}: budget exhausted", self.update);
        Outcome::BudgetExhausted
    }

    /// Current population count
    pub fn population(&self) -> usize {
        self.grid.count()
    }

    /// Check if population is extinct
    pub fn is_extinct(&self) -> bool {
        self.grid.count() == 0
    }

    /// Seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mutation probability currently in effect
    pub fn active_mutation_prob(&self) -> f64 {
        self.active_mut_prob
    }

    /// Update of the most recent division
    pub fn last_birth(&self) -> u64 {
        self.last_birth
    }
}

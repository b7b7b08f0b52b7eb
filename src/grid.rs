//! Array-backed population lattice with index-addressed occupancy.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// Fixed-size 2-D lattice of optional cells.
///
/// Sites are linearized as `index = y * width + x`. Each site holds at
/// most one cell. The grid is exclusively owned and written by the
/// world's step scheduler (and initialization); every other component
/// only reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    sites: Vec<Option<Cell>>,
    occupied: usize,
}

impl Grid {
    /// Create an empty grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            sites: vec![None; width * height],
            occupied: 0,
        }
    }

    /// Grid width in sites
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in sites
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of sites
    #[inline]
    pub fn capacity(&self) -> usize {
        self.sites.len()
    }

    /// Linear index of grid coordinates
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Grid coordinates of a linear index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Check whether a site holds a cell
    #[inline]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.sites[index].is_some()
    }

    /// Get the cell at a site, if occupied
    #[inline]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.sites[index]
    }

    /// Write a cell into a site unconditionally.
    ///
    /// Used for initialization, division targets, and quiescence
    /// re-insertion. The step scheduler guarantees that division never
    /// targets an occupied site other than the parent's own.
    #[inline]
    pub fn place(&mut self, index: usize, cell: Cell) {
        if self.sites[index].is_none() {
            self.occupied += 1;
        }
        self.sites[index] = Some(cell);
    }

    /// Empty a site
    #[inline]
    pub fn clear(&mut self, index: usize) {
        if self.sites[index].take().is_some() {
            self.occupied -= 1;
        }
    }

    /// Number of occupied sites
    #[inline]
    pub fn count(&self) -> usize {
        self.occupied
    }

    /// Read-only view of every site, for statistics and rendering
    #[inline]
    pub fn cells(&self) -> &[Option<Cell>] {
        &self.sites
    }

    /// Iterate over occupied sites as `(index, cell)`
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, &Cell)> + '_ {
        self.sites
            .iter()
            .enumerate()
            .filter_map(|(i, site)| site.as_ref().map(|cell| (i, cell)))
    }

    /// Lowest-index empty site, if any
    pub fn first_open_site(&self) -> Option<usize> {
        self.sites.iter().position(|site| site.is_none())
    }
}

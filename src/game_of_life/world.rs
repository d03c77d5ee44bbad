//! World representation and utilities for Game of Life

use anyhow::Result;
use itertools::Itertools;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Relative coordinates of the Moore neighborhood, `(dx, dy)`
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A fixed-size grid of live and dead cells
///
/// Cells are addressed as `(x, y)` and stored row-major. The dimensions never
/// change after construction; a step produces a new `World` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct World {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl World {
    /// Create a new all-dead world
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a world where every cell is independently alive with probability `density`
    pub fn random<R: Rng>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let cells = (0..width * height)
            .map(|_| rng.random::<f64>() < density)
            .collect();

        Self { width, height, cells }
    }

    /// Create a world from rows of cells
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a world from an already flattened cell buffer
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get cell value at coordinates, out of bounds cells are dead
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) && self.cells[self.index(x, y)]
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        if !self.contains(x, y) {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} world",
                x, y, self.width, self.height
            );
        }
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Set a cell whose coordinates the caller has already checked
    ///
    /// Panics when `(x, y)` is outside the world.
    pub(crate) fn put(&mut self, x: usize, y: usize, alive: bool) {
        assert!(
            self.contains(x, y),
            "({}, {}) outside {}x{} world",
            x, y, self.width, self.height
        );
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    /// Count the live cells among the in-bounds Moore neighbors of `(x, y)`
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                self.contains(nx, ny).then(|| self.cells[self.index(nx, ny)])
            })
            .filter(|&alive| alive)
            .count() as u8
    }

    /// All living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .cartesian_product(0..self.width)
            .filter(|&(y, x)| self.get(x, y))
            .map(|(y, x)| (x, y))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Copy `pattern` into this world with its top-left corner at `(left, top)`
    pub fn stamp(&mut self, pattern: &World, left: usize, top: usize) -> Result<()> {
        if left + pattern.width > self.width || top + pattern.height > self.height {
            anyhow::bail!(
                "{}x{} pattern at ({}, {}) does not fit in {}x{} world",
                pattern.width, pattern.height, left, top, self.width, self.height
            );
        }

        for (x, y) in (0..pattern.width).cartesian_product(0..pattern.height) {
            let idx = self.index(left + x, top + y);
            self.cells[idx] = pattern.get(x, y);
        }
        Ok(())
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = if self.get(x, y) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Random obstacle grids and endpoint sampling.

use gridmapf_core::{Cell, Grid, Tile};
use log::debug;
use rand::Rng;

use crate::error::GenError;

/// Generator for random grids and agent endpoints.
pub struct GridGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> GridGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `rows × cols` grid where each cell is independently
    /// blocked with probability `obstacle_prob`.
    ///
    /// The probability is clamped to `[0, 1]`; NaN counts as 0.
    pub fn random_grid(&mut self, rows: i32, cols: i32, obstacle_prob: f64) -> Grid {
        let p = if obstacle_prob.is_nan() {
            0.0
        } else {
            obstacle_prob.clamp(0.0, 1.0)
        };
        let len = rows.max(0) as usize * cols.max(0) as usize;
        let tiles = (0..len)
            .map(|_| Tile::from(!self.rng.random_bool(p)))
            .collect();
        let grid = Grid::from_tiles(rows, cols, tiles);
        debug!(
            "generated {} grid with {} traversable cells",
            grid.bounds(),
            grid.traversable_count()
        );
        grid
    }

    /// Pick `n` traversable cells uniformly at random. The same cell may be
    /// picked more than once.
    pub fn sample_points(&mut self, grid: &Grid, n: usize) -> Result<Vec<Cell>, GenError> {
        let free = free_cells(grid);
        if free.is_empty() {
            return Err(GenError::NoTraversableCells);
        }
        Ok((0..n)
            .map(|_| free[self.rng.random_range(0..free.len())])
            .collect())
    }

    /// Pick `n` distinct traversable cells uniformly at random.
    pub fn sample_distinct_points(
        &mut self,
        grid: &Grid,
        n: usize,
    ) -> Result<Vec<Cell>, GenError> {
        let mut free = free_cells(grid);
        if free.is_empty() {
            return Err(GenError::NoTraversableCells);
        }
        if n > free.len() {
            return Err(GenError::NotEnoughCells {
                requested: n,
                available: free.len(),
            });
        }
        // Partial Fisher-Yates: the first `n` slots end up as the sample.
        for i in 0..n {
            let j = self.rng.random_range(i..free.len());
            free.swap(i, j);
        }
        free.truncate(n);
        Ok(free)
    }

    /// Sample `n` `(start, end)` pairs: all starts first, then all ends.
    ///
    /// Starts are distinct, since two agents cannot share a cell at time 0.
    /// Ends may repeat and may coincide with starts.
    pub fn sample_pairs(&mut self, grid: &Grid, n: usize) -> Result<Vec<(Cell, Cell)>, GenError> {
        let starts = self.sample_distinct_points(grid, n)?;
        let ends = self.sample_points(grid, n)?;
        Ok(starts.into_iter().zip(ends).collect())
    }
}

fn free_cells(grid: &Grid) -> Vec<Cell> {
    grid.iter()
        .filter(|&(_, t)| t == Tile::Traversable)
        .map(|(c, _)| c)
        .collect()
}

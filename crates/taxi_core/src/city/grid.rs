//! Street grid layout: two strictly increasing sequences of row and
//! column lines in grid units. Every other piece of city geometry is
//! expressed against these lines.

use rand::Rng;

/// Gap between consecutive street lines, in cells (inclusive range).
pub const MIN_LINE_STEP: i32 = 3;
pub const MAX_LINE_STEP: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: Vec<i32>,
    pub cols: Vec<i32>,
}

impl GridLayout {
    /// Generates `grid_size` lines per axis, starting at 0 and stepping
    /// by a uniform random amount in [MIN_LINE_STEP, MAX_LINE_STEP].
    pub fn generate<R: Rng>(grid_size: usize, rng: &mut R) -> Self {
        let mut rows = Vec::with_capacity(grid_size);
        let mut cols = Vec::with_capacity(grid_size);
        rows.push(0);
        cols.push(0);
        while rows.len() < grid_size {
            rows.push(rows[rows.len() - 1] + rng.gen_range(MIN_LINE_STEP..=MAX_LINE_STEP));
            cols.push(cols[cols.len() - 1] + rng.gen_range(MIN_LINE_STEP..=MAX_LINE_STEP));
        }
        Self { rows, cols }
    }

    pub fn last_row(&self) -> i32 {
        *self.rows.last().unwrap_or(&0)
    }

    pub fn last_col(&self) -> i32 {
        *self.cols.last().unwrap_or(&0)
    }
}

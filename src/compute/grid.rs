//! Grid store: one contiguous row-major block with a halo border.
//!
//! Rows are contiguous so that any row can be handed to the message layer
//! or the stencil kernel as a single slice. Row/column 0 and `n+1` form the
//! border: global-boundary cells are fixed at [`BOUNDARY_VALUE`] and never
//! written after initialization; in the distributed variant the top and
//! bottom border rows of a strip double as halo slots for neighbor data.

use std::fmt;

/// Fixed value of every global-boundary cell.
pub const BOUNDARY_VALUE: f64 = 1.0;

/// Two-dimensional cell array, `rows × cols`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Allocate a zeroed `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::Allocation { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self { data, rows, cols })
    }

    /// Allocate the `(gridsize + 2)²` Laplace domain: border cells at
    /// [`BOUNDARY_VALUE`], interior at 0.0.
    pub fn with_boundary(gridsize: usize) -> Result<Self, GridError> {
        let n = gridsize + 2;
        let mut grid = Self::new(n, n)?;
        grid.row_mut(0).fill(BOUNDARY_VALUE);
        grid.row_mut(n - 1).fill(BOUNDARY_VALUE);
        for i in 1..n - 1 {
            grid.set(i, 0, BOUNDARY_VALUE);
            grid.set(i, n - 1, BOUNDARY_VALUE);
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Interior row count (total minus the two border rows).
    #[inline]
    pub fn interior_rows(&self) -> usize {
        self.rows - 2
    }

    /// Interior column count (total minus the two border columns).
    #[inline]
    pub fn interior_cols(&self) -> usize {
        self.cols - 2
    }

    /// Flat index of cell `(i, j)`.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.idx(i, j);
        self.data[idx] = value;
    }

    /// Contiguous view of row `i`. Panics if `i` is out of range.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutable contiguous view of row `i`. Panics if `i` is out of range.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f64 {
        self.data.as_mut_ptr()
    }

    pub(crate) fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub(crate) fn from_data(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Maximum absolute cell difference against another grid of the same
    /// shape.
    pub fn max_abs_diff(&self, other: &Grid) -> f64 {
        assert_eq!(self.rows, other.rows);
        assert_eq!(self.cols, other.cols);
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for (j, value) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Grid allocation errors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Cannot allocate {rows}x{cols} grid")]
    Allocation { rows: usize, cols: usize },
}

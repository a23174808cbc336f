//! Shared grid arena and per-worker strip views.
//!
//! The shared-memory variant keeps all rows in one allocation and gives
//! each thread write access to a contiguous band of interior rows through
//! a [`StripMut`] view. A view can write only its own rows, so a write
//! outside the owned strip is unrepresentable in the API rather than a
//! runtime race to hunt down.
//!
//! # Soundness
//!
//! During one color phase, a view writes only cells of the active color
//! inside its owned rows and reads only opposite-color cells from its rows
//! and the two halo rows. Checkerboard parity keeps those sets disjoint at
//! cell granularity, including across strip edges, where one worker's halo
//! read of row `r` touches exactly the cells its neighbor is *not* writing.
//! Phases are separated by [`SpinBarrier::wait`](super::SpinBarrier::wait),
//! whose release/acquire pairs order each phase's writes before the next
//! phase's reads. All cross-thread element access goes through raw pointers
//! derived from `UnsafeCell` slots; no `&mut` to overlapping regions is
//! ever formed.

use std::cell::UnsafeCell;

use super::grid::Grid;
use super::stencil::{self, Color};

/// The single shared allocation behind all strip views.
pub struct SharedGrid {
    data: Vec<UnsafeCell<f64>>,
    rows: usize,
    cols: usize,
}

// SAFETY: concurrent access is restricted by the StripMut API to disjoint
// cells per phase; see the module-level soundness notes.
unsafe impl Sync for SharedGrid {}

impl SharedGrid {
    /// Move an initialized grid into the arena.
    pub fn new(grid: Grid) -> Self {
        let rows = grid.rows();
        let cols = grid.cols();
        let data = grid.into_data().into_iter().map(UnsafeCell::new).collect();
        Self { data, rows, cols }
    }

    #[inline]
    fn base(&self) -> *mut f64 {
        // UnsafeCell<f64> is repr(transparent); the pointer covers the
        // whole contiguous slice.
        self.data.as_ptr() as *mut f64
    }

    /// Split the interior rows into `workers` equal strips, in row order.
    ///
    /// Panics unless the interior height divides evenly; callers validate
    /// through [`RunConfig`](crate::schema::RunConfig) first.
    pub fn strips(&self, workers: usize) -> Vec<StripMut<'_>> {
        let interior = self.rows - 2;
        assert!(workers > 0 && interior % workers == 0);
        let height = interior / workers;
        (0..workers)
            .map(|w| StripMut {
                arena: self,
                first_row: w * height + 1,
                last_row: w * height + height,
            })
            .collect()
    }

    /// Recover the grid once every view is dropped (workers joined).
    pub fn into_grid(self) -> Grid {
        let data = self.data.into_iter().map(UnsafeCell::into_inner).collect();
        Grid::from_data(data, self.rows, self.cols)
    }
}

/// Write view over one strip of interior rows, plus read access to the two
/// adjacent halo rows.
///
/// Row indices are global: the arena is the whole grid, so local and global
/// coordinates coincide and the checkerboard parity needs no offset.
pub struct StripMut<'a> {
    arena: &'a SharedGrid,
    first_row: usize,
    last_row: usize,
}

impl StripMut<'_> {
    #[inline]
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    #[inline]
    pub fn last_row(&self) -> usize {
        self.last_row
    }

    /// Apply one color pass to the owned rows.
    ///
    /// The caller must separate passes of opposite colors with a barrier;
    /// within one color phase any set of strips may run concurrently.
    pub fn sweep(&mut self, color: Color) {
        let cols = self.arena.cols;
        let base = self.arena.base();
        for i in self.first_row..=self.last_row {
            let jstart = stencil::color_offset(i, color);
            // SAFETY: rows first_row-1..=last_row+1 are in bounds (strips
            // cover interior rows only); written cells are `color` cells of
            // an exclusively owned row, read cells are opposite-color and
            // not written by any view this phase.
            unsafe {
                stencil::relax_span(
                    base.add(i * cols),
                    base.add((i - 1) * cols),
                    base.add((i + 1) * cols),
                    cols,
                    jstart,
                );
            }
        }
    }

    /// Probe-pass variant of [`sweep`](Self::sweep): returns the largest
    /// per-cell change in the owned rows.
    pub fn sweep_measure(&mut self, color: Color) -> f64 {
        let cols = self.arena.cols;
        let base = self.arena.base();
        let mut max_diff = 0.0f64;
        for i in self.first_row..=self.last_row {
            let jstart = stencil::color_offset(i, color);
            // SAFETY: as in `sweep`.
            let row_diff = unsafe {
                stencil::relax_span_measure(
                    base.add(i * cols),
                    base.add((i - 1) * cols),
                    base.add((i + 1) * cols),
                    cols,
                    jstart,
                )
            };
            max_diff = max_diff.max(row_diff);
        }
        max_diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_single_strip_matches_plain_sweep() {
        let mut reference = Grid::with_boundary(6).unwrap();
        stencil::sweep(&mut reference, Color::Red, 1, 6, 0);

        let shared = SharedGrid::new(Grid::with_boundary(6).unwrap());
        let mut strips = shared.strips(1);
        strips[0].sweep(Color::Red);
        drop(strips);

        assert_eq!(shared.into_grid(), reference);
    }

    #[test]
    fn test_strip_ranges_cover_interior() {
        let shared = SharedGrid::new(Grid::with_boundary(8).unwrap());
        let strips = shared.strips(4);
        assert_eq!(strips.len(), 4);
        assert_eq!(strips[0].first_row(), 1);
        assert_eq!(strips[0].last_row(), 2);
        assert_eq!(strips[3].first_row(), 7);
        assert_eq!(strips[3].last_row(), 8);
    }

    #[test]
    fn test_concurrent_color_pass_matches_sequential() {
        let mut reference = Grid::with_boundary(8).unwrap();
        stencil::sweep(&mut reference, Color::Red, 1, 8, 0);

        let shared = SharedGrid::new(Grid::with_boundary(8).unwrap());
        let strips = shared.strips(4);
        thread::scope(|scope| {
            for mut strip in strips {
                scope.spawn(move || strip.sweep(Color::Red));
            }
        });

        assert_eq!(shared.into_grid(), reference);
    }

    #[test]
    fn test_measure_folds_across_strips() {
        let mut reference = Grid::with_boundary(8).unwrap();
        let expected = stencil::sweep_measure(&mut reference, Color::Red, 1, 8, 0);

        let shared = SharedGrid::new(Grid::with_boundary(8).unwrap());
        let mut strips = shared.strips(2);
        let diff = strips
            .iter_mut()
            .map(|strip| strip.sweep_measure(Color::Red))
            .fold(0.0, f64::max);
        assert_eq!(diff, expected);
    }
}

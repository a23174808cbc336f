//! Five-point stencil kernel over one color class.
//!
//! Cells are partitioned checkerboard-style: red where `row + col` is even,
//! black where it is odd. Within one color no two cells are neighbors, so a
//! full color pass only reads the other color and can run in any order, or
//! split across workers, as long as the opposite color is not being written
//! concurrently. That phase separation is the caller's job (barrier or halo
//! exchange); the kernel performs no checking.

use super::grid::Grid;

/// Checkerboard color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// First interior column of `color` in `global_row`.
///
/// The checkerboard is anchored at global grid coordinates. Strip-local row
/// indices must never reach this function: a strip whose first global row is
/// even would flip the parity of every cell it owns.
#[inline]
pub fn color_offset(global_row: usize, color: Color) -> usize {
    match color {
        Color::Red => 2 - (global_row & 1),
        Color::Black => 1 + (global_row & 1),
    }
}

/// Relax one color class of one row in place.
///
/// `cur` is the row being updated; `up` and `down` are its vertical
/// neighbors. Columns `jstart`, `jstart + 2`, and so on up to `cols - 2`
/// are written; their left/right neighbors are read from `cur` itself.
///
/// # Safety
///
/// All three pointers must address rows of at least `cols` elements that
/// stay valid for the whole call. The written cells must not be read or
/// written by any other thread for the duration of the call; the cells read
/// (opposite color) must not be written by any other thread.
#[inline]
pub(crate) unsafe fn relax_span(
    cur: *mut f64,
    up: *const f64,
    down: *const f64,
    cols: usize,
    jstart: usize,
) {
    let mut j = jstart;
    while j < cols - 1 {
        unsafe {
            *cur.add(j) =
                0.25 * (*up.add(j) + *down.add(j) + *cur.add(j - 1) + *cur.add(j + 1));
        }
        j += 2;
    }
}

/// [`relax_span`] that also returns the largest `|old - new|` it produced.
///
/// # Safety
///
/// Same contract as [`relax_span`].
#[inline]
pub(crate) unsafe fn relax_span_measure(
    cur: *mut f64,
    up: *const f64,
    down: *const f64,
    cols: usize,
    jstart: usize,
) -> f64 {
    let mut max_diff = 0.0f64;
    let mut j = jstart;
    while j < cols - 1 {
        unsafe {
            let old = *cur.add(j);
            let new =
                0.25 * (*up.add(j) + *down.add(j) + *cur.add(j - 1) + *cur.add(j + 1));
            *cur.add(j) = new;
            max_diff = max_diff.max((old - new).abs());
        }
        j += 2;
    }
    max_diff
}

/// Apply one color pass to rows `first_row..=last_row` of `grid`.
///
/// Row indices are local to `grid`; `global_row_offset` is what must be
/// added to a local row index to obtain the global one (0 except for
/// distributed strips). The range must lie strictly inside the border:
/// halo rows are read, never written.
pub fn sweep(
    grid: &mut Grid,
    color: Color,
    first_row: usize,
    last_row: usize,
    global_row_offset: usize,
) {
    assert!(first_row >= 1, "sweep must not write the top halo row");
    assert!(
        last_row <= grid.rows() - 2,
        "sweep must not write the bottom halo row"
    );
    let cols = grid.cols();
    let base = grid.as_mut_ptr();
    for i in first_row..=last_row {
        let jstart = color_offset(global_row_offset + i, color);
        // SAFETY: rows i-1, i, i+1 are in bounds by the asserts above, and
        // `&mut Grid` gives this call exclusive access to the whole array.
        unsafe {
            relax_span(
                base.add(i * cols),
                base.add((i - 1) * cols),
                base.add((i + 1) * cols),
                cols,
                jstart,
            );
        }
    }
}

/// [`sweep`] for the probe pass: returns the largest per-cell change.
pub fn sweep_measure(
    grid: &mut Grid,
    color: Color,
    first_row: usize,
    last_row: usize,
    global_row_offset: usize,
) -> f64 {
    assert!(first_row >= 1, "sweep must not write the top halo row");
    assert!(
        last_row <= grid.rows() - 2,
        "sweep must not write the bottom halo row"
    );
    let cols = grid.cols();
    let base = grid.as_mut_ptr();
    let mut max_diff = 0.0f64;
    for i in first_row..=last_row {
        let jstart = color_offset(global_row_offset + i, color);
        // SAFETY: as in `sweep`.
        let row_diff = unsafe {
            relax_span_measure(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::BOUNDARY_VALUE;

    #[test]
    fn test_color_offset_parity() {
        // Red cells sit where row + col is even; first interior column is 1.
        assert_eq!(color_offset(1, Color::Red), 1);
        assert_eq!(color_offset(2, Color::Red), 2);
        assert_eq!(color_offset(3, Color::Red), 1);
        assert_eq!(color_offset(1, Color::Black), 2);
        assert_eq!(color_offset(2, Color::Black), 1);
        assert_eq!(color_offset(3, Color::Black), 2);
    }

    #[test]
    fn test_red_pass_on_fresh_grid() {
        let mut grid = Grid::with_boundary(4).unwrap();
        sweep(&mut grid, Color::Red, 1, 4, 0);

        // Hand-computed from the all-zero interior, border 1.0.
        assert_eq!(grid.get(1, 1), 0.5);
        assert_eq!(grid.get(1, 3), 0.25);
        assert_eq!(grid.get(2, 2), 0.0);
        assert_eq!(grid.get(2, 4), 0.25);
        assert_eq!(grid.get(3, 1), 0.25);
        assert_eq!(grid.get(3, 3), 0.0);
        assert_eq!(grid.get(4, 2), 0.25);
        assert_eq!(grid.get(4, 4), 0.5);

        // Black cells untouched by the red pass.
        assert_eq!(grid.get(1, 2), 0.0);
        assert_eq!(grid.get(2, 1), 0.0);
    }

    #[test]
    fn test_black_pass_reads_updated_red() {
        let mut grid = Grid::with_boundary(4).unwrap();
        sweep(&mut grid, Color::Red, 1, 4, 0);
        sweep(&mut grid, Color::Black, 1, 4, 0);

        // (1,2) averages the just-updated red neighbors (1,1) = 0.5 and
        // (1,3) = 0.25 with the boundary above.
        assert_eq!(grid.get(1, 2), 0.4375);
        assert_eq!(grid.get(1, 4), 0.625);
        assert_eq!(grid.get(2, 1), 0.4375);
        assert_eq!(grid.get(2, 3), 0.125);
        assert_eq!(grid.get(3, 2), 0.125);
        assert_eq!(grid.get(3, 4), 0.4375);
        assert_eq!(grid.get(4, 1), 0.625);
        assert_eq!(grid.get(4, 3), 0.4375);
    }

    #[test]
    fn test_sweep_preserves_boundary() {
        let mut grid = Grid::with_boundary(6).unwrap();
        for _ in 0..3 {
            sweep(&mut grid, Color::Red, 1, 6, 0);
            sweep(&mut grid, Color::Black, 1, 6, 0);
        }
        let n = grid.rows();
        for k in 0..n {
            assert_eq!(grid.get(0, k), BOUNDARY_VALUE);
            assert_eq!(grid.get(n - 1, k), BOUNDARY_VALUE);
            assert_eq!(grid.get(k, 0), BOUNDARY_VALUE);
            assert_eq!(grid.get(k, n - 1), BOUNDARY_VALUE);
        }
    }

    #[test]
    fn test_split_ranges_match_full_sweep() {
        // Within one color pass, cells only read the other color, so the
        // row range may be partitioned arbitrarily.
        let mut whole = Grid::with_boundary(8).unwrap();
        let mut split = Grid::with_boundary(8).unwrap();
        sweep(&mut whole, Color::Red, 1, 8, 0);
        sweep(&mut split, Color::Red, 5, 8, 0);
        sweep(&mut split, Color::Red, 1, 4, 0);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_global_row_offset_anchors_parity() {
        // A strip holding global rows 3..=4 must produce the same cells as
        // the corresponding rows of the full grid, even though its local
        // rows are 1..=2.
        let mut full = Grid::with_boundary(4).unwrap();
        sweep(&mut full, Color::Red, 1, 4, 0);

        let mut strip = Grid::new(4, 6).unwrap();
        let reference = Grid::with_boundary(4).unwrap();
        for local in 0..4 {
            strip.row_mut(local).copy_from_slice(reference.row(local + 2));
        }
        sweep(&mut strip, Color::Red, 1, 2, 2);

        assert_eq!(strip.row(1), full.row(3));
        assert_eq!(strip.row(2), full.row(4));
    }

    #[test]
    fn test_measure_reports_largest_change() {
        let mut grid = Grid::with_boundary(4).unwrap();
        let diff = sweep_measure(&mut grid, Color::Red, 1, 4, 0);
        // The corner cell (1,1) moves from 0.0 to 0.5, the largest change.
        assert_eq!(diff, 0.5);
    }

    #[test]
    fn test_measure_zero_at_fixed_point() {
        // A uniform grid equals the average of its neighbors everywhere.
        let mut grid = Grid::new(6, 6).unwrap();
        for i in 0..6 {
            grid.row_mut(i).fill(1.0);
        }
        let red = sweep_measure(&mut grid, Color::Red, 1, 4, 0);
        let black = sweep_measure(&mut grid, Color::Black, 1, 4, 0);
        assert_eq!(red, 0.0);
        assert_eq!(black, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_sweep_rejects_halo_row() {
        let mut grid = Grid::with_boundary(4).unwrap();
        sweep(&mut grid, Color::Red, 0, 4, 0);
    }
}

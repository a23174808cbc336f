//! Sequential driver: the reference execution model.

use std::time::Instant;

use crate::schema::RunConfig;

use super::grid::Grid;
use super::solution::{Solution, SolveError};
use super::stencil::{self, Color};

/// Run the full relaxation in program order on the calling thread.
///
/// Each iteration is one red pass followed by one black pass over every
/// interior row; one extra measured red+black pass after the loop yields
/// the convergence scalar. The other two drivers must reproduce this
/// result exactly for any valid partition.
pub fn solve_sequential(config: &RunConfig) -> Result<Solution, SolveError> {
    config.validate()?;

    let start = Instant::now();
    let mut grid = Grid::with_boundary(config.gridsize)?;
    let (first_row, last_row) = (1, config.gridsize);

    for _ in 0..config.iterations {
        stencil::sweep(&mut grid, Color::Red, first_row, last_row, 0);
        stencil::sweep(&mut grid, Color::Black, first_row, last_row, 0);
    }

    // Probe: one more iteration, measuring how much the grid still moves.
    let mut max_diff = stencil::sweep_measure(&mut grid, Color::Red, first_row, last_row, 0);
    max_diff = max_diff.max(stencil::sweep_measure(
        &mut grid,
        Color::Black,
        first_row,
        last_row,
        0,
    ));

    let elapsed = start.elapsed();
    log::debug!(
        "sequential solve: gridsize={} iterations={} max_diff={:.3e} in {:?}",
        config.gridsize,
        config.iterations,
        max_diff,
        elapsed
    );

    Ok(Solution {
        grid,
        max_diff,
        elapsed,
    })
}

//! Shared-memory driver: one thread per row strip, synchronized by the
//! dissemination barrier.
//!
//! No lock guards any cell. Correctness rests entirely on phase
//! separation: every thread reaches the barrier between the red and black
//! passes (and between iterations) before any thread reads across a strip
//! boundary for the next phase.

use std::thread;
use std::time::Instant;

use crate::schema::RunConfig;

use super::arena::SharedGrid;
use super::barrier::SpinBarrier;
use super::grid::Grid;
use super::solution::{Solution, SolveError};
use super::stencil::Color;

/// Run the relaxation on a fixed pool of `config.workers` threads.
///
/// Each thread is bound to one strip for its whole lifetime. Lifecycle per
/// thread: one barrier round after initialization, then per iteration
/// {red pass, barrier, black pass, barrier}, then the measured probe pass
/// with a barrier between its two halves. The local probe maxima travel
/// back through the join handles and are max-folded by the driver.
pub fn solve_threaded(config: &RunConfig) -> Result<Solution, SolveError> {
    config.validate()?;

    let start = Instant::now();
    let shared = SharedGrid::new(Grid::with_boundary(config.gridsize)?);
    let barrier = SpinBarrier::new(config.workers);
    let iterations = config.iterations;

    let max_diff = thread::scope(|scope| {
        let handles: Vec<_> = shared
            .strips(config.workers)
            .into_iter()
            .enumerate()
            .map(|(id, mut strip)| {
                let barrier = &barrier;
                scope.spawn(move || {
                    log::debug!(
                        "worker {id} owns rows {}..={}",
                        strip.first_row(),
                        strip.last_row()
                    );

                    // Every strip must be initialized before the first
                    // pass reads across a boundary.
                    barrier.wait(id);

                    for _ in 0..iterations {
                        strip.sweep(Color::Red);
                        barrier.wait(id);
                        strip.sweep(Color::Black);
                        barrier.wait(id);
                    }

                    let mut local = strip.sweep_measure(Color::Red);
                    barrier.wait(id);
                    local = local.max(strip.sweep_measure(Color::Black));
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .fold(0.0, f64::max)
    });

    let elapsed = start.elapsed();
    log::debug!(
        "threaded solve: gridsize={} iterations={} workers={} max_diff={:.3e} in {:?}",
        config.gridsize,
        config.iterations,
        config.workers,
        max_diff,
        elapsed
    );

    Ok(Solution {
        grid: shared.into_grid(),
        max_diff,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::BOUNDARY_VALUE;
    use crate::compute::sequential::solve_sequential;

    fn config(gridsize: usize, iterations: usize, workers: usize) -> RunConfig {
        RunConfig {
            gridsize,
            iterations,
            workers,
        }
    }

    #[test]
    fn test_matches_sequential() {
        for workers in [1, 2, 4] {
            for iterations in [0, 1, 10] {
                let reference = solve_sequential(&config(8, iterations, 1)).unwrap();
                let threaded = solve_threaded(&config(8, iterations, workers)).unwrap();
                assert_eq!(
                    threaded.grid, reference.grid,
                    "workers={workers} iterations={iterations}"
                );
                assert_eq!(threaded.max_diff, reference.max_diff);
            }
        }
    }

    #[test]
    fn test_odd_strip_height_keeps_checkerboard() {
        // 6 rows over 2 workers puts the second strip's first row at an
        // even global index; parity must stay anchored to the global grid.
        let reference = solve_sequential(&config(6, 3, 1)).unwrap();
        let threaded = solve_threaded(&config(6, 3, 2)).unwrap();
        assert_eq!(threaded.grid, reference.grid);
        assert_eq!(threaded.max_diff, reference.max_diff);
    }

    #[test]
    fn test_boundary_never_mutated() {
        let solution = solve_threaded(&config(8, 12, 4)).unwrap();
        let n = solution.grid.rows();
        for k in 0..n {
            assert_eq!(solution.grid.get(0, k), BOUNDARY_VALUE);
            assert_eq!(solution.grid.get(n - 1, k), BOUNDARY_VALUE);
            assert_eq!(solution.grid.get(k, 0), BOUNDARY_VALUE);
            assert_eq!(solution.grid.get(k, n - 1), BOUNDARY_VALUE);
        }
    }

    #[test]
    fn test_rejects_uneven_partition() {
        assert!(matches!(
            solve_threaded(&config(10, 1, 4)),
            Err(SolveError::Config(_))
        ));
    }
}

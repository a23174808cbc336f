//! Distributed driver: one MPI rank per row strip, synchronized by
//! halo-row message exchange.
//!
//! No memory is shared. Each rank owns a `(strip + 2) × (gridsize + 2)`
//! local grid whose first and last rows are halo slots, written only by the
//! exchange with the numerically adjacent ranks (or fixed boundary rows on
//! the edge ranks). The exchange after every color pass is the distributed
//! analogue of the barrier: it must complete before the next pass reads a
//! halo row.

use std::time::Duration;

use mpi::collective::SystemOperation;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use crate::schema::RunConfig;

use super::grid::{BOUNDARY_VALUE, Grid};
use super::solution::{Solution, SolveError};
use super::stencil::{self, Color};

/// Run this rank's share of the relaxation.
///
/// The worker count is the world size. On an invalid configuration every
/// rank is aborted: a surviving rank would hang in its first exchange
/// against a peer that already exited. On return, `max_diff` holds the
/// globally reduced maximum on rank 0 and the local maximum elsewhere;
/// only rank 0 should report.
pub fn solve_distributed(
    world: &SimpleCommunicator,
    gridsize: usize,
    iterations: usize,
) -> Result<Solution, SolveError> {
    let rank = world.rank() as usize;
    let ranks = world.size() as usize;

    let config = RunConfig {
        gridsize,
        iterations,
        workers: ranks,
    };
    if let Err(err) = config.validate() {
        if rank == 0 {
            eprintln!("rbgrid-mpi: {err}");
        }
        world.abort(2);
    }

    let start = mpi::time();
    let strip = config.strip_height();
    let mut grid = init_strip(gridsize, strip, rank, ranks)?;
    // Local row 1 is global row rank * strip + 1; the checkerboard parity
    // is anchored at global coordinates.
    let global_offset = rank * strip;

    // Every strip must be initialized before the first pass reads a halo
    // row; the exchange doubles as the startup rendezvous.
    exchange_rows(world, &mut grid, rank, ranks);

    for _ in 0..iterations {
        stencil::sweep(&mut grid, Color::Red, 1, strip, global_offset);
        exchange_rows(world, &mut grid, rank, ranks);
        stencil::sweep(&mut grid, Color::Black, 1, strip, global_offset);
        exchange_rows(world, &mut grid, rank, ranks);
    }

    let mut local = stencil::sweep_measure(&mut grid, Color::Red, 1, strip, global_offset);
    exchange_rows(world, &mut grid, rank, ranks);
    local = local.max(stencil::sweep_measure(
        &mut grid,
        Color::Black,
        1,
        strip,
        global_offset,
    ));

    let root = world.process_at_rank(0);
    let max_diff = if rank == 0 {
        let mut global = 0.0f64;
        root.reduce_into_root(&local, &mut global, SystemOperation::max());
        global
    } else {
        root.reduce_into(&local, SystemOperation::max());
        local
    };

    let elapsed = Duration::from_secs_f64(mpi::time() - start);
    if gridsize <= 10 {
        log::debug!("rank {rank} final strip:\n{grid}");
    }

    Ok(Solution {
        grid,
        max_diff,
        elapsed,
    })
}

/// Allocate and initialize one rank's local strip.
///
/// Side columns are global boundary everywhere; the top halo row of rank 0
/// and the bottom halo row of the last rank are global boundary rows and
/// are never exchanged.
fn init_strip(gridsize: usize, strip: usize, rank: usize, ranks: usize) -> Result<Grid, SolveError> {
    let mut grid = Grid::new(strip + 2, gridsize + 2)?;
    for i in 0..strip + 2 {
        let row = grid.row_mut(i);
        row[0] = BOUNDARY_VALUE;
        row[gridsize + 1] = BOUNDARY_VALUE;
    }
    if rank == 0 {
        grid.row_mut(0).fill(BOUNDARY_VALUE);
    }
    if rank == ranks - 1 {
        grid.row_mut(strip + 1).fill(BOUNDARY_VALUE);
    }
    Ok(grid)
}

/// Make this rank's edge rows visible to its row neighbors and refresh the
/// local halo rows from theirs.
///
/// Sends are initiated non-blocking, then both receives run blocking, then
/// the outstanding sends are awaited. Symmetric blocking sends would
/// deadlock once a row outgrows the transport's internal buffering: every
/// rank stuck in its send, waiting on a receive its peer never posts.
fn exchange_rows(world: &SimpleCommunicator, grid: &mut Grid, rank: usize, ranks: usize) {
    let bottom_row = grid.rows() - 2;
    let send_up = grid.row(1).to_vec();
    let send_down = grid.row(bottom_row).to_vec();

    mpi::request::scope(|scope| {
        let up = (rank > 0).then(|| {
            world
                .process_at_rank(rank as i32 - 1)
                .immediate_send(scope, &send_up[..])
        });
        let down = (rank + 1 < ranks).then(|| {
            world
                .process_at_rank(rank as i32 + 1)
                .immediate_send(scope, &send_down[..])
        });

        if rank > 0 {
            world
                .process_at_rank(rank as i32 - 1)
                .receive_into(grid.row_mut(0));
        }
        if rank + 1 < ranks {
            world
                .process_at_rank(rank as i32 + 1)
                .receive_into(grid.row_mut(bottom_row + 1));
        }

        if let Some(request) = up {
            request.wait_without_status();
        }
        if let Some(request) = down {
            request.wait_without_status();
        }
    });
}

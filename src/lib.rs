//! Red/black checkerboard relaxation for Laplace boundary value problems.
//!
//! Every interior cell of a square grid is repeatedly replaced by the
//! average of its four neighbors. Cells are split into "red" and "black"
//! checkerboard classes updated in two sub-passes per iteration: within one
//! color no two cells are neighbors, so a whole color pass depends only on
//! the other color's most recent values and parallelizes freely.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: run configuration and validation
//! - `compute`: the grid store, stencil kernel, synchronization primitives
//!   and the three execution drivers (sequential, threaded, distributed)
//!
//! The shared-memory driver partitions the grid into row strips, one thread
//! each, separated by a custom dissemination barrier. The distributed
//! driver (cargo feature `distributed`, needs an MPI installation) gives
//! each rank a private strip and exchanges halo rows between passes.
//!
//! # Example
//!
//! ```rust
//! use rbgrid::{RunConfig, solve_sequential};
//!
//! let config = RunConfig {
//!     gridsize: 8,
//!     iterations: 50,
//!     workers: 1,
//! };
//! let solution = solve_sequential(&config).unwrap();
//!
//! println!("still moving by {:.3e} per probe pass", solution.max_diff);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Grid, Solution, SolveError, solve_sequential, solve_threaded};
pub use schema::{ConfigError, RunConfig};

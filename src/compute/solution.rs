//! Run outcome and the canonical report line.

use std::time::Duration;

use crate::schema::ConfigError;

use super::grid::{Grid, GridError};

/// Result of one completed run: the final grid, the probe-pass convergence
/// scalar, and the wall-clock duration of init + iterations + probe.
#[derive(Debug)]
pub struct Solution {
    pub grid: Grid,
    /// Largest per-cell change observed in the probe pass, max-combined
    /// across all workers. Diagnostic only; it never gates termination.
    pub max_diff: f64,
    pub elapsed: Duration,
}

impl Solution {
    /// The single line the coordinating worker prints.
    pub fn report_line(&self, ranks: usize, threads: usize) -> String {
        format!(
            "Number of MPI ranks: {}\tNumber of threads: {}\tExecution time:{:.3} sec\tMax difference:{:.6}",
            ranks,
            threads,
            self.elapsed.as_secs_f64(),
            self.max_diff
        )
    }
}

/// Anything that can stop a run before it produces a result line.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

//! Run configuration for the red/black relaxation solver.

use serde::{Deserialize, Serialize};

/// Default worker count (sequential run).
fn default_workers() -> usize {
    1
}

/// Parameters of one solver run.
///
/// Shared by all three execution models. For the distributed variant the
/// worker count is the MPI world size rather than a user-supplied argument,
/// but validation goes through the same path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of interior rows/columns. The allocated grid is
    /// `(gridsize + 2)²` including the boundary border.
    pub gridsize: usize,
    /// Number of full red+black iterations before the probe pass.
    pub iterations: usize,
    /// Number of workers (threads or ranks) the grid is partitioned over.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gridsize: 64,
            iterations: 100,
            workers: 1,
        }
    }
}

impl RunConfig {
    /// Validate run parameters.
    ///
    /// The grid is split into contiguous row strips of equal height, so the
    /// grid size must divide evenly by the worker count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gridsize == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.gridsize % self.workers != 0 {
            return Err(ConfigError::UnevenPartition {
                gridsize: self.gridsize,
                workers: self.workers,
            });
        }
        Ok(())
    }

    /// Rows per worker strip.
    #[inline]
    pub fn strip_height(&self) -> usize {
        self.gridsize / self.workers
    }

    /// First interior row (global index) owned by `worker`.
    #[inline]
    pub fn first_row(&self, worker: usize) -> usize {
        worker * self.strip_height() + 1
    }

    /// Last interior row (global index, inclusive) owned by `worker`.
    #[inline]
    pub fn last_row(&self, worker: usize) -> usize {
        self.first_row(worker) + self.strip_height() - 1
    }
}

/// Configuration validation errors.
///
/// All of these are fatal at startup: every worker must be torn down
/// uniformly, or the survivors deadlock waiting for a peer that exited.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid size must be non-zero")]
    ZeroGridSize,
    #[error("Worker count must be non-zero")]
    NoWorkers,
    #[error("Grid size {gridsize} must divide evenly by {workers} workers")]
    UnevenPartition { gridsize: usize, workers: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_grid() {
        let config = RunConfig {
            gridsize: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroGridSize)));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = RunConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoWorkers)));
    }

    #[test]
    fn test_validate_rejects_uneven_partition() {
        let config = RunConfig {
            gridsize: 10,
            iterations: 1,
            workers: 4,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnevenPartition {
                gridsize: 10,
                workers: 4
            })
        ));
    }

    #[test]
    fn test_strip_partition() {
        let config = RunConfig {
            gridsize: 12,
            iterations: 1,
            workers: 3,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.strip_height(), 4);
        assert_eq!(config.first_row(0), 1);
        assert_eq!(config.last_row(0), 4);
        assert_eq!(config.first_row(2), 9);
        assert_eq!(config.last_row(2), 12);
    }
}

//! Schema module - run configuration for the relaxation solver.

mod config;

pub use config::*;

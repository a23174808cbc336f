//! Compute module - the red/black relaxation engine in its three
//! execution models.

mod arena;
mod barrier;
mod grid;
mod sequential;
mod solution;
mod stencil;
mod threaded;

#[cfg(feature = "distributed")]
mod distributed;

pub use arena::*;
pub use barrier::*;
pub use grid::*;
pub use sequential::*;
pub use solution::*;
pub use stencil::*;
pub use threaded::*;

#[cfg(feature = "distributed")]
pub use distributed::*;

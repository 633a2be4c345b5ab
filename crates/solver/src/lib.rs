//! MDDFT solver facade: options, solver and path-agreement evaluation.

pub mod base;
pub mod eval;
pub mod options;
pub mod solver;

pub use base::*;
pub use eval::*;
pub use options::*;
pub use solver::*;

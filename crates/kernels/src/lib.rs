//! Problem descriptors, array backends and artifact plumbing for FFTForge.

pub mod array;
pub mod backend;
pub mod config;
pub mod error;
pub mod fft;
pub mod problem;
pub mod registry;
pub mod utils;

pub use array::*;
pub use backend::*;
pub use config::*;
pub use error::*;
pub use problem::*;
pub use registry::*;
pub use utils::*;

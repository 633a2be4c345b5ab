//! Generator-script and host-wrapper representations for FFTForge.

pub mod builder;
pub mod dialect;
pub mod host;

pub use builder::*;
pub use dialect::*;
pub use host::*;

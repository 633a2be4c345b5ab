//! FFTForge: a multi-dimensional DFT solver that keeps a reference
//! implementation, a compiled-kernel call path and generator-script
//! emission in agreement.

pub use fftforge_ir as ir;
pub use fftforge_kernels as kernels;
pub use fftforge_solver as solver;

pub use fftforge_kernels::{
    ArrayBackend, ArrayBackends, ArrayLocation, ArtifactRegistry, CompiledKernel, ComplexArray,
    Direction, ElementType, Layout, MddftProblem, SolverError, TargetBackend,
};
pub use fftforge_solver::{MddftSolver, SolverOptions};

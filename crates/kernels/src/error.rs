//! Error taxonomy for solver operations.

use crate::array::ArrayLocation;
use crate::config::ElementType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("problem must be an {expected}, got {found}")]
    ProblemType {
        expected: &'static str,
        found: String,
    },
    #[error("transform needs at least one dimension")]
    EmptyDimensions,
    #[error("dimension {axis} must be positive")]
    InvalidDimension { axis: usize },
    #[error("array shape {found:?} does not match problem dimensions {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("array element type {found} does not match solver element type {expected}")]
    ElementTypeMismatch {
        expected: ElementType,
        found: ElementType,
    },
    #[error("no compiled artifact loaded for {name}")]
    MissingArtifact { name: String },
    #[error("artifact {found} cannot be bound to solver {expected}")]
    ArtifactNameMismatch { expected: String, found: String },
    #[error("no {0} array backend registered")]
    BackendUnavailable(ArrayLocation),
}

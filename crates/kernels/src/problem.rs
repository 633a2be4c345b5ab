//! Problem descriptors.

use crate::config::Direction;
use crate::error::SolverError;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type-erased problem handed around by the surrounding framework.
pub trait Problem: Send + Sync {
    fn kind(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

/// Multi-dimensional DFT problem: sizes along each axis plus a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMddftProblem")]
pub struct MddftProblem {
    dimensions: Vec<usize>,
    direction: Direction,
}

#[derive(Deserialize)]
struct RawMddftProblem {
    dimensions: Vec<usize>,
    direction: Direction,
}

impl TryFrom<RawMddftProblem> for MddftProblem {
    type Error = anyhow::Error;

    fn try_from(raw: RawMddftProblem) -> Result<Self> {
        Self::new(raw.dimensions, raw.direction)
    }
}

impl MddftProblem {
    pub const KIND: &'static str = "MddftProblem";

    pub fn new(dimensions: Vec<usize>, direction: Direction) -> Result<Self> {
        if dimensions.is_empty() {
            bail!(SolverError::EmptyDimensions);
        }
        if let Some(axis) = dimensions.iter().position(|&n| n == 0) {
            bail!(SolverError::InvalidDimension { axis });
        }
        Ok(Self {
            dimensions,
            direction,
        })
    }

    pub fn forward(dimensions: Vec<usize>) -> Result<Self> {
        Self::new(dimensions, Direction::Forward)
    }

    pub fn inverse(dimensions: Vec<usize>) -> Result<Self> {
        Self::new(dimensions, Direction::Inverse)
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Total number of elements, the inverse normalization divisor.
    pub fn element_count(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Same sizes, opposite direction.
    pub fn flipped(&self) -> Self {
        Self {
            dimensions: self.dimensions.clone(),
            direction: self.direction.flipped(),
        }
    }
}

impl Problem for MddftProblem {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sized_axis() {
        let err = MddftProblem::forward(vec![4, 0, 2]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SolverError>(),
            Some(&SolverError::InvalidDimension { axis: 1 })
        );
    }

    #[test]
    fn rejects_rank_zero() {
        let err = MddftProblem::inverse(Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SolverError>(),
            Some(&SolverError::EmptyDimensions)
        );
    }

    #[test]
    fn element_count_is_product() {
        let problem = MddftProblem::forward(vec![8, 4, 2]).expect("problem");
        assert_eq!(problem.element_count(), 64);
        assert_eq!(problem.rank(), 3);
        assert_eq!(problem.flipped().direction(), Direction::Inverse);
    }
}

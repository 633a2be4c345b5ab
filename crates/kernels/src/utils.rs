//! Shared helpers for shape checks and numeric comparison.

use crate::array::{ArrayData, ComplexArray};
use crate::error::SolverError;
use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

pub fn validate_shape(array: &ComplexArray, dimensions: &[usize]) -> Result<()> {
    ensure!(
        array.shape() == dimensions,
        SolverError::ShapeMismatch {
            expected: dimensions.to_vec(),
            found: array.shape().to_vec(),
        }
    );
    Ok(())
}

/// Elementwise error statistics between two arrays of equal shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    pub max_abs_error: f64,
    pub mean_abs_error: f64,
    pub l2_error: f64,
}

/// Compares in logical index order, so memory layout does not matter.
/// Mixed precisions are compared after widening to double.
pub fn error_stats(actual: &ComplexArray, expected: &ComplexArray) -> Result<ErrorStats> {
    if actual.shape() != expected.shape() {
        bail!(SolverError::ShapeMismatch {
            expected: expected.shape().to_vec(),
            found: actual.shape().to_vec(),
        });
    }

    let widen = |data: &ArrayData| -> Vec<num_complex::Complex64> {
        match data {
            ArrayData::Double(values) => values.iter().copied().collect(),
            ArrayData::Single(values) => values
                .iter()
                .map(|v| num_complex::Complex64::new(v.re as f64, v.im as f64))
                .collect(),
        }
    };

    let lhs = widen(actual.data());
    let rhs = widen(expected.data());

    let mut max_abs_error = 0.0_f64;
    let mut sum_abs = 0.0_f64;
    let mut sum_sq = 0.0_f64;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        let err = (a - b).norm();
        max_abs_error = max_abs_error.max(err);
        sum_abs += err;
        sum_sq += err * err;
    }

    let count = lhs.len().max(1) as f64;
    Ok(ErrorStats {
        max_abs_error,
        mean_abs_error: sum_abs / count,
        l2_error: sum_sq.sqrt(),
    })
}

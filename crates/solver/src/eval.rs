//! Agreement checks between the reference and compiled paths.
//!
//! Each case builds a solver, binds the matching artifact from a registry,
//! feeds both paths the same deterministic input and records how far the
//! compiled output is from the normalized reference output.

use crate::options::SolverOptions;
use crate::solver::MddftSolver;
use anyhow::Result;
use fftforge_kernels::utils::{error_stats, ErrorStats};
use fftforge_kernels::{ArtifactRegistry, ComplexArray, Direction, ElementType, MddftProblem};
use ndarray::{ArrayD, Dimension, IxDyn};
use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementCase {
    pub name: String,
    pub problem: MddftProblem,
}

impl AgreementCase {
    pub fn new(name: impl Into<String>, problem: MddftProblem) -> Self {
        Self {
            name: name.into(),
            problem,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementResult {
    pub case: String,
    pub kernel: String,
    pub solve_latency_ms: f64,
    pub errors: ErrorStats,
    pub problem: MddftProblem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementReport {
    pub target: String,
    pub generated_at_unix_ms: u128,
    pub cases: Vec<AgreementResult>,
}

impl AgreementReport {
    pub fn worst_max_abs_error(&self) -> f64 {
        self.cases
            .iter()
            .fold(0.0_f64, |acc, case| acc.max(case.errors.max_abs_error))
    }

    pub fn all_within(&self, tolerance: f64) -> bool {
        self.worst_max_abs_error() <= tolerance
    }
}

pub struct AgreementSuite {
    cases: Vec<AgreementCase>,
}

impl AgreementSuite {
    pub fn new(cases: Vec<AgreementCase>) -> Self {
        Self { cases }
    }

    /// Small 1-D, 2-D and 3-D cases in both directions.
    pub fn smoke() -> Result<Self> {
        let mut cases = Vec::new();
        for dims in [vec![16], vec![8, 8], vec![4, 6, 8]] {
            for direction in [Direction::Forward, Direction::Inverse] {
                let problem = MddftProblem::new(dims.clone(), direction)?;
                let name = format!(
                    "{}_{}",
                    direction.short_name(),
                    dims.iter()
                        .map(|d| d.to_string())
                        .collect::<Vec<_>>()
                        .join("x")
                );
                cases.push(AgreementCase::new(name, problem));
            }
        }
        Ok(Self::new(cases))
    }

    pub fn cases(&self) -> &[AgreementCase] {
        &self.cases
    }

    pub fn run(&self, options: &SolverOptions, registry: &ArtifactRegistry) -> Result<AgreementReport> {
        let mut results = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            let mut solver = MddftSolver::new(case.problem.clone(), options.clone());
            solver.load_artifact(registry)?;

            let input = deterministic_input(case.problem.dimensions(), solver.config().element_type);
            let expected = solver.run_def_normalized(&input)?;
            let (latency, actual) = timed(|| solver.solve(&input))?;
            let errors = error_stats(&actual, &expected)?;

            results.push(AgreementResult {
                case: case.name.clone(),
                kernel: solver.canonical_name().to_string(),
                solve_latency_ms: latency.as_secs_f64() * 1000.0,
                errors,
                problem: case.problem.clone(),
            });
        }

        let generated_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| Duration::from_secs(0))
            .as_millis();

        Ok(AgreementReport {
            target: options.target().as_str().to_string(),
            generated_at_unix_ms,
            cases: results,
        })
    }
}

pub fn deterministic_input(dimensions: &[usize], element_type: ElementType) -> ComplexArray {
    let values = ArrayD::from_shape_fn(IxDyn(dimensions), |index| {
        let seed = index
            .slice()
            .iter()
            .enumerate()
            .fold(0usize, |acc, (axis, &i)| acc ^ (i * (1313 + 6018 * axis)));
        let re = 1.0 + (seed % 17) as f64 / 16.0;
        let im = (seed % 5) as f64 / 8.0 - 0.25;
        Complex64::new(re, im)
    });
    match element_type {
        ElementType::DoubleComplex => ComplexArray::double(values),
        ElementType::SingleComplex => {
            ComplexArray::single(values.mapv(|v| Complex32::new(v.re as f32, v.im as f32)))
        }
    }
}

fn timed<F, T>(f: F) -> Result<(Duration, T)>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let value = f()?;
    Ok((start.elapsed(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_covers_both_directions() {
        let suite = AgreementSuite::smoke().expect("suite");
        assert_eq!(suite.cases().len(), 6);
        assert_eq!(suite.cases()[0].name, "fwd_16");
        assert_eq!(suite.cases()[5].name, "inv_4x6x8");
    }

    #[test]
    fn deterministic_input_matches_precision() {
        let double = deterministic_input(&[4, 4], ElementType::DoubleComplex);
        let single = deterministic_input(&[4, 4], ElementType::SingleComplex);
        assert_eq!(double.element_type(), ElementType::DoubleComplex);
        assert_eq!(single.element_type(), ElementType::SingleComplex);
        assert_eq!(double, deterministic_input(&[4, 4], ElementType::DoubleComplex));
    }

    #[test]
    fn missing_artifact_aborts_run() {
        let suite = AgreementSuite::smoke().expect("suite");
        let result = suite.run(&SolverOptions::new(), &ArtifactRegistry::new());
        assert!(result.is_err());
    }
}

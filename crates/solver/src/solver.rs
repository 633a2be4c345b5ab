//! Multi-dimensional DFT solver.
//!
//! One solver ties together three paths that must agree on dimensions,
//! direction, precision and layout:
//!
//! * `run_def` computes the transform with the array backend that owns the
//!   input. Both directions are unscaled.
//! * `solve` calls the attached compiled artifact and divides inverse
//!   results by the element count.
//! * `write_script` / `write_cuda_host` describe the same transform to the
//!   external generator and the accelerator toolchain.
//!
//! The canonical name is computed once and used as the script's output
//! symbol, the artifact lookup key and the host-wrapper symbol.

use crate::base::SolverBase;
use crate::options::SolverOptions;
use anyhow::{anyhow, bail, ensure, Result};
use fftforge_ir::{
    ConfigSelection, GeneratorScript, HostWrapper, TransformTerm, ACCELERATOR_SUFFIX,
};
use fftforge_kernels::{
    utils::validate_shape, ArrayBackends, ArtifactRegistry, ComplexArray, Direction,
    DynCompiledKernel, ElementType, Layout, MddftProblem, Problem, SolverError, TargetBackend,
};
use serde::{Deserialize, Serialize};
use std::io;
use tracing::{debug, info, warn};

pub const SOLVER_NAME: &str = "MddftSolver";

/// Generator option holding the real component type.
pub const REAL_CTYPE_OPTION: &str = "TRealCtype";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub element_type: ElementType,
    pub layout: Layout,
    pub target: TargetBackend,
    pub canonical_name: String,
}

impl SolverConfig {
    pub fn derive(problem: &MddftProblem, options: &SolverOptions) -> Self {
        let element_type = options.element_type();
        let layout = options.layout();
        Self {
            element_type,
            layout,
            target: options.target(),
            canonical_name: canonical_name(problem, element_type, layout),
        }
    }
}

/// `{z|c}mddft_{fwd|inv}_{n0}x{n1}...`, suffixed `_F` for column-major.
pub fn canonical_name(problem: &MddftProblem, element_type: ElementType, layout: Layout) -> String {
    let dims = problem
        .dimensions()
        .iter()
        .map(|dim| dim.to_string())
        .collect::<Vec<_>>()
        .join("x");
    let mut name = format!(
        "{}mddft_{}_{}",
        element_type.type_tag(),
        problem.direction().short_name(),
        dims
    );
    if layout.is_column_major() {
        name.push_str("_F");
    }
    name
}

#[derive(Debug)]
pub struct MddftSolver {
    problem: MddftProblem,
    config: SolverConfig,
    base: SolverBase,
}

impl MddftSolver {
    pub fn new(problem: MddftProblem, options: SolverOptions) -> Self {
        Self::with_backends(problem, options, ArrayBackends::default())
    }

    pub fn with_backends(
        problem: MddftProblem,
        options: SolverOptions,
        backends: ArrayBackends,
    ) -> Self {
        let config = SolverConfig::derive(&problem, &options);
        debug!(
            name = %config.canonical_name,
            element_type = %config.element_type,
            layout = ?config.layout,
            target = config.target.as_str(),
            accelerator = backends.has_accelerator(),
            "configured mddft solver"
        );
        let base = SolverBase::new(config.canonical_name.clone(), options, backends);
        Self {
            problem,
            config,
            base,
        }
    }

    /// Builds a solver from a type-erased problem, failing unless it is an
    /// [`MddftProblem`].
    pub fn from_problem(problem: &dyn Problem, options: SolverOptions) -> Result<Self> {
        match problem.as_any().downcast_ref::<MddftProblem>() {
            Some(problem) => Ok(Self::new(problem.clone(), options)),
            None => bail!(SolverError::ProblemType {
                expected: MddftProblem::KIND,
                found: problem.kind().to_string(),
            }),
        }
    }

    pub fn problem(&self) -> &MddftProblem {
        &self.problem
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn canonical_name(&self) -> &str {
        &self.config.canonical_name
    }

    pub fn options(&self) -> &SolverOptions {
        self.base.options()
    }

    pub fn attach_artifact(&mut self, kernel: DynCompiledKernel) -> Result<()> {
        self.base.attach_artifact(kernel)
    }

    pub fn load_artifact(&mut self, registry: &ArtifactRegistry) -> Result<()> {
        self.base.load_artifact(registry)
    }

    pub fn has_artifact(&self) -> bool {
        self.base.has_artifact()
    }

    /// Reference transform through the input's own array backend.
    ///
    /// Neither direction is normalized: an inverse result is `N` times the
    /// result of [`MddftSolver::solve`] for the same input.
    pub fn run_def(&self, src: &ComplexArray) -> Result<ComplexArray> {
        validate_shape(src, self.problem.dimensions())?;
        let backend = self.base.backends().for_array(src)?;
        debug!(
            name = %self.config.canonical_name,
            backend = backend.name(),
            "running reference transform"
        );
        backend.fftn(src, self.problem.direction())
    }

    /// [`MddftSolver::run_def`] rescaled to the normalization `solve` uses.
    pub fn run_def_normalized(&self, src: &ComplexArray) -> Result<ComplexArray> {
        let mut output = self.run_def(src)?;
        if self.problem.direction() == Direction::Inverse {
            let backend = self.base.backends().for_array(&output)?;
            backend.divide_inplace(&mut output, self.problem.element_count() as f64)?;
        }
        Ok(output)
    }

    /// Calls the compiled artifact as `(destination, source)`.
    pub fn solve(&self, src: &ComplexArray) -> Result<ComplexArray> {
        validate_shape(src, self.problem.dimensions())?;
        ensure!(
            src.element_type() == self.config.element_type,
            SolverError::ElementTypeMismatch {
                expected: self.config.element_type,
                found: src.element_type(),
            }
        );
        let kernel = self.base.artifact()?;
        let backend = self.base.backends().for_array(src)?;

        let mut dst = backend.zeros(
            self.problem.dimensions(),
            self.config.element_type,
            self.config.layout,
        )?;
        let source = src.contiguous(self.config.layout);

        info!(
            name = %self.config.canonical_name,
            backend = backend.name(),
            elements = self.problem.element_count(),
            source_copied = !source.is_borrowed(),
            "dispatching compiled artifact"
        );
        let destination = dst
            .storage_mut()
            .ok_or_else(|| anyhow!("destination for {} is not contiguous", kernel.name()))?;
        ensure!(
            destination.element_type() == self.config.element_type,
            SolverError::ElementTypeMismatch {
                expected: self.config.element_type,
                found: destination.element_type(),
            }
        );
        kernel.call(destination, source.as_buffer())?;

        if self.problem.direction() == Direction::Inverse {
            backend.divide_inplace(&mut dst, self.problem.element_count() as f64)?;
        }
        Ok(dst)
    }

    /// Ordered generator statements describing this transform.
    pub fn script(&self) -> GeneratorScript {
        let (selection, symbol) = match self.config.target {
            TargetBackend::Gpu => (
                ConfigSelection::Gpu,
                format!("{}{}", self.config.canonical_name, ACCELERATOR_SUFFIX),
            ),
            TargetBackend::Cpu => (ConfigSelection::Default, self.config.canonical_name.clone()),
        };

        // The generator's forward sign is the negation of ours.
        let term = TransformTerm {
            dimensions: self.problem.dimensions().to_vec(),
            name: symbol,
            generator_direction: -self.problem.direction().sign(),
            column_major: self.config.layout.is_column_major(),
        };

        let mut builder = GeneratorScript::builder()
            .load_fftx()
            .select_config(selection)
            .declare_transform(term)
            .fetch_options();
        if self.config.element_type == ElementType::SingleComplex {
            builder = builder.set_option(REAL_CTYPE_OPTION, self.config.element_type.real_ctype());
        }
        builder
            .tag_options()
            .blank()
            .generate()
            .print_to(self.generated_file_name())
            .blank()
            .build()
    }

    pub fn write_script<W: io::Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        debug!(name = %self.config.canonical_name, "emitting generator script");
        self.script().write_to(sink)
    }

    /// File the framework should store the script under.
    pub fn script_file_name(&self) -> String {
        format!("{}.g", self.config.canonical_name)
    }

    /// File the generator writes its code to.
    pub fn generated_file_name(&self) -> String {
        let extension = match self.config.target {
            TargetBackend::Gpu => "cu",
            TargetBackend::Cpu => "c",
        };
        format!("{}.{}", self.config.canonical_name, extension)
    }

    pub fn cuda_host_wrapper(&self) -> HostWrapper {
        HostWrapper::new(
            SOLVER_NAME,
            self.config.canonical_name.clone(),
            self.config.element_type.real_ctype(),
        )
    }

    pub fn host_file_name(&self) -> String {
        format!("{}_host.cu", self.config.canonical_name)
    }

    pub fn write_cuda_host<W: io::Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        if self.config.target != TargetBackend::Gpu {
            warn!(
                name = %self.config.canonical_name,
                "emitting accelerator host wrapper for a cpu target"
            );
        }
        self.cuda_host_wrapper().write_to(sink)
    }
}

//! Framework-facing solver state shared by concrete solvers.

use crate::options::SolverOptions;
use anyhow::{bail, Result};
use fftforge_kernels::{ArrayBackends, ArtifactRegistry, DynCompiledKernel, SolverError};
use tracing::info;

/// Holds the base name, the options, the array backends and the loaded
/// artifact for one solver instance.
pub struct SolverBase {
    namebase: String,
    options: SolverOptions,
    backends: ArrayBackends,
    artifact: Option<DynCompiledKernel>,
}

impl SolverBase {
    pub fn new(namebase: String, options: SolverOptions, backends: ArrayBackends) -> Self {
        Self {
            namebase,
            options,
            backends,
            artifact: None,
        }
    }

    pub fn namebase(&self) -> &str {
        &self.namebase
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn backends(&self) -> &ArrayBackends {
        &self.backends
    }

    /// Binds a loaded artifact. Its name must equal the base name.
    pub fn attach_artifact(&mut self, kernel: DynCompiledKernel) -> Result<()> {
        if kernel.name() != self.namebase {
            bail!(SolverError::ArtifactNameMismatch {
                expected: self.namebase.clone(),
                found: kernel.name().to_string(),
            });
        }
        info!(name = %self.namebase, "attached compiled artifact");
        self.artifact = Some(kernel);
        Ok(())
    }

    pub fn load_artifact(&mut self, registry: &ArtifactRegistry) -> Result<()> {
        match registry.find(&self.namebase) {
            Some(kernel) => self.attach_artifact(kernel),
            None => bail!(SolverError::MissingArtifact {
                name: self.namebase.clone(),
            }),
        }
    }

    pub fn artifact(&self) -> Result<&DynCompiledKernel> {
        match &self.artifact {
            Some(kernel) => Ok(kernel),
            None => bail!(SolverError::MissingArtifact {
                name: self.namebase.clone(),
            }),
        }
    }

    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }
}

impl std::fmt::Debug for SolverBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverBase")
            .field("namebase", &self.namebase)
            .field("options", &self.options)
            .field("backends", &self.backends)
            .field("artifact", &self.artifact.as_ref().map(|k| k.name().to_string()))
            .finish()
    }
}

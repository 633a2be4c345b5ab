//! Compiled artifact registry keyed by canonical name.

use crate::array::{KernelBuffer, KernelBufferMut};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// A generated and loaded transform, called as `(destination, source)`.
///
/// The artifact writes `destination` in place. Both buffers hold the
/// problem's element count in the layout the artifact was generated for.
pub trait CompiledKernel: Send + Sync {
    fn name(&self) -> &str;
    fn call(&self, destination: KernelBufferMut<'_>, source: KernelBuffer<'_>) -> Result<()>;
}

pub type DynCompiledKernel = Arc<dyn CompiledKernel>;

#[derive(Default, Clone)]
pub struct ArtifactRegistry {
    kernels: HashMap<String, DynCompiledKernel>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self {
            kernels: HashMap::new(),
        }
    }

    /// Registers `kernel` under its own name, replacing any earlier entry.
    pub fn register<K>(&mut self, kernel: K)
    where
        K: CompiledKernel + 'static,
    {
        self.register_shared(Arc::new(kernel));
    }

    pub fn register_shared(&mut self, kernel: DynCompiledKernel) {
        self.kernels.insert(kernel.name().to_string(), kernel);
    }

    pub fn find(&self, name: &str) -> Option<DynCompiledKernel> {
        self.kernels.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kernels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(&'static str);

    impl CompiledKernel for Noop {
        fn name(&self) -> &str {
            self.0
        }

        fn call(&self, _destination: KernelBufferMut<'_>, _source: KernelBuffer<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = ArtifactRegistry::new();
        registry.register(Noop("zmddft_fwd_8x8"));
        registry.register(Noop("cmddft_inv_4x4_F"));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("cmddft_inv_4x4_F"));
        assert_eq!(
            registry.find("zmddft_fwd_8x8").map(|k| k.name().to_string()),
            Some("zmddft_fwd_8x8".to_string())
        );
        assert!(registry.find("zmddft_inv_8x8").is_none());
    }
}

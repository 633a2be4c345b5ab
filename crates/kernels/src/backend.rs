//! Array backends: the array library a path computes with, chosen per call
//! from the input's location tag.

use crate::array::{ArrayData, ArrayLocation, ComplexArray};
use crate::config::{Direction, ElementType, Layout};
use crate::error::SolverError;
use crate::fft;
use anyhow::{bail, Result};
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

pub trait ArrayBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn location(&self) -> ArrayLocation;
    /// Unscaled n-dimensional DFT of `input`.
    fn fftn(&self, input: &ComplexArray, direction: Direction) -> Result<ComplexArray>;
    fn zeros(&self, shape: &[usize], element_type: ElementType, layout: Layout) -> Result<ComplexArray>;
    fn divide_inplace(&self, array: &mut ComplexArray, divisor: f64) -> Result<()>;
}

pub type DynArrayBackend = Arc<dyn ArrayBackend>;

#[derive(Debug, Default, Clone, Copy)]
pub struct HostArrayBackend;

impl HostArrayBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ArrayBackend for HostArrayBackend {
    fn name(&self) -> &'static str {
        "host-rustfft"
    }

    fn location(&self) -> ArrayLocation {
        ArrayLocation::Host
    }

    fn fftn(&self, input: &ComplexArray, direction: Direction) -> Result<ComplexArray> {
        debug!(shape = ?input.shape(), ?direction, "host fftn");
        let data = match input.data() {
            ArrayData::Double(values) => ArrayData::Double(fft::fftn(values, direction)),
            ArrayData::Single(values) => ArrayData::Single(fft::fftn(values, direction)),
        };
        Ok(ComplexArray::new(data, self.location()))
    }

    fn zeros(&self, shape: &[usize], element_type: ElementType, layout: Layout) -> Result<ComplexArray> {
        let shape = IxDyn(shape).set_f(layout.is_column_major());
        let data = match element_type {
            ElementType::DoubleComplex => ArrayData::Double(ArrayD::zeros(shape)),
            ElementType::SingleComplex => ArrayData::Single(ArrayD::zeros(shape)),
        };
        Ok(ComplexArray::new(data, self.location()))
    }

    fn divide_inplace(&self, array: &mut ComplexArray, divisor: f64) -> Result<()> {
        match array.data_mut() {
            ArrayData::Double(values) => match values.as_slice_memory_order_mut() {
                Some(elements) => elements.par_iter_mut().for_each(|v| *v /= divisor),
                None => values.mapv_inplace(|v| v / divisor),
            },
            ArrayData::Single(values) => {
                let divisor = divisor as f32;
                match values.as_slice_memory_order_mut() {
                    Some(elements) => elements.par_iter_mut().for_each(|v| *v /= divisor),
                    None => values.mapv_inplace(|v| v / divisor),
                }
            }
        }
        Ok(())
    }
}

/// Backends available to a solver, one per array location.
#[derive(Clone)]
pub struct ArrayBackends {
    host: DynArrayBackend,
    accelerator: Option<DynArrayBackend>,
}

impl ArrayBackends {
    pub fn host_only() -> Self {
        Self {
            host: Arc::new(HostArrayBackend::new()),
            accelerator: None,
        }
    }

    pub fn with_accelerator<B>(mut self, backend: B) -> Self
    where
        B: ArrayBackend + 'static,
    {
        self.accelerator = Some(Arc::new(backend));
        self
    }

    pub fn has_accelerator(&self) -> bool {
        self.accelerator.is_some()
    }

    /// Backend owning arrays at `location`.
    pub fn select(&self, location: ArrayLocation) -> Result<&DynArrayBackend> {
        match location {
            ArrayLocation::Host => Ok(&self.host),
            ArrayLocation::Accelerator => match &self.accelerator {
                Some(backend) => Ok(backend),
                None => bail!(SolverError::BackendUnavailable(location)),
            },
        }
    }

    pub fn for_array(&self, array: &ComplexArray) -> Result<&DynArrayBackend> {
        self.select(array.location())
    }
}

impl Default for ArrayBackends {
    fn default() -> Self {
        Self::host_only()
    }
}

impl std::fmt::Debug for ArrayBackends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayBackends")
            .field("host", &self.host.name())
            .field("accelerator", &self.accelerator.as_ref().map(|b| b.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex32;

    #[test]
    fn accelerator_requires_registration() {
        let backends = ArrayBackends::host_only();
        assert!(!backends.has_accelerator());
        let err = backends
            .select(ArrayLocation::Accelerator)
            .err()
            .expect("no accelerator backend");
        assert_eq!(
            err.downcast_ref::<SolverError>(),
            Some(&SolverError::BackendUnavailable(ArrayLocation::Accelerator))
        );
        assert_eq!(
            backends.select(ArrayLocation::Host).expect("host").name(),
            "host-rustfft"
        );
    }

    #[test]
    fn zeros_honors_layout_and_precision() {
        let backend = HostArrayBackend::new();
        let array = backend
            .zeros(&[3, 5], ElementType::SingleComplex, Layout::ColumnMajor)
            .expect("zeros");
        assert_eq!(array.shape(), &[3, 5]);
        assert_eq!(array.element_type(), ElementType::SingleComplex);
        assert_eq!(array.memory_layout(), Some(Layout::ColumnMajor));
    }

    #[test]
    fn divide_scales_every_element() {
        let backend = HostArrayBackend::new();
        let mut array = ComplexArray::single(ArrayD::from_elem(
            IxDyn(&[2, 2]),
            Complex32::new(8.0, -4.0),
        ));
        backend.divide_inplace(&mut array, 4.0).expect("divide");
        for value in array.as_single().expect("single").iter() {
            assert_abs_diff_eq!(value.re, 2.0, epsilon = 1e-6);
            assert_abs_diff_eq!(value.im, -1.0, epsilon = 1e-6);
        }
    }
}

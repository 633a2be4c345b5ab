//! Complex array container shared by the reference and compiled paths.

use crate::config::{ElementType, Layout};
use ndarray::{ArrayD, ArrayViewD};
use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Where an array's storage lives. Selects the array backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArrayLocation {
    #[default]
    Host,
    Accelerator,
}

impl fmt::Display for ArrayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayLocation::Host => f.write_str("host"),
            ArrayLocation::Accelerator => f.write_str("accelerator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Double(ArrayD<Complex64>),
    Single(ArrayD<Complex32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexArray {
    data: ArrayData,
    location: ArrayLocation,
}

impl ComplexArray {
    pub fn new(data: ArrayData, location: ArrayLocation) -> Self {
        Self { data, location }
    }

    pub fn double(values: ArrayD<Complex64>) -> Self {
        Self::new(ArrayData::Double(values), ArrayLocation::Host)
    }

    pub fn single(values: ArrayD<Complex32>) -> Self {
        Self::new(ArrayData::Single(values), ArrayLocation::Host)
    }

    /// Promotes a real array to double-complex with zero imaginary parts.
    pub fn from_real(values: ArrayD<f64>) -> Self {
        Self::double(values.mapv(|re| Complex64::new(re, 0.0)))
    }

    pub fn from_real_f32(values: ArrayD<f32>) -> Self {
        Self::single(values.mapv(|re| Complex32::new(re, 0.0)))
    }

    /// Retags the array as living at `location` without moving data.
    pub fn with_location(mut self, location: ArrayLocation) -> Self {
        self.location = location;
        self
    }

    pub fn location(&self) -> ArrayLocation {
        self.location
    }

    pub fn element_type(&self) -> ElementType {
        match &self.data {
            ArrayData::Double(_) => ElementType::DoubleComplex,
            ArrayData::Single(_) => ElementType::SingleComplex,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match &self.data {
            ArrayData::Double(values) => values.shape(),
            ArrayData::Single(values) => values.shape(),
        }
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayData {
        &mut self.data
    }

    pub fn as_double(&self) -> Option<&ArrayD<Complex64>> {
        match &self.data {
            ArrayData::Double(values) => Some(values),
            ArrayData::Single(_) => None,
        }
    }

    pub fn as_single(&self) -> Option<&ArrayD<Complex32>> {
        match &self.data {
            ArrayData::Single(values) => Some(values),
            ArrayData::Double(_) => None,
        }
    }

    /// Memory order of the storage, `None` when it is neither contiguous
    /// row-major nor contiguous column-major.
    pub fn memory_layout(&self) -> Option<Layout> {
        match &self.data {
            ArrayData::Double(values) => layout_of(values.view()),
            ArrayData::Single(values) => layout_of(values.view()),
        }
    }

    /// Elements as one contiguous run in `layout` order, copying only when
    /// the storage is not already in that order.
    pub fn contiguous(&self, layout: Layout) -> ContiguousData<'_> {
        match &self.data {
            ArrayData::Double(values) => ContiguousData::Double(contiguous_in(values, layout)),
            ArrayData::Single(values) => ContiguousData::Single(contiguous_in(values, layout)),
        }
    }

    /// Mutable view of the whole storage in memory order.
    pub fn storage_mut(&mut self) -> Option<KernelBufferMut<'_>> {
        match &mut self.data {
            ArrayData::Double(values) => values
                .as_slice_memory_order_mut()
                .map(KernelBufferMut::Double),
            ArrayData::Single(values) => values
                .as_slice_memory_order_mut()
                .map(KernelBufferMut::Single),
        }
    }
}

/// Read-only kernel argument: contiguous complex elements.
#[derive(Debug, Clone, Copy)]
pub enum KernelBuffer<'a> {
    Double(&'a [Complex64]),
    Single(&'a [Complex32]),
}

impl KernelBuffer<'_> {
    pub fn len(&self) -> usize {
        match self {
            KernelBuffer::Double(values) => values.len(),
            KernelBuffer::Single(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writable kernel argument mutated in place by a compiled artifact.
#[derive(Debug)]
pub enum KernelBufferMut<'a> {
    Double(&'a mut [Complex64]),
    Single(&'a mut [Complex32]),
}

impl KernelBufferMut<'_> {
    pub fn len(&self) -> usize {
        match self {
            KernelBufferMut::Double(values) => values.len(),
            KernelBufferMut::Single(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            KernelBufferMut::Double(_) => ElementType::DoubleComplex,
            KernelBufferMut::Single(_) => ElementType::SingleComplex,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContiguousData<'a> {
    Double(Cow<'a, [Complex64]>),
    Single(Cow<'a, [Complex32]>),
}

impl ContiguousData<'_> {
    pub fn as_buffer(&self) -> KernelBuffer<'_> {
        match self {
            ContiguousData::Double(values) => KernelBuffer::Double(values),
            ContiguousData::Single(values) => KernelBuffer::Single(values),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        match self {
            ContiguousData::Double(values) => matches!(values, Cow::Borrowed(_)),
            ContiguousData::Single(values) => matches!(values, Cow::Borrowed(_)),
        }
    }
}

fn layout_of<T>(view: ArrayViewD<'_, T>) -> Option<Layout> {
    if view.is_standard_layout() {
        Some(Layout::RowMajor)
    } else if view.reversed_axes().is_standard_layout() {
        Some(Layout::ColumnMajor)
    } else {
        None
    }
}

fn contiguous_in<T: Clone>(values: &ArrayD<T>, layout: Layout) -> Cow<'_, [T]> {
    // Column-major order of an array is row-major order of its reversed axes.
    let view = match layout {
        Layout::RowMajor => values.view(),
        Layout::ColumnMajor => values.view().reversed_axes(),
    };
    match view.to_slice() {
        Some(elements) => Cow::Borrowed(elements),
        None => Cow::Owned(view.iter().cloned().collect()),
    }
}

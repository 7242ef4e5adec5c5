#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # fc compute
//!
//! The element-wise add kernel behind the `fc` C entry point.
//!
//! Given two `f64` buffers `a` and `b` and an element count `N`, the kernel
//! writes `z[j] = a[j] + b[j]` for every `j` in `0..N` and returns `N`. The
//! buffers always belong to the caller; nothing here allocates, frees or keeps a
//! reference past the call.
//!
//! ## Entry points
//!
//! -   [`ElementwiseAdd::run`] and [`ElementwiseAdd::run_slices`] are the safe,
//!     checked surface. A negative `N` or a buffer shorter than `N` is rejected
//!     before any element is written.
//! -   [`ElementwiseAdd::run_unchecked`] mirrors the raw C loop: pointers in,
//!     no bounds checks, undefined behaviour if the caller lies about `N`.
//! -   [`ComputeBackend::dispatch`] takes untyped byte views ([`BufferView`],
//!     [`BufferViewMut`]) and routes a [`Kernel`] to its handler on the
//!     [`CpuBackend`].
//!
//! Diagnostics are off by default. When enabled through [`KernelConfig`], one
//! `fc: N=.. a[0]=.. b[0]=..` line is logged through `tracing` per call.
//!
//! ```rust
//! use compute::ElementwiseAdd;
//!
//! let a = [1.0, 2.0, 3.0];
//! let b = [10.0, 20.0, 30.0];
//! let mut z = [0.0; 3];
//! let n = ElementwiseAdd::default().run(3, &a, &b, &mut z)?;
//! assert_eq!(n, 3);
//! assert_eq!(z, [11.0, 22.0, 33.0]);
//! # Ok::<(), compute::ComputeError>(())
//! ```

use std::sync::Arc;
use thiserror::Error;

pub mod backend;
pub mod config;
pub mod cpu_backend;
pub mod elementwise;
pub mod kernels;
pub mod layout;

pub use backend::ComputeBackend;
pub use config::KernelConfig;
pub use cpu_backend::CpuBackend;
pub use elementwise::ElementwiseAdd;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error("invalid element count: {0}")]
    InvalidArgument(i64),
    #[error("buffer `{buffer}` holds {len} elements but {required} are required")]
    OutOfBounds {
        buffer: &'static str,
        len: usize,
        required: usize,
    },
    #[error("buffer shape mismatch: {0}")]
    ShapeMismatch(&'static str),
    #[error("buffer cannot be viewed as f64: {0}")]
    Misaligned(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ComputeError {
    /// Negative status code reported across the C boundary.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => -1,
            Self::OutOfBounds { .. } => -2,
            Self::ShapeMismatch(_) => -4,
            Self::Misaligned(_) => -5,
            Self::InvalidConfig(_) => -6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    // Element-wise
    Add,
}

impl Kernel {
    #[must_use]
    pub const fn binding_count(&self) -> u32 {
        layout::binding_count(self)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
        }
    }
}

/// Read-only byte view over a caller-owned buffer.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    pub data: &'a [u8],
    pub element_size_in_bytes: usize,
}

impl<'a> BufferView<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8], element_size_in_bytes: usize) -> Self {
        Self { data, element_size_in_bytes }
    }

    #[must_use]
    pub fn from_f64(values: &'a [f64]) -> Self {
        Self::new(bytemuck::cast_slice(values), std::mem::size_of::<f64>())
    }

    /// Number of whole elements in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        element_count(self.data.len(), self.element_size_in_bytes)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reinterprets the bytes as `f64` values.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the element size is not 8 bytes, `Misaligned` if the
    /// bytes are not 8-byte aligned or not a whole number of elements.
    pub fn as_f64(&self) -> Result<&'a [f64], ComputeError> {
        ensure_f64_elements(self.element_size_in_bytes)?;
        bytemuck::try_cast_slice(self.data)
            .map_err(|_| ComputeError::Misaligned("input view is not a whole, aligned run of f64"))
    }
}

/// Writable byte view over a caller-owned buffer.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    pub data: &'a mut [u8],
    pub element_size_in_bytes: usize,
}

impl<'a> BufferViewMut<'a> {
    #[must_use]
    pub fn new(data: &'a mut [u8], element_size_in_bytes: usize) -> Self {
        Self { data, element_size_in_bytes }
    }

    #[must_use]
    pub fn from_f64(values: &'a mut [f64]) -> Self {
        Self::new(bytemuck::cast_slice_mut(values), std::mem::size_of::<f64>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        element_count(self.data.len(), self.element_size_in_bytes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reinterprets the bytes as mutable `f64` values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BufferView::as_f64`].
    pub fn as_f64_mut(&mut self) -> Result<&mut [f64], ComputeError> {
        ensure_f64_elements(self.element_size_in_bytes)?;
        bytemuck::try_cast_slice_mut(self.data)
            .map_err(|_| ComputeError::Misaligned("output view is not a whole, aligned run of f64"))
    }
}

const fn element_count(bytes: usize, element_size_in_bytes: usize) -> usize {
    if element_size_in_bytes == 0 {
        0
    } else {
        bytes / element_size_in_bytes
    }
}

fn ensure_f64_elements(element_size_in_bytes: usize) -> Result<(), ComputeError> {
    if element_size_in_bytes == std::mem::size_of::<f64>() {
        Ok(())
    } else {
        Err(ComputeError::ShapeMismatch("kernel only supports f64 elements"))
    }
}

/// Returns the compute backend for this process.
///
/// The CPU backend is the only backend. Its [`KernelConfig`] comes from the
/// environment (see [`KernelConfig::from_env`]); an unreadable environment
/// falls back to the defaults with a warning.
#[must_use]
pub fn default_backend() -> Arc<dyn ComputeBackend> {
    let config = KernelConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("{e}, falling back to default kernel configuration");
        KernelConfig::default()
    });
    tracing::info!("Using CpuBackend.");
    Arc::new(CpuBackend::with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reports_element_count() {
        let values = [1.0_f64, 2.0, 3.0];
        let view = BufferView::from_f64(&values);
        assert_eq!(view.len(), 3);
        assert!(!view.is_empty());
        assert_eq!(view.as_f64().unwrap(), &values);
    }

    #[test]
    fn zero_element_size_is_empty() {
        let bytes = [0u8; 8];
        let view = BufferView::new(&bytes, 0);
        assert!(view.is_empty());
        assert!(matches!(view.as_f64(), Err(ComputeError::ShapeMismatch(_))));
    }

    #[test]
    fn f32_sized_view_is_rejected() {
        let values = [1.0_f32, 2.0];
        let view = BufferView::new(bytemuck::cast_slice(&values), std::mem::size_of::<f32>());
        assert!(matches!(view.as_f64(), Err(ComputeError::ShapeMismatch(_))));
    }

    #[test]
    fn ragged_bytes_are_rejected() {
        let values = [0.0_f64; 2];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let view = BufferView::new(&bytes[..12], 8);
        assert!(matches!(view.as_f64(), Err(ComputeError::Misaligned(_))));
    }

    #[test]
    fn misaligned_bytes_are_rejected() {
        let values = [0.0_f64; 3];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let view = BufferView::new(&bytes[1..17], 8);
        assert!(matches!(view.as_f64(), Err(ComputeError::Misaligned(_))));
    }

    #[test]
    fn mutable_view_writes_through() {
        let mut values = [0.0_f64; 2];
        {
            let mut view = BufferViewMut::from_f64(&mut values);
            view.as_f64_mut().unwrap()[1] = 4.5;
        }
        assert_eq!(values, [0.0, 4.5]);
    }

    #[test]
    fn error_codes_are_distinct_and_negative() {
        let errors = [
            ComputeError::InvalidArgument(-1),
            ComputeError::OutOfBounds { buffer: "a", len: 0, required: 1 },
            ComputeError::ShapeMismatch("x"),
            ComputeError::Misaligned("x"),
            ComputeError::InvalidConfig("x".into()),
        ];
        let codes: Vec<i32> = errors.iter().map(ComputeError::code).collect();
        assert_eq!(codes, vec![-1, -2, -4, -5, -6]);
    }

    #[test]
    fn kernel_binding_counts() {
        assert_eq!(Kernel::Add.binding_count(), 3);
        assert_eq!(Kernel::Add.name(), "add");
    }
}

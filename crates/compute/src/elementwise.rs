//! # Element-wise add
//!
//! [`ElementwiseAdd`] is the kernel handle. It owns nothing but its
//! [`KernelConfig`]; every call is a single synchronous pass over buffers the
//! caller owns.
//!
//! Two bounds policies are offered as separate entry points rather than a
//! runtime switch:
//!
//! -   **Checked** ([`ElementwiseAdd::run`], [`ElementwiseAdd::run_slices`]):
//!     `N < 0` fails with `InvalidArgument`, a buffer shorter than `N` fails
//!     with `OutOfBounds`. Validation happens before the first write, so a
//!     failed call leaves `z` exactly as it was.
//! -   **Unchecked** ([`ElementwiseAdd::run_unchecked`]): raw pointers and the
//!     caller's word for `N`, matching the C loop the host links against.

use crate::kernels::add_op::{add_into, emit_diagnostic, validate};
use crate::{ComputeError, KernelConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementwiseAdd {
    config: KernelConfig,
}

impl ElementwiseAdd {
    #[must_use]
    pub const fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Writes `z[j] = a[j] + b[j]` for `j` in `0..n` and returns `n`.
    ///
    /// Buffers may be longer than `n`; elements past `n` are neither read nor
    /// written.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n` is negative, `OutOfBounds` if `a`, `b` or `z`
    /// holds fewer than `n` elements. `z` is untouched on error.
    pub fn run(&self, n: i32, a: &[f64], b: &[f64], z: &mut [f64]) -> Result<i32, ComputeError> {
        let len = validate(n, a.len(), b.len(), z.len())?;
        self.apply(i64::from(n), &a[..len], &b[..len], &mut z[..len]);
        Ok(n)
    }

    /// Adds `a` and `b` into `z` using `a.len()` as the element count.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `b` or `z` is shorter than `a`.
    pub fn run_slices(&self, a: &[f64], b: &[f64], z: &mut [f64]) -> Result<usize, ComputeError> {
        let len = a.len();
        for (buffer, have) in [("b", b.len()), ("z", z.len())] {
            if have < len {
                return Err(ComputeError::OutOfBounds { buffer, len: have, required: len });
            }
        }
        self.apply(i64::try_from(len).unwrap_or(i64::MAX), a, &b[..len], &mut z[..len]);
        Ok(len)
    }

    /// Unchecked add over raw pointers. Returns `n`.
    ///
    /// A non-positive `n` performs zero iterations and dereferences nothing; the
    /// diagnostic line, if enabled, then carries only `N`.
    /// `z` may be the same pointer as `a` or `b` (in-place add), since every
    /// element is read before it is written.
    ///
    /// # Safety
    ///
    /// When `n > 0`, `a` and `b` must be valid for reads of `n` consecutive
    /// `f64` values and `z` must be valid for writes of `n` consecutive `f64`
    /// values. `z` must not partially overlap `a` or `b`.
    pub unsafe fn run_unchecked(&self, n: i32, a: *const f64, b: *const f64, z: *mut f64) -> i32 {
        let len = match usize::try_from(n) {
            Ok(len) if len > 0 => len,
            _ => {
                if self.config.diagnostics {
                    emit_diagnostic(i64::from(n), None);
                }
                return n;
            }
        };
        if self.config.diagnostics {
            emit_diagnostic(i64::from(n), Some((*a, *b)));
        }
        for j in 0..len {
            *z.add(j) = *a.add(j) + *b.add(j);
        }
        n
    }

    fn apply(&self, n: i64, a: &[f64], b: &[f64], z: &mut [f64]) {
        if self.config.diagnostics {
            emit_diagnostic(n, a.first().copied().zip(b.first().copied()));
        }
        add_into(a, b, z);
    }
}

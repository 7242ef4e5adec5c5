use crate::layout::{STORAGE_IN, STORAGE_IN2};
use crate::{BufferView, BufferViewMut, ComputeError, ElementwiseAdd, KernelConfig};

/// `tracing` target of the per-call diagnostic line.
///
/// The line follows the `printf("fc: N=%d a[0]=%f b[0]=%f \n")` layout with two
/// differences: non-finite values print as Rust formats them (`NaN`, `inf`,
/// `-inf`) instead of C's `nan`, and there is no trailing space.
pub const DIAGNOSTIC_TARGET: &str = "fc";

/// Writes `z[j] = a[j] + b[j]` over the common length of the three slices.
pub fn add_into(a: &[f64], b: &[f64], z: &mut [f64]) {
    for ((out, &x), &y) in z.iter_mut().zip(a).zip(b) {
        *out = x + y;
    }
}

/// Checks `n` against the lengths of `a`, `b` and `z`, in that order.
///
/// # Errors
///
/// `InvalidArgument` for a negative `n`, `OutOfBounds` naming the first
/// buffer that is shorter than `n`.
pub fn validate(n: i32, a_len: usize, b_len: usize, z_len: usize) -> Result<usize, ComputeError> {
    let required = usize::try_from(n).map_err(|_| ComputeError::InvalidArgument(i64::from(n)))?;
    check_len("a", a_len, required)?;
    check_len("b", b_len, required)?;
    check_len("z", z_len, required)?;
    Ok(required)
}

fn check_len(buffer: &'static str, len: usize, required: usize) -> Result<(), ComputeError> {
    if len < required {
        return Err(ComputeError::OutOfBounds { buffer, len, required });
    }
    Ok(())
}

/// Logs the `fc: N=.. a[0]=.. b[0]=..` line. `first` is `None` when there is
/// no element 0 to report.
pub(crate) fn emit_diagnostic(n: i64, first: Option<(f64, f64)>) {
    match first {
        Some((a0, b0)) => {
            tracing::info!(target: DIAGNOSTIC_TARGET, "fc: N={n} a[0]={a0:.6} b[0]={b0:.6}");
        }
        None => tracing::info!(target: DIAGNOSTIC_TARGET, "fc: N={n}"),
    }
}

// Add operation handler
pub fn handle_add(
    n: i32,
    inputs: &[BufferView<'_>],
    output: &mut BufferViewMut<'_>,
    config: &KernelConfig,
) -> Result<i32, ComputeError> {
    if inputs.len() < 2 {
        // IN1, IN2 per layout.rs; the output view is passed separately
        return Err(ComputeError::ShapeMismatch(
            "Add kernel expects 2 input buffers (input_a, input_b)",
        ));
    }
    let a = inputs[STORAGE_IN as usize].as_f64()?;
    let b = inputs[STORAGE_IN2 as usize].as_f64()?;
    let z = output.as_f64_mut()?;

    ElementwiseAdd::new(*config).run(n, a, b, z)
}

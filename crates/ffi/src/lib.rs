#![deny(clippy::all, clippy::pedantic)]
//! # fc C ABI
//!
//! Exports the add kernel to host environments that load a shared library
//! (`NumPy` through ctypes or Cython, Julia `ccall`, plain C). The matching
//! declarations live in `include/fc.h`.
//!
//! -   `fc` is the plain call: no lengths, no checks, returns `N`.
//! -   `fc_checked` takes the buffer lengths too and returns a negative
//!     `FC_E*` code instead of touching memory when they do not cover `N`.
//!
//! The C signature has no room for a configuration argument, so verbosity is
//! process-wide. It starts from `FC_VERBOSE` on first use and can be changed
//! with `fc_set_verbose`. Nothing is printed unless a `tracing` subscriber is
//! installed, either by the host application or through `fc_init_logging`.

use compute::{kernels::add_op, ComputeError, ElementwiseAdd, KernelConfig};
use std::os::raw::{c_double, c_int, c_uint};
use std::sync::atomic::{AtomicU8, Ordering};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// Version of the exported call surface.
pub const FC_ABI_VERSION: c_uint = 1;

/// `N` is negative.
pub const FC_EINVAL: c_int = -1;
/// A buffer length is shorter than `N`.
pub const FC_EBOUNDS: c_int = -2;
/// A buffer pointer is null while `N > 0`.
pub const FC_ENULL: c_int = -3;

const VERBOSE_UNSET: u8 = 0;
const VERBOSE_OFF: u8 = 1;
const VERBOSE_ON: u8 = 2;

static VERBOSE: AtomicU8 = AtomicU8::new(VERBOSE_UNSET);

fn kernel() -> ElementwiseAdd {
    let state = match VERBOSE.load(Ordering::Acquire) {
        VERBOSE_UNSET => {
            let from_env = KernelConfig::from_env().unwrap_or_else(|e| {
                tracing::warn!("{e}, diagnostics stay off");
                KernelConfig::default()
            });
            let wanted = if from_env.diagnostics { VERBOSE_ON } else { VERBOSE_OFF };
            // A concurrent fc_set_verbose wins over the environment.
            match VERBOSE.compare_exchange(VERBOSE_UNSET, wanted, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => wanted,
                Err(current) => current,
            }
        }
        state => state,
    };
    ElementwiseAdd::new(KernelConfig::new().with_diagnostics(state == VERBOSE_ON))
}

/// Adds `N` elements of `a` and `b` into `z` and returns `N`.
///
/// A non-positive `N` performs no work and is returned as is.
///
/// # Safety
///
/// When `n > 0`, `a` and `b` must point to at least `n` readable doubles and
/// `z` to at least `n` writable doubles. `z` may equal `a` or `b` but must not
/// partially overlap them. Nothing is checked.
#[must_use]
#[no_mangle]
pub unsafe extern "C" fn fc(n: c_int, a: *const c_double, b: *const c_double, z: *mut c_double) -> c_int {
    kernel().run_unchecked(n, a, b, z)
}

/// Bounds-checked variant of [`fc`].
///
/// Returns `N` on success, `FC_EINVAL` if `N < 0`, `FC_ENULL` if a pointer is
/// null while `N > 0`, and `FC_EBOUNDS` if any length is shorter than `N`. On
/// failure `z` is not written. Null pointers are accepted when `N == 0`.
///
/// # Safety
///
/// Each non-null pointer must be valid for its stated length: `a_len`/`b_len`
/// readable doubles, `z_len` writable doubles. `z` may equal `a` or `b` but
/// must not partially overlap them.
#[must_use]
#[no_mangle]
pub unsafe extern "C" fn fc_checked(
    n: c_int,
    a: *const c_double,
    a_len: usize,
    b: *const c_double,
    b_len: usize,
    z: *mut c_double,
    z_len: usize,
) -> c_int {
    if n < 0 {
        return status(&ComputeError::InvalidArgument(i64::from(n)));
    }
    if n > 0 && (a.is_null() || b.is_null() || z.is_null()) {
        tracing::debug!(n, "fc_checked: null buffer");
        return FC_ENULL;
    }
    if let Err(e) = add_op::validate(n, a_len, b_len, z_len) {
        return status(&e);
    }
    kernel().run_unchecked(n, a, b, z)
}

fn status(error: &ComputeError) -> c_int {
    tracing::debug!("fc_checked: {error}");
    error.code()
}

/// Turns the per-call diagnostic line on (non-zero) or off (zero).
#[no_mangle]
pub extern "C" fn fc_set_verbose(enabled: c_int) {
    let state = if enabled != 0 { VERBOSE_ON } else { VERBOSE_OFF };
    VERBOSE.store(state, Ordering::Release);
}

/// Returns 1 if the diagnostic line is on, 0 otherwise.
#[must_use]
#[no_mangle]
pub extern "C" fn fc_verbose() -> c_int {
    c_int::from(kernel().config().diagnostics)
}

/// Plain-text subscriber for hosts: no colour, time, level or target, so the
/// diagnostic reads `fc: N=.. a[0]=.. b[0]=..` on its own line.
///
/// The level is fixed at INFO. Whether a line is produced at all is decided per
/// call by the verbosity flag, so `fc_set_verbose` keeps working after the
/// subscriber is installed.
pub fn host_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .without_time()
        .with_writer(writer)
        .finish()
}

/// Installs [`host_subscriber`] on stdout so diagnostics become visible.
///
/// Returns 0 when installed and 1 when a global subscriber already exists.
#[must_use]
#[no_mangle]
pub extern "C" fn fc_init_logging() -> c_int {
    match host_subscriber(std::io::stdout).try_init() {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[must_use]
#[no_mangle]
pub extern "C" fn fc_abi_version() -> c_uint {
    FC_ABI_VERSION
}

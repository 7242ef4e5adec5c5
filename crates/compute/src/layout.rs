//! Binding slots for kernel dispatch.
//!
//! Inputs occupy the leading slots and the single output comes last, so a
//! kernel with `binding_count() == k` takes `k - 1` input views.

pub const STORAGE_IN: u32 = 0;
pub const STORAGE_IN2: u32 = 1; // binary ops
pub const STORAGE_OUT: u32 = 2;

const _: () = assert!(STORAGE_OUT == binding_count(&crate::Kernel::Add) - 1);

/// Return expected number of bindings for each kernel.
#[must_use]
pub const fn binding_count(kernel: &crate::Kernel) -> u32 {
    match kernel {
        crate::Kernel::Add => 3,
    }
}

/// Number of read-only input bindings for each kernel.
#[must_use]
pub const fn input_count(kernel: &crate::Kernel) -> u32 {
    binding_count(kernel) - 1
}

use crate::{BufferView, BufferViewMut, ComputeError, Kernel};

pub trait ComputeBackend: Send + Sync + 'static {
    /// Dispatches a kernel over caller-owned buffers.
    ///
    /// # Arguments
    /// * `kernel`: The kernel to dispatch.
    /// * `n`: Number of elements to process.
    /// * `inputs`: Read-only views, in the binding order given by [`crate::layout`].
    /// * `output`: The view the kernel writes into. Only its first `n` elements
    ///   are touched.
    ///
    /// # Returns
    ///
    /// Returns `Ok(n)` once all `n` elements have been written.
    ///
    /// # Errors
    ///
    /// Returns `ComputeError::ShapeMismatch` if the number of views does not
    /// match the kernel layout or a view is not a whole number of elements,
    /// and `InvalidArgument`/`OutOfBounds` if `n` is negative or larger than a
    /// view. No element of `output` is written when an error is returned.
    fn dispatch(
        &self,
        kernel: &Kernel,
        n: i32,
        inputs: &[BufferView<'_>],
        output: &mut BufferViewMut<'_>,
    ) -> Result<i32, ComputeError>;
}

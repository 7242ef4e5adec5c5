use crate::{
    kernels, layout, BufferView, BufferViewMut, ComputeBackend, ComputeError, Kernel, KernelConfig,
};

#[derive(Default, Debug, Clone)]
pub struct CpuBackend {
    config: KernelConfig,
}

impl CpuBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: KernelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &KernelConfig {
        &self.config
    }
}

impl ComputeBackend for CpuBackend {
    fn dispatch(
        &self,
        kernel: &Kernel,
        n: i32,
        inputs: &[BufferView<'_>],
        output: &mut BufferViewMut<'_>,
    ) -> Result<i32, ComputeError> {
        if inputs.len() != layout::input_count(kernel) as usize {
            return Err(ComputeError::ShapeMismatch(
                "number of input buffers does not match the kernel layout",
            ));
        }
        let sizes = inputs
            .iter()
            .map(|view| (view.data.len(), view.element_size_in_bytes))
            .chain(std::iter::once((output.data.len(), output.element_size_in_bytes)));
        for (bytes, element_size) in sizes {
            if element_size == 0 || bytes % element_size != 0 {
                return Err(ComputeError::ShapeMismatch(
                    "Buffer data length is not a whole number of elements",
                ));
            }
        }

        tracing::trace!(kernel = kernel.name(), n, "dispatching on CpuBackend");
        match kernel {
            Kernel::Add => kernels::handle_add(n, inputs, output, &self.config),
        }
    }
}

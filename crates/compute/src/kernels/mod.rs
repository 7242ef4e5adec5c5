// This module re-exports handlers for each kernel operation.

// Element-wise operations
pub mod add_op;
pub use add_op::handle_add;

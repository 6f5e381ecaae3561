//! Kernel unfolding
//!
//! This module turns a square `k x k` kernel into the `((n - k + 1)^2, n^2)`
//! matrix that performs a valid convolution over an `n x n` image as a single
//! matrix-vector product.

pub mod template;
pub mod unfolded;
pub mod validate;

pub use template::{generate_index_template, generate_kernel_template, unfold_kernel, IndexTemplate, TemplateCell};
pub use unfolded::{apply_template, get_unfolded_kernel, unfold_kernel_values, UnfoldedKernelBuilder};
pub use validate::{check_sizes, unfolded_shape};

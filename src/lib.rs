//! Convolution unfolding library
//!
//! Expresses a 2D convolution over an `n x n` image as one matrix product by
//! unfolding the kernel (or, im2col style, the image) into a larger matrix.
//! Kernel index templates depend only on the image and kernel sizes, so they
//! are generated once and kept on disk.
//!
//! # Modules
//!
//! - `kernel`: index templates, size checks and unfolded kernels
//! - `cache`: on-disk template store keyed by (image size, kernel size)
//! - `data`: im2col unfolding of image data
//! - `batch`: pre-generation of whole template sets
//! - `conv`: convolution through the unfolded matrices
//! - `config`: JSON configuration for the `generate_templates` binary

pub mod batch;
pub mod cache;
pub mod config;
pub mod conv;
pub mod data;
pub mod error;
pub mod kernel;

pub use batch::{default_template_ranges, generate_template_set, BatchReport, TemplateRange};
pub use cache::{TemplateCache, TemplateSource};
pub use data::unfold_data;
pub use error::{Result, UnfoldError};
pub use kernel::{get_unfolded_kernel, IndexTemplate, TemplateCell, UnfoldedKernelBuilder};

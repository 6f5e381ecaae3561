//! Error types for kernel and data unfolding
//!
//! Every fallible operation in this crate returns [`Result`]. Validation
//! failures are raised before any template is generated or written to disk.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnfoldError {
    /// The kernel is not a square matrix.
    #[error("the kernel has to be a square matrix, got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    /// A size does not fit: kernel larger than the image, a zero dimension,
    /// or an unfolded matrix whose shape does not match (n, k).
    #[error("size error: {0}")]
    Size(String),

    /// A cached template parsed as JSON but does not describe a valid template.
    #[error("malformed kernel template: {0}")]
    TemplateFormat(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UnfoldError>;

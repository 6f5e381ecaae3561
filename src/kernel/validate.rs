//! Shape checks shared by the kernel unfolding routines

use crate::error::{Result, UnfoldError};

/// Expected shape of an unfolded kernel (or its index template) for an
/// `n x n` image and a `k x k` kernel: `((n - k + 1)^2, n^2)`.
///
/// Returns a `SizeError` for `k == 0` or `k > n`.
pub fn unfolded_shape(n: usize, k: usize) -> Result<(usize, usize)> {
    if k == 0 {
        return Err(UnfoldError::Size("the kernel size must be at least 1".to_string()));
    }
    if k > n {
        return Err(UnfoldError::Size(format!(
            "the kernel has to be smaller than the image (kernel {}, image {})",
            k, n
        )));
    }
    let windows = n - k + 1;
    Ok((windows * windows, n * n))
}

/// Checks that sizes are plausible before anything is generated.
///
/// With `ker_orig_size == None` the shape is a raw kernel: it must be square
/// (`ShapeError` otherwise) and no larger than `n` (`SizeError`).
///
/// With `Some(k)` the shape belongs to an already unfolded kernel or index
/// template and must equal `((n - k + 1)^2, n^2)`.
pub fn check_sizes(shape: (usize, usize), n: usize, ker_orig_size: Option<usize>) -> Result<()> {
    let (rows, cols) = shape;
    match ker_orig_size {
        None => {
            if rows != cols {
                return Err(UnfoldError::Shape { rows, cols });
            }
            unfolded_shape(n, rows).map(|_| ())
        }
        Some(k) => {
            let expected = unfolded_shape(n, k)?;
            if expected != shape {
                return Err(UnfoldError::Size(format!(
                    "the unfolded kernel has the wrong size for image {} and kernel {}: expected {:?}, got {:?}",
                    n, k, expected, shape
                )));
            }
            Ok(())
        }
    }
}

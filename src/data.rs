//! im2col unfolding of image data
//!
//! Each sliding `k x k` window of an `n x m` matrix becomes one row of the
//! output, flattened row-major. Windows are visited row offset first, then
//! column offset. Nothing is cached since the result depends on the data.

use crate::error::{Result, UnfoldError};
use ndarray::{s, Array2, ArrayView2};

/// Unfolds `x` (`n x m`) into a `((n - k + 1) * (m - k + 1), k^2)` matrix.
///
/// Returns a `SizeError` if `k` is zero or larger than either dimension of `x`.
///
/// # Example
///
/// ```
/// use cnn_unfold::unfold_data;
/// use ndarray::arr2;
///
/// let x = arr2(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
/// let xx = unfold_data(&x.view(), 2).unwrap();
/// assert_eq!(xx, arr2(&[[1, 2, 4, 5], [2, 3, 5, 6], [4, 5, 7, 8], [5, 6, 8, 9]]));
/// ```
pub fn unfold_data<T: Clone>(x: &ArrayView2<'_, T>, k: usize) -> Result<Array2<T>> {
    let (n, m) = x.dim();
    if k == 0 || k > n || k > m {
        return Err(UnfoldError::Size(format!(
            "a {}x{} window does not fit into a {}x{} matrix",
            k, k, n, m
        )));
    }

    let out_rows = (n - k + 1) * (m - k + 1);
    let mut flat = Vec::with_capacity(out_rows * k * k);
    for i in 0..=n - k {
        for j in 0..=m - k {
            flat.extend(x.slice(s![i..i + k, j..j + k]).iter().cloned());
        }
    }

    Array2::from_shape_vec((out_rows, k * k), flat).map_err(|e| UnfoldError::Size(e.to_string()))
}

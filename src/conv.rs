//! Valid 2D convolution expressed through the unfolded matrices
//!
//! All routines here compute the stride-1, unpadded cross-correlation
//! `out[i, j] = sum_{r, c} ker[r, c] * image[i + r, j + c]`, which is the
//! operation the unfolded kernel encodes (no kernel flip).

use crate::data::unfold_data;
use crate::error::{Result, UnfoldError};
use crate::kernel::unfolded::UnfoldedKernelBuilder;
use ndarray::{Array1, Array2, ArrayView2, LinalgScalar};

fn check_square_kernel<T>(ker: &ArrayView2<'_, T>) -> Result<usize> {
    let (rows, cols) = ker.dim();
    if rows != cols {
        return Err(UnfoldError::Shape { rows, cols });
    }
    Ok(rows)
}

/// Convolves a square `n x n` image as one matrix-vector product with the
/// unfolded kernel. The kernel template comes from the builder's cache.
pub fn convolve_unfolded<T: LinalgScalar>(
    builder: &UnfoldedKernelBuilder,
    ker: &ArrayView2<'_, T>,
    image: &ArrayView2<'_, T>,
) -> Result<Array2<T>> {
    let (n, m) = image.dim();
    if n != m {
        return Err(UnfoldError::Size(format!(
            "the unfolded kernel needs a square image, got {}x{}",
            n, m
        )));
    }

    let uf = builder.get_unfolded_kernel(ker, n)?;
    let image_vec: Array1<T> = image.iter().copied().collect();
    let windows = n - ker.nrows() + 1;

    uf.dot(&image_vec)
        .into_shape((windows, windows))
        .map_err(|e| UnfoldError::Size(e.to_string()))
}

/// Convolves an `n x m` image by multiplying its im2col unfolding with the
/// flattened kernel.
pub fn convolve_im2col<T: LinalgScalar>(ker: &ArrayView2<'_, T>, image: &ArrayView2<'_, T>) -> Result<Array2<T>> {
    let k = check_square_kernel(ker)?;
    let (n, m) = image.dim();

    let xx = unfold_data(image, k)?;
    let ker_vec: Array1<T> = ker.iter().copied().collect();

    xx.dot(&ker_vec)
        .into_shape((n - k + 1, m - k + 1))
        .map_err(|e| UnfoldError::Size(e.to_string()))
}

/// Reference implementation with explicit loops.
pub fn convolve_direct<T: LinalgScalar>(ker: &ArrayView2<'_, T>, image: &ArrayView2<'_, T>) -> Result<Array2<T>> {
    let k = check_square_kernel(ker)?;
    let (n, m) = image.dim();
    if k == 0 || k > n || k > m {
        return Err(UnfoldError::Size(format!(
            "a {}x{} kernel does not fit into a {}x{} image",
            k, k, n, m
        )));
    }

    let mut out = Array2::zeros((n - k + 1, m - k + 1));
    for ((i, j), value) in out.indexed_iter_mut() {
        let mut acc = T::zero();
        for r in 0..k {
            for c in 0..k {
                acc = acc + ker[[r, c]] * image[[i + r, j + c]];
            }
        }
        *value = acc;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TemplateCache;
    use approx::assert_relative_eq;
    use ndarray::arr2;
    use tempfile::tempdir;

    fn ramp(n: usize, m: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, m), |(i, j)| ((i * 7 + j * 3) % 11) as f64 - 4.5)
    }

    #[test]
    fn test_direct_convolution_small() {
        let ker = arr2(&[[1, 0], [0, -1]]);
        let image = arr2(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let out = convolve_direct(&ker.view(), &image.view()).unwrap();
        assert_eq!(out, arr2(&[[-4, -4], [-4, -4]]));
    }

    #[test]
    fn test_all_paths_agree() {
        let dir = tempdir().unwrap();
        let builder = UnfoldedKernelBuilder::new(TemplateCache::new(dir.path()));

        for n in 3..=7 {
            for k in 1..=3 {
                let ker = Array2::from_shape_fn((k, k), |(r, c)| 0.25 * (r as f64) - 0.5 * (c as f64) + 1.0);
                let image = ramp(n, n);

                let direct = convolve_direct(&ker.view(), &image.view()).unwrap();
                let unfolded = convolve_unfolded(&builder, &ker.view(), &image.view()).unwrap();
                let im2col = convolve_im2col(&ker.view(), &image.view()).unwrap();

                assert_eq!(direct.dim(), (n - k + 1, n - k + 1));
                for ((a, b), c) in direct.iter().zip(unfolded.iter()).zip(im2col.iter()) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-9);
                    assert_relative_eq!(*a, *c, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_im2col_rectangular_image() {
        let ker = arr2(&[[1.0f64, 2.0], [3.0, 4.0]]);
        let image = ramp(4, 6);
        let direct = convolve_direct(&ker.view(), &image.view()).unwrap();
        let im2col = convolve_im2col(&ker.view(), &image.view()).unwrap();
        assert_eq!(im2col.dim(), (3, 5));
        for (a, b) in direct.iter().zip(im2col.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unfolded_rejects_rectangular_image() {
        let dir = tempdir().unwrap();
        let builder = UnfoldedKernelBuilder::new(TemplateCache::new(dir.path()));
        let ker = Array2::<f64>::ones((2, 2));
        let image = ramp(3, 4);
        assert!(matches!(
            convolve_unfolded(&builder, &ker.view(), &image.view()),
            Err(UnfoldError::Size(_))
        ));
    }

    #[test]
    fn test_non_square_kernel_is_shape_error() {
        let ker = Array2::<f64>::ones((2, 3));
        let image = ramp(4, 4);
        assert!(matches!(
            convolve_direct(&ker.view(), &image.view()),
            Err(UnfoldError::Shape { .. })
        ));
        assert!(matches!(
            convolve_im2col(&ker.view(), &image.view()),
            Err(UnfoldError::Shape { .. })
        ));
    }
}

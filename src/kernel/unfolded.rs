//! Unfolded kernels built from index templates
//!
//! The numeric kernel is substituted into a template obtained from a
//! [`TemplateCache`]: index cells take the matching value of the flattened
//! kernel and padding cells become zero.

use crate::cache::{TemplateCache, TemplateSource};
use crate::error::{Result, UnfoldError};
use crate::kernel::template::{first_row, shifted_rows, IndexTemplate, TemplateCell};
use crate::kernel::validate::check_sizes;
use ndarray::{Array2, ArrayView2};
use num_traits::Zero;

/// Produces unfolded kernels, reusing templates from a cache.
///
/// # Example
///
/// ```no_run
/// use cnn_unfold::{TemplateCache, UnfoldedKernelBuilder};
/// use ndarray::arr2;
///
/// let builder = UnfoldedKernelBuilder::new(TemplateCache::new("uf_kernel_tpls"));
/// let uf = builder.get_unfolded_kernel(&arr2(&[[1.0f32, 2.0], [3.0, 4.0]]).view(), 3).unwrap();
/// assert_eq!(uf.dim(), (4, 9));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnfoldedKernelBuilder {
    cache: TemplateCache,
}

impl UnfoldedKernelBuilder {
    pub fn new(cache: TemplateCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Unfolds `ker` (`k x k`) for an `n x n` image into a
    /// `((n - k + 1)^2, n^2)` matrix.
    ///
    /// Loads the (n, k) template from the cache, generating and storing it
    /// when absent.
    pub fn get_unfolded_kernel<T>(&self, ker: &ArrayView2<'_, T>, n: usize) -> Result<Array2<T>>
    where
        T: Clone + Zero,
    {
        self.get_unfolded_kernel_with_source(ker, n).map(|(uf, _)| uf)
    }

    /// Same as [`get_unfolded_kernel`](Self::get_unfolded_kernel), also
    /// reporting whether the template was read from the cache.
    pub fn get_unfolded_kernel_with_source<T>(
        &self,
        ker: &ArrayView2<'_, T>,
        n: usize,
    ) -> Result<(Array2<T>, TemplateSource)>
    where
        T: Clone + Zero,
    {
        check_sizes(ker.dim(), n, None)?;
        let (template, source) = self.cache.get_or_generate(n, ker.nrows())?;
        Ok((apply_template(&template, ker)?, source))
    }
}

/// Free-function form of [`UnfoldedKernelBuilder::get_unfolded_kernel`].
pub fn get_unfolded_kernel<T>(cache: &TemplateCache, ker: &ArrayView2<'_, T>, n: usize) -> Result<Array2<T>>
where
    T: Clone + Zero,
{
    check_sizes(ker.dim(), n, None)?;
    let (template, _) = cache.get_or_generate(n, ker.nrows())?;
    apply_template(&template, ker)
}

/// Substitutes the values of `ker` into `template`.
pub fn apply_template<T>(template: &IndexTemplate, ker: &ArrayView2<'_, T>) -> Result<Array2<T>>
where
    T: Clone + Zero,
{
    check_sizes(ker.dim(), template.image_size(), None)?;
    if ker.nrows() != template.kernel_size() {
        return Err(UnfoldError::Size(format!(
            "template is for a {0}x{0} kernel, got {1}x{1}",
            template.kernel_size(),
            ker.nrows()
        )));
    }

    // row-major, whatever the memory layout of `ker`
    let ker_vec: Vec<T> = ker.iter().cloned().collect();
    Ok(template.cells().map(|cell| match *cell {
        TemplateCell::Index(i) => ker_vec[i].clone(),
        TemplateCell::Padding => T::zero(),
    }))
}

/// Unfolds `ker` directly, without consulting or filling any cache.
pub fn unfold_kernel_values<T>(ker: &ArrayView2<'_, T>, n: usize) -> Result<Array2<T>>
where
    T: Clone + Zero,
{
    check_sizes(ker.dim(), n, None)?;
    let row = first_row(ker, n, T::zero());
    Ok(shifted_rows(&row, n, ker.nrows()))
}

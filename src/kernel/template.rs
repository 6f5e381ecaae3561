//! Index templates for unfolded kernels
//!
//! An index template records, for every entry of an unfolded kernel, which
//! cell of the flattened `k x k` kernel lands there, or that the entry is
//! zero padding. It depends only on the image size `n` and the kernel size
//! `k`, so it can be generated once and reused for any kernel values.

use crate::error::{Result, UnfoldError};
use crate::kernel::validate::check_sizes;
use ndarray::{Array2, ArrayView2};

/// One entry of an index template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCell {
    /// Zero-based row-major index into the flattened kernel.
    Index(usize),
    /// No kernel value reaches this entry.
    Padding,
}

impl TemplateCell {
    /// Raw value used in the cache file: the index itself, or -1 for padding.
    pub fn to_raw(self) -> i64 {
        match self {
            TemplateCell::Index(i) => i as i64,
            TemplateCell::Padding => -1,
        }
    }

    /// Parses a raw cache value for a `k x k` kernel.
    pub fn from_raw(raw: i64, k: usize) -> Result<Self> {
        let cells = (k * k) as i64;
        match raw {
            -1 => Ok(TemplateCell::Padding),
            i if (0..cells).contains(&i) => Ok(TemplateCell::Index(i as usize)),
            other => Err(UnfoldError::TemplateFormat(format!(
                "index {} is outside [-1, {}] for a {}x{} kernel",
                other,
                cells - 1,
                k,
                k
            ))),
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            TemplateCell::Index(i) => Some(i),
            TemplateCell::Padding => None,
        }
    }

    pub fn is_padding(self) -> bool {
        self == TemplateCell::Padding
    }
}

/// Index template for an `n x n` image and a `k x k` kernel.
///
/// Shape is always `((n - k + 1)^2, n^2)`; row `i * (n - k + 1) + j` belongs
/// to the window whose top-left corner sits at row `i`, column `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTemplate {
    image_size: usize,
    kernel_size: usize,
    cells: Array2<TemplateCell>,
}

impl IndexTemplate {
    /// Wraps a cell matrix after checking its shape and indices against (n, k).
    pub fn from_cells(cells: Array2<TemplateCell>, n: usize, k: usize) -> Result<Self> {
        check_sizes(cells.dim(), n, Some(k))?;
        if let Some(bad) = cells.iter().find_map(|c| c.index().filter(|&i| i >= k * k)) {
            return Err(UnfoldError::TemplateFormat(format!(
                "index {} is out of range for a {}x{} kernel",
                bad, k, k
            )));
        }
        Ok(Self {
            image_size: n,
            kernel_size: k,
            cells,
        })
    }

    /// Builds a template from the list-of-rows form stored in cache files.
    pub fn from_rows(rows: Vec<Vec<i64>>, n: usize, k: usize) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_sizes((height, width), n, Some(k))?;
        if let Some(pos) = rows.iter().position(|r| r.len() != width) {
            return Err(UnfoldError::TemplateFormat(format!(
                "row {} has {} entries, expected {}",
                pos,
                rows[pos].len(),
                width
            )));
        }

        let mut flat = Vec::with_capacity(height * width);
        for raw in rows.into_iter().flatten() {
            flat.push(TemplateCell::from_raw(raw, k)?);
        }
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| UnfoldError::TemplateFormat(e.to_string()))?;

        Ok(Self {
            image_size: n,
            kernel_size: k,
            cells,
        })
    }

    /// List-of-rows form with -1 for padding.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|c| c.to_raw()).collect())
            .collect()
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn cells(&self) -> ArrayView2<'_, TemplateCell> {
        self.cells.view()
    }

    /// `true` wherever the template holds padding.
    pub fn padding_mask(&self) -> Array2<bool> {
        self.cells.mapv(TemplateCell::is_padding)
    }
}

/// Numbered `k x k` kernel: entry `(i, j)` holds `i * k + j + 1`.
///
/// i.e. for `k = 2`: `[[1, 2], [3, 4]]`
pub fn generate_kernel_template(k: usize) -> Array2<usize> {
    Array2::from_shape_fn((k, k), |(i, j)| i * k + j + 1)
}

/// Lays the kernel out as the top-left window of an `n x n` field flattened
/// row-major: each kernel row followed by `n - k` empty slots, then empty
/// slots up to `n^2`.
pub(crate) fn first_row<T: Clone>(ker: &ArrayView2<'_, T>, n: usize, empty: T) -> Vec<T> {
    let k = ker.nrows();
    let mut row = Vec::with_capacity(n * n);
    for ker_row in ker.rows() {
        row.extend(ker_row.iter().cloned());
        row.extend(std::iter::repeat(empty.clone()).take(n - k));
    }
    row.resize(n * n, empty);
    row
}

/// Stacks one copy of `first_row` per window, rotated right by `i * n + j`
/// for the window at `(i, j)`.
///
/// The largest shift is `(n - k) * n + (n - k)`, and every kernel value in
/// `first_row` sits in a column `c < k` of its image row, so a shift of
/// `j <= n - k` columns never carries a value past the end of its image row
/// and the shift of `i` full rows never wraps past `n^2`.
pub(crate) fn shifted_rows<T: Clone>(first_row: &[T], n: usize, k: usize) -> Array2<T> {
    let windows = n - k + 1;
    let len = first_row.len();
    Array2::from_shape_fn((windows * windows, len), |(row, col)| {
        let shift = (row / windows) * n + row % windows;
        first_row[(col + len - shift) % len].clone()
    })
}

/// Unfolds a numbered kernel template into the index template for an
/// `n x n` image.
///
/// Kernel value `v >= 1` becomes `Index(v - 1)`; empty slots and zeros become
/// `Padding`.
pub fn unfold_kernel(ker: &ArrayView2<'_, usize>, n: usize) -> Result<IndexTemplate> {
    check_sizes(ker.dim(), n, None)?;
    let k = ker.nrows();

    let numbered = ker.mapv(|v| match v {
        0 => TemplateCell::Padding,
        v => TemplateCell::Index(v - 1),
    });
    let row = first_row(&numbered.view(), n, TemplateCell::Padding);

    IndexTemplate::from_cells(shifted_rows(&row, n, k), n, k)
}

/// Generates the index template for (n, k) from scratch.
pub fn generate_index_template(n: usize, k: usize) -> Result<IndexTemplate> {
    unfold_kernel(&generate_kernel_template(k).view(), n)
}

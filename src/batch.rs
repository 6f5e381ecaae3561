//! Batch generation of kernel templates
//!
//! Fills a [`TemplateCache`] with every template in a list of
//! (image size, kernel size range) entries, so later calls to
//! [`UnfoldedKernelBuilder::get_unfolded_kernel`] only read from disk.

use crate::cache::TemplateCache;
use crate::error::Result;
use crate::kernel::template::generate_kernel_template;
use crate::kernel::unfolded::UnfoldedKernelBuilder;
use serde::Deserialize;
use std::ops::Range;

/// Image size together with a half-open range of kernel sizes.
///
/// Deserializes from either `[image_size, k_min, k_max]` or
/// `{"image_size": .., "k_min": .., "k_max": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "TemplateRangeRepr")]
pub struct TemplateRange {
    pub image_size: usize,
    /// First kernel size (inclusive)
    pub k_min: usize,
    /// Last kernel size (exclusive)
    pub k_max: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateRangeRepr {
    Triple(usize, usize, usize),
    Named {
        image_size: usize,
        k_min: usize,
        k_max: usize,
    },
}

impl From<TemplateRangeRepr> for TemplateRange {
    fn from(repr: TemplateRangeRepr) -> Self {
        match repr {
            TemplateRangeRepr::Triple(image_size, k_min, k_max)
            | TemplateRangeRepr::Named {
                image_size,
                k_min,
                k_max,
            } => TemplateRange::new(image_size, k_min, k_max),
        }
    }
}

impl TemplateRange {
    pub fn new(image_size: usize, k_min: usize, k_max: usize) -> Self {
        Self {
            image_size,
            k_min,
            k_max,
        }
    }

    pub fn kernel_sizes(&self) -> Range<usize> {
        self.k_min..self.k_max
    }
}

/// Default ranges: 28x28, 48x48 and 56x56 images with every kernel size
/// from 1 up to (not including) the image size.
pub fn default_template_ranges() -> Vec<TemplateRange> {
    vec![
        TemplateRange::new(28, 1, 28),
        TemplateRange::new(48, 1, 48),
        TemplateRange::new(56, 1, 56),
    ]
}

/// (image size, kernel size) pairs touched by [`generate_template_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: Vec<(usize, usize)>,
    pub skipped: Vec<(usize, usize)>,
}

/// Generates and stores every template in `ranges` that the cache does not
/// hold yet. Stops at the first error.
pub fn generate_template_set(cache: &TemplateCache, ranges: &[TemplateRange]) -> Result<BatchReport> {
    let builder = UnfoldedKernelBuilder::new(cache.clone());
    let mut report = BatchReport::default();

    for range in ranges {
        for k in range.kernel_sizes() {
            let n = range.image_size;
            log::debug!("Image size: {:>5} | Kernel size: {:>5}", n, k);

            if cache.contains(n, k) {
                report.skipped.push((n, k));
                continue;
            }
            let ker = generate_kernel_template(k);
            builder.get_unfolded_kernel(&ker.view(), n)?;
            report.generated.push((n, k));
        }
    }

    log::info!(
        "Template set done: {} generated, {} already cached",
        report.generated.len(),
        report.skipped.len()
    );
    Ok(report)
}

//! On-disk cache for index templates
//!
//! Templates are stored one per (image size, kernel size) pair as
//! `<dir>/ufkernel_{n}_{k}.tpl`, a JSON list of rows of integers with -1 for
//! padding. Entries are created lazily and never rewritten or removed by this
//! crate. There is no locking: two processes storing the same pair race and
//! the last writer wins.

use crate::error::Result;
use crate::kernel::template::{generate_index_template, IndexTemplate};
use crate::kernel::validate::check_sizes;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory used by [`TemplateCache::default`], relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "uf_kernel_tpls";

/// Where a template handed out by [`TemplateCache::get_or_generate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    Cached,
    Generated,
}

/// File-backed template store rooted at an explicit directory.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl TemplateCache {
    /// Creates a cache rooted at `dir`. The directory is created on the first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for an `n x n` image and a `k x k` kernel.
    pub fn path_for(&self, n: usize, k: usize) -> PathBuf {
        self.dir.join(format!("ufkernel_{}_{}.tpl", n, k))
    }

    pub fn contains(&self, n: usize, k: usize) -> bool {
        self.path_for(n, k).is_file()
    }

    /// Loads the template for (n, k), or `Ok(None)` if no entry exists.
    ///
    /// An entry whose shape does not match (n, k) is a `SizeError`.
    pub fn load(&self, n: usize, k: usize) -> Result<Option<IndexTemplate>> {
        let path = self.path_for(n, k);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let rows: Vec<Vec<i64>> = serde_json::from_str(&contents)?;
        let template = IndexTemplate::from_rows(rows, n, k)?;

        log::debug!("Template cache hit: {}", path.display());
        Ok(Some(template))
    }

    /// Writes `template` as the entry for (n, k).
    ///
    /// The shape is checked again against (n, k) before anything touches the disk.
    pub fn store(&self, template: &IndexTemplate, n: usize, k: usize) -> Result<()> {
        check_sizes(template.shape(), n, Some(k))?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(n, k);
        let json = serde_json::to_string(&template.to_rows())?;
        fs::write(&path, json)?;

        log::info!("Saved kernel template for image {} / kernel {} to {}", n, k, path.display());
        Ok(())
    }

    /// Returns the cached template for (n, k), generating and storing it first
    /// when there is no entry yet.
    pub fn get_or_generate(&self, n: usize, k: usize) -> Result<(IndexTemplate, TemplateSource)> {
        if let Some(template) = self.load(n, k)? {
            return Ok((template, TemplateSource::Cached));
        }

        log::info!(
            "No stored kernel template for image {} / kernel {}, generating it",
            n,
            k
        );
        let template = generate_index_template(n, k)?;
        self.store(&template, n, k)?;
        Ok((template, TemplateSource::Generated))
    }
}

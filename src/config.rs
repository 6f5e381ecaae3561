//! Configuration for batch template generation
//!
//! This module provides the configuration read by the `generate_templates`
//! binary: where the template cache lives and which templates to pre-generate.

use crate::batch::{default_template_ranges, TemplateRange};
use crate::cache::{TemplateCache, DEFAULT_CACHE_DIR};
use crate::error::{Result, UnfoldError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for template generation, parsed from JSON.
///
/// Both fields are optional:
///
/// - **cache_dir**: template directory (default `uf_kernel_tpls`)
/// - **template_sets**: list of `[image_size, k_min, k_max]` triples or
///   objects with the same field names; `k_max` is exclusive
///   (default: 28, 48 and 56 pixel images with every smaller kernel)
///
/// # Example
///
/// ```json
/// {
///   "cache_dir": "uf_kernel_tpls",
///   "template_sets": [[28, 1, 28], {"image_size": 48, "k_min": 3, "k_max": 6}]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UnfoldConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_template_ranges")]
    pub template_sets: Vec<TemplateRange>,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

impl Default for UnfoldConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            template_sets: default_template_ranges(),
        }
    }
}

impl UnfoldConfig {
    pub fn cache(&self) -> TemplateCache {
        TemplateCache::new(&self.cache_dir)
    }
}

/// Loads a configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into an `UnfoldConfig` and checks
/// every template range.
///
/// # Examples
///
/// ```no_run
/// use cnn_unfold::config::load_config;
///
/// let cfg = load_config("config/templates.json").unwrap();
/// assert!(!cfg.template_sets.is_empty());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<UnfoldConfig> {
    let contents = fs::read_to_string(path)?;
    let config: UnfoldConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &UnfoldConfig) -> Result<()> {
    if config.cache_dir.as_os_str().is_empty() {
        return Err(UnfoldError::Config("cache_dir must not be empty".to_string()));
    }

    for range in &config.template_sets {
        if range.image_size == 0 {
            return Err(UnfoldError::Config("image_size must be positive".to_string()));
        }
        if range.k_min == 0 {
            return Err(UnfoldError::Config(format!(
                "k_min must be positive (image size {})",
                range.image_size
            )));
        }
        if range.k_min > range.k_max {
            return Err(UnfoldError::Config(format!(
                "k_min {} is larger than k_max {}",
                range.k_min, range.k_max
            )));
        }
        // k_max is exclusive, so image_size + 1 still only reaches k == image_size
        if range.k_max > range.image_size + 1 {
            return Err(UnfoldError::Config(format!(
                "k_max {} exceeds image size {} + 1",
                range.k_max, range.image_size
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp config");
        file.write_all(contents.as_bytes())
            .expect("failed to write temp config");
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_temp_config("{}");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert_eq!(config.template_sets, default_template_ranges());
    }

    #[test]
    fn test_k_min_above_k_max_rejected() {
        let file = write_temp_config(r#"{"template_sets": [[10, 5, 4]]}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Config(_))));
    }

    #[test]
    fn test_zero_kernel_rejected() {
        let file = write_temp_config(r#"{"template_sets": [[10, 0, 4]]}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Config(_))));
    }
}

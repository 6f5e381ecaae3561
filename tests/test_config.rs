//! Tests for configuration parsing
//!
//! This file tests the config module including:
//! - Loading full and partial JSON configs
//! - Both forms of template range entries
//! - Invalid JSON, missing files and invalid ranges

use cnn_unfold::config::{load_config, UnfoldConfig};
use cnn_unfold::{default_template_ranges, TemplateRange, UnfoldError};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

// ============================================================================
// Valid Config Loading Tests
// ============================================================================

mod valid_config_tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let file = write_temp_config(
            r#"{
  "cache_dir": "/tmp/my_templates",
  "template_sets": [[28, 1, 28], {"image_size": 48, "k_min": 3, "k_max": 6}]
}"#,
        );
        let config = load_config(file.path()).expect("Failed to load config");

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/my_templates"));
        assert_eq!(
            config.template_sets,
            vec![TemplateRange::new(28, 1, 28), TemplateRange::new(48, 3, 6)]
        );
        assert_eq!(config.cache().path_for(28, 3), PathBuf::from("/tmp/my_templates/ufkernel_28_3.tpl"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_temp_config(r#"{"template_sets": [[5, 1, 3]]}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("uf_kernel_tpls"));
        assert_eq!(config.template_sets.len(), 1);

        let file = write_temp_config(r#"{"cache_dir": "tpls"}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.template_sets, default_template_ranges());
    }

    #[test]
    fn test_kernel_equal_to_image_allowed() {
        let file = write_temp_config(r#"{"template_sets": [[5, 5, 6]]}"#);
        assert!(load_config(file.path()).is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = UnfoldConfig::default();
        assert_eq!(config.template_sets.len(), 3);
        assert_eq!(config.cache().dir(), std::path::Path::new("uf_kernel_tpls"));
    }
}

// ============================================================================
// Invalid Config Tests
// ============================================================================

mod invalid_config_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = load_config("config/does_not_exist.json");
        assert!(matches!(result, Err(UnfoldError::Io(_))));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp_config("{ not json");
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Json(_))));
    }

    #[test]
    fn test_short_triple_rejected() {
        let file = write_temp_config(r#"{"template_sets": [[28, 1]]}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Json(_))));
    }

    #[test]
    fn test_k_max_beyond_image_rejected() {
        let file = write_temp_config(r#"{"template_sets": [[5, 1, 7]]}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Config(_))));
    }

    #[test]
    fn test_zero_image_size_rejected() {
        let file = write_temp_config(r#"{"template_sets": [[0, 1, 1]]}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Config(_))));
    }

    #[test]
    fn test_empty_cache_dir_rejected() {
        let file = write_temp_config(r#"{"cache_dir": ""}"#);
        assert!(matches!(load_config(file.path()), Err(UnfoldError::Config(_))));
    }
}

//! Configuration management module
//!
//! One YAML document with a section per component. Every section falls back
//! to its defaults, so partial files are fine.

use std::fs;
use std::path::{Path, PathBuf};

use action_primitives::LazyLoadPolicy;
use cdp_adapter::CdpConfig;
use serde::{Deserialize, Serialize};
use tool_click::ClickPolicy;
use tool_scroll::ScrollPolicy;

use crate::errors::ConfigError;

/// Project-local config, checked before the per-user one.
pub const LOCAL_CONFIG_PATH: &str = "config/autoweb.yaml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cdp: CdpConfig,
    pub scroll: ScrollPolicy,
    pub lazy_load: LazyLoadPolicy,
    pub click: ClickPolicy,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll.max_scroll_steps == 0 {
            return Err(ConfigError::Invalid("scroll.max_scroll_steps must be positive".into()));
        }
        if self.scroll.min_scroll_distance > self.scroll.max_scroll_distance {
            return Err(ConfigError::Invalid(
                "scroll.min_scroll_distance exceeds scroll.max_scroll_distance".into(),
            ));
        }
        if self.click.max_retry_attempts == 0 {
            return Err(ConfigError::Invalid("click.max_retry_attempts must be positive".into()));
        }
        if self.cdp.surface.width == 0 || self.cdp.surface.height == 0 {
            return Err(ConfigError::Invalid("cdp.surface must have a non-zero size".into()));
        }
        Ok(())
    }
}

/// Default lookup order: `./config/autoweb.yaml`, then the per-user config dir.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("autoweb").join("config.yaml"));
    }
    paths
}

/// An explicit path always wins, even when missing; otherwise the first
/// existing default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_paths().into_iter().find(|path| path.exists()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "scroll:\n  max_scroll_steps: 10\nclick:\n  retry_delay_ms: 250\ncdp:\n  headless: false"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.scroll.max_scroll_steps, 10);
        assert_eq!(config.scroll.max_scroll_distance, 300.0);
        assert_eq!(config.click.retry_delay_ms, 250);
        assert_eq!(config.click.max_retry_attempts, 5);
        assert_eq!(config.lazy_load, LazyLoadPolicy::default());
        assert!(!config.cdp.headless);
        assert_eq!(config.cdp.surface.width, 375);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let err = Config::from_yaml("click:\n  max_retry_attempts: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = Config::from_yaml("scroll: [1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = Path::new("/tmp/custom-autoweb.yaml");
        assert_eq!(resolve_config_path(Some(explicit)), Some(explicit.to_path_buf()));
        assert_eq!(default_config_paths()[0], PathBuf::from(LOCAL_CONFIG_PATH));
    }
}

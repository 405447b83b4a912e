//! Startup configuration.
//!
//! Configuration only seeds the store's initial filter and style and bounds
//! re-entrant notification. Todos themselves are never read from or written
//! to disk.
//!
//! ```
//! use todo_lattice_core::{AppConfig, Filter};
//!
//! let config = AppConfig::from_toml_str(r#"
//!     filter = "active"
//!     gui_style = "Dark"
//! "#).unwrap();
//!
//! assert_eq!(config.filter, Filter::Active);
//! assert_eq!(config.gui_style.as_deref(), Some("Dark"));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};
use crate::signal::DEFAULT_MAX_EMIT_DEPTH;
use crate::todo::Filter;

/// Store configuration, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Filter active at startup.
    pub filter: Filter,
    /// Style applied at startup. `None` keeps the style host's default.
    pub gui_style: Option<String>,
    /// Bound on nested event emission.
    pub max_emit_depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filter: Filter::All,
            gui_style: None,
            max_emit_depth: DEFAULT_MAX_EMIT_DEPTH,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| TodoError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TodoError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: "todo_lattice_core::config",
            path = %path.display(),
            filter = %config.filter,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| TodoError::config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.max_emit_depth == 0 {
            return Err(TodoError::config("max_emit_depth must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_emit_depth, DEFAULT_MAX_EMIT_DEPTH);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            filter = "completed"
            gui_style = "HighContrast"
            max_emit_depth = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.filter, Filter::Completed);
        assert_eq!(config.gui_style.as_deref(), Some("HighContrast"));
        assert_eq!(config.max_emit_depth, 8);
    }

    #[test]
    fn test_filter_name_is_case_insensitive() {
        let config = AppConfig::from_toml_str(r#"filter = "Active""#).unwrap();
        assert_eq!(config.filter, Filter::Active);

        let config = AppConfig::from_toml_str(r#"filter = " COMPLETED ""#).unwrap();
        assert_eq!(config.filter, Filter::Completed);
    }

    #[test]
    fn test_filter_serializes_lowercase() {
        let config = AppConfig {
            filter: Filter::Completed,
            ..AppConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains(r#"filter = "completed""#));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let err = AppConfig::from_toml_str(r#"filter = "done""#).unwrap_err();
        assert!(matches!(err, TodoError::Config { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AppConfig::from_toml_str(r#"todos = ["a"]"#).unwrap_err();
        assert!(matches!(err, TodoError::Config { .. }));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = AppConfig::from_toml_str("max_emit_depth = 0").unwrap_err();
        assert!(err.to_string().contains("max_emit_depth"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/todo-lattice.toml").unwrap_err();
        assert!(matches!(err, TodoError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.toml");
        std::fs::write(&path, "filter = \"active\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.filter, Filter::Active);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig {
            filter: Filter::Active,
            gui_style: Some("Dark".into()),
            max_emit_depth: 16,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}

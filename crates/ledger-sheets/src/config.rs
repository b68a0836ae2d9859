//! Session configuration
//!
//! A session is configured from a TOML file; every field is optional.
//!
//! ```toml
//! workbook_name = "Budget 2024"
//! default_rows = 200
//! history_limit = 500
//! user_name = "Dana"
//! ```

use std::path::{Path, PathBuf};

use ledger_sheets_core::{Dimensions, Workbook, DEFAULT_COLS, DEFAULT_ROWS};
use serde::Deserialize;
use thiserror::Error;

use crate::state::{StoreState, UserIdentity, MAX_ZOOM, MIN_ZOOM};
use crate::store::Store;

/// Errors from loading a session configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Settings for one editing session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub workbook_id: String,
    pub workbook_name: String,
    /// Rows in new sheets
    pub default_rows: u32,
    /// Columns in new sheets
    pub default_cols: u32,
    /// Keep at most this many history entries (unbounded when absent)
    pub history_limit: Option<usize>,
    pub user_id: String,
    pub user_name: String,
    pub zoom: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let user = UserIdentity::default();
        Self {
            workbook_id: "workbook-1".to_string(),
            workbook_name: "Untitled".to_string(),
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
            history_limit: None,
            user_id: user.id,
            user_name: user.name,
            zoom: 1.0,
        }
    }
}

impl SessionConfig {
    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_rows == 0 || self.default_cols == 0 {
            return Err(ConfigError::Invalid(
                "default_rows and default_cols must be at least 1".to_string(),
            ));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom must be between {} and {}, got {}",
                MIN_ZOOM, MAX_ZOOM, self.zoom
            )));
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid("user_id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Dimensions for new sheets
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.default_rows, self.default_cols)
    }

    /// The session user
    pub fn user(&self) -> UserIdentity {
        UserIdentity::new(self.user_id.clone(), self.user_name.clone())
    }

    /// An empty workbook with the configured id, name and dimensions
    pub fn new_workbook(&self) -> Workbook {
        Workbook::with_dimensions(
            self.workbook_id.clone(),
            self.workbook_name.clone(),
            self.dimensions(),
        )
    }

    /// A store for `workbook` with the configured user, zoom and history limit
    pub fn build_store(&self, workbook: Workbook) -> Store {
        let state = StoreState::new(workbook, self.user()).with_zoom(self.zoom);
        Store::from_state(state).with_history_limit(self.history_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.dimensions(), Dimensions::new(100, 26));
    }

    #[test]
    fn test_partial_config() {
        let config = SessionConfig::from_toml_str(
            r#"
            workbook_name = "Budget"
            history_limit = 10
            zoom = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.workbook_name, "Budget");
        assert_eq!(config.history_limit, Some(10));

        let store = config.build_store(config.new_workbook());
        assert_eq!(store.state().zoom, 1.5);
        assert_eq!(store.history().limit(), Some(10));
        assert_eq!(store.state().workbook.name(), "Budget");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SessionConfig::from_toml_str("zoom = 9.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("default_rows = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }
}

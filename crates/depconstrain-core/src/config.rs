//! Loader configuration (depconstrain.toml)
//!
//! ```toml
//! sort-policy = "strict"
//! xml-file-name = "constraints.xml"
//! json-file-name = "dependency-constraints.json"
//! ```
//!
//! Every key is optional.

use crate::errors::{ConstrainError, ConstrainErrorKind};
use crate::model::SortPolicy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// File name of the tag-stream encoded constraints file
pub const DEFAULT_XML_FILE_NAME: &str = "constraints.xml";

/// File name of the schema-tree encoded constraints file
pub const DEFAULT_JSON_FILE_NAME: &str = "dependency-constraints.json";

/// Settings for locating and validating constraint files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoaderConfig {
    /// Ordering policy applied by the tag-stream reader
    pub sort_policy: SortPolicy,

    pub xml_file_name: String,

    pub json_file_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sort_policy: SortPolicy::Preserve,
            xml_file_name: DEFAULT_XML_FILE_NAME.to_string(),
            json_file_name: DEFAULT_JSON_FILE_NAME.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Same as the default configuration but with ordering enforced
    pub fn strict() -> Self {
        Self::default().with_sort_policy(SortPolicy::Strict)
    }

    pub fn with_sort_policy(mut self, policy: SortPolicy) -> Self {
        self.sort_policy = policy;
        self
    }

    /// Load config from a TOML string
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on invalid TOML, unknown keys or an empty file
    /// name.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: LoaderConfig =
            toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`LoaderConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("xml-file-name", &self.xml_file_name),
            ("json-file-name", &self.json_file_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Parse(format!("`{}` must not be empty", key)));
            }
        }
        if self.xml_file_name == self.json_file_name {
            return Err(ConfigError::Parse(
                "`xml-file-name` and `json-file-name` must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ConfigError> for ConstrainError {
    fn from(err: ConfigError) -> Self {
        ConstrainError::new(ConstrainErrorKind::Config)
            .with_op("load_config")
            .with_message(err.to_string())
            .with_source(err)
    }
}

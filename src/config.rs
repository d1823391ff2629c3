//! Filter configuration.
//!
//! The foreign entry point always runs with [`FilterConfig::default`]. Rust
//! callers embedding [`crate::RecordTransformer`] directly can load a config
//! from YAML:
//!
//! ```yaml
//! time_key: time
//! tag_key: tag
//! original_key: original
//! time_format: rfc3339   # or host_long
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::time_format::TimeFormat;

/// Keys and time format used when enriching a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Key receiving the formatted record timestamp
    pub time_key: String,

    /// Key receiving the record tag
    pub tag_key: String,

    /// Key receiving the unmodified payload text
    pub original_key: String,

    pub time_format: TimeFormat,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            time_key: "time".to_string(),
            tag_key: "tag".to_string(),
            original_key: "original".to_string(),
            time_format: TimeFormat::default(),
        }
    }
}

impl FilterConfig {
    /// Parse and validate a config from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, FilterError> {
        let config: FilterConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file.
    ///
    /// # Example
    /// ```ignore
    /// use enrich_filter::FilterConfig;
    ///
    /// let config = FilterConfig::load_from_file("config/filter.yaml")?;
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Keys must be non-empty and distinct, otherwise one injected field
    /// would silently overwrite another.
    pub fn validate(&self) -> Result<(), FilterError> {
        let keys = [
            ("time_key", &self.time_key),
            ("tag_key", &self.tag_key),
            ("original_key", &self.original_key),
        ];

        for (name, key) in keys {
            if key.is_empty() {
                return Err(FilterError::InvalidConfig(format!("'{}' must not be empty", name)));
            }
        }

        for (i, (name, key)) in keys.iter().enumerate() {
            if let Some((other, _)) = keys[i + 1..].iter().find(|(_, k)| k == key) {
                return Err(FilterError::InvalidConfig(format!(
                    "'{}' and '{}' both use key '{}'",
                    name, other, key
                )));
            }
        }

        Ok(())
    }
}

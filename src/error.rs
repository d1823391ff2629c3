//! Error type for record filtering and configuration loading.
//!
//! None of these errors cross the foreign boundary: the entry point collapses
//! every variant into a null result and reports the detail through `tracing`.

use std::fmt;

/// Error type for filter operations
#[derive(Debug)]
pub enum FilterError {
    /// Payload bytes are not valid UTF-8
    InvalidUtf8(std::str::Utf8Error),
    /// Payload text is not well-formed JSON
    Parse(serde_json::Error),
    /// Payload nests containers deeper than the filter accepts
    TooDeep {
        depth: usize,
        limit: usize,
    },
    /// Payload parsed, but its root is not an object
    NotAnObject {
        found: &'static str,
    },
    /// Enriched document could not be serialized
    Serialize(serde_json::Error),
    /// Serialized output contained a NUL byte before the sentinel
    EmbeddedNul {
        position: usize,
    },
    /// Input pointer was null while its length was non-zero
    NullPointer {
        argument: &'static str,
        len: usize,
    },
    InvalidConfig(String),
    ConfigIo(std::io::Error),
    ConfigParse(serde_yaml::Error),
}

impl FilterError {
    /// True for failures caused by the record itself rather than by the
    /// filter or its caller.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            FilterError::InvalidUtf8(_)
                | FilterError::Parse(_)
                | FilterError::TooDeep { .. }
                | FilterError::NotAnObject { .. }
        )
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidUtf8(e) => write!(f, "Payload is not valid UTF-8: {}", e),
            FilterError::Parse(e) => write!(f, "Payload is not valid JSON: {}", e),
            FilterError::TooDeep { depth, limit } => {
                write!(f, "Payload nesting depth {} exceeds limit of {}", depth, limit)
            }
            FilterError::NotAnObject { found } => {
                write!(f, "Payload root must be an object, got {}", found)
            }
            FilterError::Serialize(e) => write!(f, "Failed to serialize record: {}", e),
            FilterError::EmbeddedNul { position } => {
                write!(f, "Serialized record contains a NUL byte at offset {}", position)
            }
            FilterError::NullPointer { argument, len } => {
                write!(f, "Null pointer passed for '{}' with length {}", argument, len)
            }
            FilterError::InvalidConfig(msg) => write!(f, "Invalid filter config: {}", msg),
            FilterError::ConfigIo(e) => write!(f, "Failed to read filter config: {}", e),
            FilterError::ConfigParse(e) => write!(f, "Failed to parse filter config: {}", e),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::InvalidUtf8(e) => Some(e),
            FilterError::Parse(e) | FilterError::Serialize(e) => Some(e),
            FilterError::ConfigIo(e) => Some(e),
            FilterError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::str::Utf8Error> for FilterError {
    fn from(err: std::str::Utf8Error) -> Self {
        FilterError::InvalidUtf8(err)
    }
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::ConfigIo(err)
    }
}

impl From<serde_yaml::Error> for FilterError {
    fn from(err: serde_yaml::Error) -> Self {
        FilterError::ConfigParse(err)
    }
}

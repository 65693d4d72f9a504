use std::fmt;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while locating, reading or interpreting a `.conf` file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No file at the given path, or in any of the searched locations.
    FileNotFound(String),

    /// The file exists but could not be read.
    ReadError(String),

    /// A non-comment line without `=`.
    Syntax { line: usize, content: String },

    /// A recognised key whose value could not be interpreted.
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid_value(key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::ReadError(msg) => {
                write!(f, "Failed to read configuration file: {}", msg)
            }
            ConfigError::Syntax { line, content } => {
                write!(f, "Line {}: expected key=value, got '{}'", line, content)
            }
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, key, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

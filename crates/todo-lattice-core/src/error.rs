//! Error types for todo-lattice.

use std::path::PathBuf;

/// A specialized Result type for todo-lattice operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors raised at the store boundary.
///
/// Most store operations are total. These variants cover the few inputs that
/// arrive as untyped strings (filter and event names, style names, config
/// files) and can therefore be wrong.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// A filter name did not match `all`, `active` or `completed`.
    #[error("Invalid filter '{0}': expected one of all, active, completed")]
    InvalidFilter(String),

    /// An event name did not match any store event.
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// The style host rejected a style name.
    #[error("Unknown style '{name}' (available: {})", available.join(", "))]
    UnknownStyle {
        name: String,
        available: Vec<String>,
    },

    /// The configuration could not be parsed.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// The configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TodoError {
    /// Create an unknown-style error.
    pub fn unknown_style(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownStyle {
            name: name.into(),
            available,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_style_lists_available() {
        let err = TodoError::unknown_style("motif", vec!["Light".into(), "Dark".into()]);
        assert_eq!(
            err.to_string(),
            "Unknown style 'motif' (available: Light, Dark)"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = TodoError::io(
            "missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.toml"));
    }
}

//! Error types for dipvis operations

use thiserror::Error;

/// Result type alias for dipvis operations
pub type Result<T> = std::result::Result<T, VisError>;

/// Every way a visualization call can fail. Nothing is recovered locally,
/// each variant is surfaced to the caller as-is.
#[derive(Error, Debug)]
pub enum VisError {
    /// Image shape or value range rejected before any plotting happens
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// More pixels requested than the image holds, under the strict policy
    #[error("Sampling error: cannot draw {requested} distinct pixels from {available}")]
    Sampling { requested: usize, available: usize },

    /// A color-space conversion produced an unusable coordinate
    #[error("Color conversion error: {message}")]
    Conversion { message: String },

    /// The plotting surface could not draw a figure
    #[error("Render error: {message}")]
    Render { message: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl VisError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a configuration error with its underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_message_names_both_counts() {
        let err = VisError::Sampling { requested: 5000, available: 4 };
        assert_eq!(
            err.to_string(),
            "Sampling error: cannot draw 5000 distinct pixels from 4"
        );
    }

    #[test]
    fn config_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = VisError::config("cannot read vis.toml", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}

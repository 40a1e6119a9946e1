//! Error types for gan-smoke-rs.
//!
//! # Example
//!
//! ```rust
//! use gan_smoke_rs::{HarnessError, Result};
//!
//! fn check_key(key: &str) -> Result<()> {
//!     if key.is_empty() {
//!         return Err(HarnessError::Config("override key cannot be empty".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_key("").is_err());
//! assert!(check_key("data.loaders.batch_size").is_ok());
//! ```

use thiserror::Error;

/// Result type alias for gan-smoke-rs operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that can occur while running the smoke-test harness.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HarnessError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid configuration or suite file.
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// A dotted override key did not resolve through existing mappings.
    #[error("override `{key}` cannot be applied: segment `{segment}` is not an existing mapping")]
    Path {
        /// The full dotted key that failed to resolve.
        key: String,
        /// The segment at which resolution stopped.
        segment: String,
    },

    /// Trainer construction, setup or training error.
    #[error("trainer error: {0}")]
    Trainer(String),

    /// Experiment-tracking service error.
    #[error("tracking error: {0}")]
    Tracking(String),

    /// HTTP transport error talking to the tracking service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_error_display() {
        let error = HarnessError::Config("bad baseline".to_string());
        assert_eq!(error.to_string(), "configuration error: bad baseline");
    }

    #[test]
    fn test_path_error_display() {
        let error = HarnessError::Path {
            key: "data.loaders.batch_size".to_string(),
            segment: "loaders".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("data.loaders.batch_size"));
        assert!(msg.contains("`loaders`"));
    }

    #[test]
    fn test_trainer_error_display() {
        let error = HarnessError::Trainer("setup failed".to_string());
        assert_eq!(error.to_string(), "trainer error: setup failed");
    }

    #[test]
    fn test_tracking_error_display() {
        let error = HarnessError::Tracking("no key in response".to_string());
        assert_eq!(error.to_string(), "tracking error: no key in response");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: HarnessError = io_error.into();
        assert!(matches!(error, HarnessError::Io(_)));
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: :::").unwrap_err();
        let error: HarnessError = yaml_error.into();
        assert!(error.to_string().contains("invalid config file"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: HarnessError = io_error.into();
        assert!(error.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn ok() -> Result<u32> {
            Ok(7)
        }
        fn err() -> Result<u32> {
            Err(HarnessError::Config("nope".to_string()))
        }

        assert_eq!(ok().unwrap(), 7);
        assert!(err().is_err());
    }
}

//! Error types for the diskpass validation pipeline.
//!
//! Errors are organized by stage to provide clear, actionable error messages
//! that include relevant context (file paths, config sections, captured output).
//!
//! Processing anomalies (non-`OK` result codes) are not errors: they are
//! collected as data and reported once the batch finishes.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for diskpass operations.
#[derive(Error, Debug)]
pub enum DiskpassError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// No config file at the resolved location
    #[error("Unable to load configuration file at location: {}", .0.display())]
    NotFound(PathBuf),

    /// A section/key lookup failed or resolved to an unusable value
    #[error("In configuration file [{}], section [{section}], key [{key}] {message}", .source_path.display())]
    Lookup {
        source_path: PathBuf,
        section: String,
        key: String,
        message: String,
    },

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Batch pipeline errors, organized by stage.
///
/// Every variant is fatal: the batch stops at the first one.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The batch target is not an existing directory
    #[error("[{}] is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Listing the target directory failed
    #[error("Discovery failed in {}: {message}", .path.display())]
    Discovery { path: PathBuf, message: String },

    /// Copying the blank template or creating the validation directory failed
    #[error("Staging failed for {}: {source}", .path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The automation interpreter could not be started
    #[error("Failed to start automation `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The automation ran but exited unsuccessfully
    #[error("Automation invocation error for {}: {stderr}", .image.display())]
    Invocation { image: PathBuf, stderr: String },

    /// A staged target could not be hashed
    #[error("Hash error for {}: {source}", .path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report file could not be written
    #[error("Failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for diskpass results.
pub type Result<T> = std::result::Result<T, DiskpassError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_names_file_section_and_key() {
        let err = ConfigError::Lookup {
            source_path: PathBuf::from("/home/user/.diskpass.toml"),
            section: "base_config".to_string(),
            key: "emulator".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "In configuration file [/home/user/.diskpass.toml], section [base_config], key [emulator] not found"
        );
    }

    #[test]
    fn test_invocation_error_carries_stderr() {
        let err = PipelineError::Invocation {
            image: PathBuf::from("/disks/game.woz"),
            stderr: "execution error: Virtual ][ got an error".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/disks/game.woz"));
        assert!(message.contains("Virtual ][ got an error"));
    }

    #[test]
    fn test_pipeline_error_converts_to_top_level() {
        let err: DiskpassError = PipelineError::NotADirectory(PathBuf::from("/nope")).into();
        assert!(matches!(err, DiskpassError::Pipeline(_)));
        assert!(err.to_string().contains("[/nope] is not a directory"));
    }
}

//! Error types for a deploy pass.

use crate::report::{DeployReport, InvocationStatus};
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Region missing, nothing was attempted
    E001MissingRegion,
    /// E002: Source directory could not be listed
    E002ReadDir,
    /// E003: Import failed under the stop-on-first-failure policy
    E003ImportFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001MissingRegion => "E001",
            Self::E002ReadDir => "E002",
            Self::E003ImportFailed => "E003",
        }
    }
}

/// Errors that end a deploy pass
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("[{}] Region is required to build importer arguments", ErrorCode::E001MissingRegion.as_str())]
    MissingRegion,

    #[error(
        "[{}] Failed to list source directory {}: {}",
        ErrorCode::E002ReadDir.as_str(),
        .path.display(),
        .source
    )]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "[{}] The deployment of {} (stage {}) failed: {}",
        ErrorCode::E003ImportFailed.as_str(),
        .gateway_id,
        .stage,
        .status
    )]
    ImportFailed {
        gateway_id: String,
        stage: String,
        status: InvocationStatus,
        /// Outcomes up to and including the failed import
        report: Box<DeployReport>,
    },
}

impl DispatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingRegion => ErrorCode::E001MissingRegion,
            Self::ReadDir { .. } => ErrorCode::E002ReadDir,
            Self::ImportFailed { .. } => ErrorCode::E003ImportFailed,
        }
    }
}

/// Result type alias for DispatchError
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_codes() {
        assert!(DispatchError::MissingRegion.to_string().starts_with("[E001]"));

        let err = DispatchError::ReadDir {
            path: PathBuf::from("/usr/src"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.code(), ErrorCode::E002ReadDir);
        assert_eq!(err.to_string(), "[E002] Failed to list source directory /usr/src: gone");

        let err = DispatchError::ImportFailed {
            gateway_id: "abc".into(),
            stage: "prod".into(),
            status: InvocationStatus::Failed { code: Some(2) },
            report: Box::default(),
        };
        assert_eq!(err.code(), ErrorCode::E003ImportFailed);
        assert_eq!(
            err.to_string(),
            "[E003] The deployment of abc (stage prod) failed: exit code 2"
        );
    }
}

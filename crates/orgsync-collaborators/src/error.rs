//! Collaborator error types
//!
//! These are what the capability implementations report. The gate and the
//! orchestrator translate them into [`OrgSyncError`] at their boundary.

use orgsync_types::{OrgSyncError, Upstream};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marks failures that are worth retrying
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Directory read errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Directory unreachable: {0}")]
    Unavailable(String),

    #[error("Malformed directory response: {0}")]
    Malformed(String),
}

impl Transient for DirectoryError {
    fn is_transient(&self) -> bool {
        matches!(self, DirectoryError::Unavailable(_))
    }
}

impl From<DirectoryError> for OrgSyncError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unavailable(message) => {
                OrgSyncError::unavailable(Upstream::Directory, message)
            }
            DirectoryError::Malformed(message) => OrgSyncError::Integrity(format!(
                "malformed directory response: {}",
                message
            )),
        }
    }
}

/// A business-rule rejection reported by the HR system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrRejection {
    pub code: String,
    pub message: String,
}

impl HrRejection {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HrRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// HR system call errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HrError {
    #[error("HR system unreachable: {0}")]
    Unavailable(String),

    #[error("HR system rejected the call: {0}")]
    Rejected(HrRejection),
}

impl HrError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        HrError::Rejected(HrRejection::new(code, message))
    }
}

impl Transient for HrError {
    fn is_transient(&self) -> bool {
        matches!(self, HrError::Unavailable(_))
    }
}

/// Department listing errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Department source unreachable: {0}")]
    Unavailable(String),

    #[error("Malformed department listing: {0}")]
    Malformed(String),
}

impl Transient for SourceError {
    fn is_transient(&self) -> bool {
        matches!(self, SourceError::Unavailable(_))
    }
}

impl From<SourceError> for OrgSyncError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(message) => {
                OrgSyncError::unavailable(Upstream::HrSystem, message)
            }
            SourceError::Malformed(message) => OrgSyncError::Integrity(format!(
                "malformed department listing: {}",
                message
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(DirectoryError::Unavailable("timeout".into()).is_transient());
        assert!(!DirectoryError::Malformed("bad json".into()).is_transient());
        assert!(HrError::Unavailable("timeout".into()).is_transient());
        assert!(!HrError::rejected("E1", "nope").is_transient());
    }

    #[test]
    fn test_directory_error_conversion() {
        let err: OrgSyncError = DirectoryError::Unavailable("refused".into()).into();
        assert!(matches!(
            err,
            OrgSyncError::UpstreamUnavailable {
                system: Upstream::Directory,
                ..
            }
        ));
    }
}

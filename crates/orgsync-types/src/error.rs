//! Error taxonomy for OrgSync operations
//!
//! Every failure surfaced to a caller is one of these variants. The
//! [`ErrorClass`] tells the caller whether correcting the request, retrying
//! later, or paging an operator is the right response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream system a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upstream {
    Directory,
    HrSystem,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Directory => write!(f, "Directory"),
            Upstream::HrSystem => write!(f, "HR system"),
        }
    }
}

/// Coarse classification used for propagation decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The request must be corrected by the caller
    Client,
    /// Transient upstream failure; the caller may retry
    Transient,
    /// The HR system refused the request on its own business rules
    UpstreamRejected,
    /// Source data is malformed; needs operator attention
    Integrity,
    /// Startup-only; the process cannot run
    Fatal,
}

/// OrgSync errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgSyncError {
    /// Malformed or missing required field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced unit or address is absent in the directory
    #[error("Not found: {0}")]
    NotFound(String),

    /// Outside the authorized scope, or a disallowed top-level creation
    #[error("Policy denied: {0}")]
    Policy(String),

    /// An HR system precondition (such as a missing postal address) was violated
    #[error("Dependency order violated: {0}")]
    DependencyOrder(String),

    #[error("{system} unavailable: {message}")]
    UpstreamUnavailable { system: Upstream, message: String },

    /// Verbatim business-rule rejection from the HR system
    #[error("HR system rejected the request [{code}]: {message}")]
    UpstreamRejected { code: String, message: String },

    /// Cycle detected in an ancestor or parent chain
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for OrgSync operations
pub type Result<T> = std::result::Result<T, OrgSyncError>;

impl OrgSyncError {
    pub fn unit_not_found(uuid: &uuid::Uuid) -> Self {
        Self::NotFound(format!("organizational unit {}", uuid))
    }

    pub fn outside_allow_list(uuid: &uuid::Uuid) -> Self {
        Self::Policy(format!(
            "organizational unit {} is outside the configured allow list",
            uuid
        ))
    }

    pub fn unavailable(system: Upstream, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            system,
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_)
            | Self::NotFound(_)
            | Self::Policy(_)
            | Self::DependencyOrder(_) => ErrorClass::Client,
            Self::UpstreamUnavailable { .. } => ErrorClass::Transient,
            Self::UpstreamRejected { .. } => ErrorClass::UpstreamRejected,
            Self::Integrity(_) => ErrorClass::Integrity,
            Self::Configuration(_) => ErrorClass::Fatal,
        }
    }

    /// Only transient upstream failures are safe to retry
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transient
    }

    /// Stable machine-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Policy(_) => "policy_error",
            Self::DependencyOrder(_) => "dependency_order_error",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::Integrity(_) => "integrity_error",
            Self::Configuration(_) => "configuration_error",
        }
    }
}

//! # OrgSync Collaborators
//!
//! Capability traits for the systems OrgSync talks to, plus in-memory
//! implementations and bounded-retry decorators.
//!
//! ## Capabilities
//!
//! - [`Directory`]: read-only view of the master organization directory
//! - [`HrSystem`]: mutating calls against the HR system
//! - [`DepartmentSource`]: the HR system's department and organization listings
//!
//! Wire-level clients live outside this workspace; they implement these
//! traits and are injected into the gate, orchestrator and diagnostics.
//!
//! ## Retry
//!
//! [`RetryingDirectory`], [`RetryingHrSystem`] and [`RetryingDepartmentSource`]
//! wrap any implementation and retry transient failures with exponential
//! backoff, giving up after the configured number of attempts.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod directory;
pub mod error;
pub mod hr;
pub mod memory;
pub mod retry;
pub mod source;

pub use directory::{Directory, DirectoryResult};
pub use error::{DirectoryError, HrError, HrRejection, SourceError, Transient};
pub use hr::{dispatch, HrResult, HrSystem};
pub use memory::{DirectorySnapshot, InMemoryDirectory, RecordingHrSystem, StaticDepartmentSource};
pub use retry::{with_retry, RetryingDepartmentSource, RetryingDirectory, RetryingHrSystem};
pub use source::{DepartmentSource, SourceResult};

//! OrgSync Types - Core types for directory and HR change orchestration
//!
//! OrgSync sits between the master organization directory and the external
//! HR system. Every organizational change is authorized against a configured
//! scope and replicated into the HR system before the directory commits it.
//!
//! ## Key Concepts
//!
//! - **OrgUnit / Address**: Directory-owned records, read-only to OrgSync
//! - **ChangeEvent**: A closed set of change kinds with an effective date
//! - **HrCommand**: The shaped, ready-to-dispatch HR system mutation
//! - **DepartmentRecord**: The HR system's denormalized department shape
//! - **OrgSyncError**: Classified error taxonomy shared by every crate
//! - **OrgSyncConfig**: Immutable configuration loaded once at startup

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod address;
pub mod command;
pub mod config;
pub mod department;
pub mod error;
pub mod event;
pub mod unit;

pub use address::{AddressKind, AddressPayload};
pub use command::{ApplyOutcome, ApplyStatus, HrCommand, ParentSnapshot, UnitCreation};
pub use config::{AllowList, HrSystemConfig, LoggingConfig, OrgSyncConfig, RetryConfig};
pub use department::DepartmentRecord;
pub use error::{ErrorClass, OrgSyncError, Result, Upstream};
pub use event::{first_of_month, ChangeEvent, ChangeKind, ChangeRequest, UnitPayload};
pub use unit::{OrgUnit, Validity};

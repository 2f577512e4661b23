//! # OrgSync Orchestrator
//!
//! Turns directory change events into validated, ordered HR system calls.
//!
//! ## Flow
//!
//! 1. Validate and shape the event payload into an [`HrCommand`](orgsync_types::HrCommand)
//! 2. Authorize the affected unit through the [`ScopeGate`](orgsync_gate::ScopeGate)
//! 3. Issue the HR call, unless the event is a dry run
//! 4. Classify any rejection: duplicates are success, a missing postal
//!    address is a dependency-order error, the rest is surfaced verbatim
//!
//! Dry runs go through every step except the final HR call and return the
//! same outcome a live run would.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod classify;
pub mod orchestrator;
pub mod shaping;

pub use classify::{Classification, RejectionClassifier};
pub use orchestrator::ChangeOrchestrator;
pub use shaping::{CommandShaper, UnitFields};

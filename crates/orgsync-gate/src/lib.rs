//! # OrgSync Gate
//!
//! Decides whether an organizational unit lies inside the authorized scope.
//!
//! A unit is in scope when it, or any of its ancestors, is one of the
//! configured allow-list roots. The walk reads one unit per step from the
//! [`Directory`](orgsync_collaborators::Directory) and fails with an integrity
//! error instead of looping when the parent links form a cycle.
//!
//! ```ignore
//! let gate = AllowListGate::new(config.allow_list(), directory);
//! gate.authorize(unit, at).await?;
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod allow_list;
pub mod gate;

pub use allow_list::AllowListGate;
pub use gate::ScopeGate;

//! # OrgSync Hierarchy
//!
//! Reconstructs the HR system's department forest from its denormalized
//! listings, where every record embeds its full parent chain.
//!
//! - [`ParentMap`] flattens the embedded chains, first occurrence wins
//! - [`build_forest`] expands the map into ordered trees
//! - [`Forest`] renders as indented text with box-drawing prefixes
//! - [`duplicate_identifiers`] reports business identifiers used more than once
//! - [`HierarchyDiagnostics`] drives all of the above from a
//!   [`DepartmentSource`](orgsync_collaborators::DepartmentSource)
//!
//! Everything is rebuilt per call; nothing is cached.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod diagnostics;
pub mod duplicates;
pub mod forest;
pub mod parent_map;

pub use diagnostics::HierarchyDiagnostics;
pub use duplicates::{count_duplicates, duplicate_identifiers, DuplicateIdentifier};
pub use forest::{build_forest, build_forest_with_listing, Forest, TreeNode};
pub use parent_map::{ParentEntry, ParentMap};

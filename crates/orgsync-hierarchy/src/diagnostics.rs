//! Diagnostic queries over a department source

use crate::duplicates::{duplicate_identifiers, DuplicateIdentifier};
use crate::forest::{build_forest_with_listing, Forest};
use orgsync_collaborators::DepartmentSource;
use orgsync_types::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Answers tree and duplicate queries against the HR system's listings
pub struct HierarchyDiagnostics {
    source: Arc<dyn DepartmentSource>,
}

impl HierarchyDiagnostics {
    pub fn new(source: Arc<dyn DepartmentSource>) -> Self {
        Self { source }
    }

    /// Reconstruct the forest, or the subtree under `root`.
    ///
    /// Names come from the flat listing; the structure comes from the
    /// organization listing's embedded chains. Both are fetched concurrently.
    #[instrument(skip(self))]
    pub async fn tree(&self, root: Option<Uuid>) -> Result<Forest> {
        let (departments, organization) = tokio::try_join!(
            self.source.list_departments(),
            self.source.list_organization()
        )?;

        let forest = build_forest_with_listing(&organization, &departments, root)?;
        info!(
            records = organization.len(),
            trees = forest.len(),
            nodes = forest.node_count(),
            "Hierarchy reconstructed"
        );
        Ok(forest)
    }

    #[instrument(skip(self))]
    pub async fn duplicate_identifiers(&self) -> Result<Vec<DuplicateIdentifier>> {
        let departments = self.source.list_departments().await?;
        let report = duplicate_identifiers(&departments);
        info!(
            departments = departments.len(),
            duplicates = report.len(),
            "Duplicate identifiers counted"
        );
        Ok(report)
    }
}

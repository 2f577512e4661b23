//! Duplicate identifier report

use super::read_json;
use crate::output::print_json;
use orgsync_collaborators::{RetryingDepartmentSource, StaticDepartmentSource};
use orgsync_hierarchy::HierarchyDiagnostics;
use orgsync_types::{DepartmentRecord, OrgSyncConfig};
use std::path::Path;
use std::sync::Arc;

pub async fn execute(config: &OrgSyncConfig, departments: &Path) -> anyhow::Result<()> {
    let departments: Vec<DepartmentRecord> = read_json(departments)?;

    // The organization listing is not needed for counting
    let source = RetryingDepartmentSource::new(
        StaticDepartmentSource::new(departments, Vec::new()),
        config.retry.clone(),
    );
    let diagnostics = HierarchyDiagnostics::new(Arc::new(source));

    let report = diagnostics.duplicate_identifiers().await?;
    print_json(&report)
}

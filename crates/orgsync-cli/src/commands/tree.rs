//! Forest rendering

use super::read_json;
use orgsync_collaborators::{RetryingDepartmentSource, StaticDepartmentSource};
use orgsync_hierarchy::HierarchyDiagnostics;
use orgsync_types::{DepartmentRecord, OrgSyncConfig};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub async fn execute(
    config: &OrgSyncConfig,
    departments: &Path,
    organization: &Path,
    root: Option<Uuid>,
) -> anyhow::Result<()> {
    let departments: Vec<DepartmentRecord> = read_json(departments)?;
    let organization: Vec<DepartmentRecord> = read_json(organization)?;

    let source = RetryingDepartmentSource::new(
        StaticDepartmentSource::new(departments, organization),
        config.retry.clone(),
    );
    let diagnostics = HierarchyDiagnostics::new(Arc::new(source));

    let forest = diagnostics.tree(root).await?;
    print!("{}", forest);
    Ok(())
}

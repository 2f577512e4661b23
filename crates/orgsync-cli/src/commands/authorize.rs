//! Allow-list check against a directory snapshot

use super::snapshot_directory;
use crate::output::{print_success, print_warning};
use chrono::{Local, NaiveDate};
use orgsync_gate::{AllowListGate, ScopeGate};
use orgsync_types::{first_of_month, OrgSyncConfig};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub async fn execute(
    config: &OrgSyncConfig,
    unit: Uuid,
    directory: &Path,
    at: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let directory = snapshot_directory(directory, &config.retry)?;
    let gate = AllowListGate::new(config.allow_list(), Arc::new(directory));
    let at = at.unwrap_or_else(|| first_of_month(Local::now().date_naive()));

    if gate.is_authorized(unit, at).await? {
        print_success(&format!("{} is inside the allow list as of {}", unit, at));
        Ok(())
    } else {
        print_warning(&format!("{} is outside the allow list as of {}", unit, at));
        std::process::exit(1);
    }
}

//! Dry-run simulation of a change request

use super::{read_json, snapshot_directory};
use crate::output::print_json;
use chrono::{Local, NaiveDate};
use orgsync_collaborators::RecordingHrSystem;
use orgsync_gate::AllowListGate;
use orgsync_orchestrator::ChangeOrchestrator;
use orgsync_types::{ChangeRequest, OrgSyncConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub async fn execute(
    config: &OrgSyncConfig,
    event: &Path,
    directory: &Path,
    today: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let request: ChangeRequest = read_json(event)?;
    let directory = Arc::new(snapshot_directory(directory, &config.retry)?);

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    // Simulation never reaches the HR system
    let event = request.resolve(today).dry_run(true);
    info!(kind = event.kind.name(), at = %event.at, "Simulating change");

    let gate = Arc::new(AllowListGate::new(config.allow_list(), directory.clone()));
    let orchestrator = ChangeOrchestrator::new(
        gate,
        directory,
        Arc::new(RecordingHrSystem::new()),
        config.hr_system.clone(),
    );

    let outcome = orchestrator.apply(&event).await?;
    print_json(&outcome)
}

//! Change orchestrator
//!
//! One [`ChangeEvent`] becomes at most one HR system call. Unit edits that
//! both rename and move are expanded by [`ChangeEvent::unit_edit`] and run
//! through [`ChangeOrchestrator::apply_sequence`].

use crate::classify::{Classification, RejectionClassifier};
use crate::shaping::CommandShaper;
use orgsync_collaborators::{dispatch, Directory, HrSystem};
use orgsync_gate::ScopeGate;
use orgsync_types::{
    ApplyOutcome, ChangeEvent, ChangeKind, HrCommand, HrSystemConfig, OrgSyncError, OrgUnit,
    Result,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Validates, authorizes and replicates directory changes into the HR system
pub struct ChangeOrchestrator {
    /// Authorization scope
    gate: Arc<dyn ScopeGate>,

    /// Directory reads for the organization root and parent snapshots
    directory: Arc<dyn Directory>,

    /// HR system mutations
    hr: Arc<dyn HrSystem>,

    hr_config: HrSystemConfig,
    classifier: RejectionClassifier,
}

impl ChangeOrchestrator {
    pub fn new(
        gate: Arc<dyn ScopeGate>,
        directory: Arc<dyn Directory>,
        hr: Arc<dyn HrSystem>,
        hr_config: HrSystemConfig,
    ) -> Self {
        let classifier = RejectionClassifier::new(&hr_config);
        Self {
            gate,
            directory,
            hr,
            hr_config,
            classifier,
        }
    }

    /// Apply a single change event
    #[instrument(
        skip(self, event),
        fields(
            kind = event.kind.name(),
            subject = ?event.kind.subject(),
            at = %event.at,
            dry_run = event.dry_run
        )
    )]
    pub async fn apply(&self, event: &ChangeEvent) -> Result<ApplyOutcome> {
        let Some(command) = self.prepare(event).await? else {
            info!("Address has no owning unit, nothing to replicate");
            return Ok(ApplyOutcome::noop());
        };

        if event.dry_run {
            info!(call = command.name(), unit = %command.unit(), "Dry run, HR call suppressed");
            return Ok(ApplyOutcome::ok(command));
        }

        match dispatch(self.hr.as_ref(), &command).await {
            Ok(()) => {
                info!(call = command.name(), unit = %command.unit(), "Change applied");
                Ok(ApplyOutcome::ok(command))
            }
            Err(err) => match self.classifier.classify(err) {
                Classification::AlreadyApplied(rejection) => {
                    info!(
                        call = command.name(),
                        unit = %command.unit(),
                        code = %rejection.code,
                        "Change already applied"
                    );
                    Ok(ApplyOutcome::ok(command))
                }
                Classification::Failed(err) => {
                    warn!(
                        call = command.name(),
                        unit = %command.unit(),
                        error = %err,
                        label = err.label(),
                        "HR call failed"
                    );
                    Err(err)
                }
            },
        }
    }

    /// Apply dependent events in order, stopping at the first failure.
    ///
    /// The effective dates must not decrease; this is checked before any
    /// event is applied.
    pub async fn apply_sequence(&self, events: &[ChangeEvent]) -> Result<Vec<ApplyOutcome>> {
        if let Some(pair) = events.windows(2).find(|pair| pair[1].at < pair[0].at) {
            return Err(OrgSyncError::Validation(format!(
                "effective date goes backwards in sequence: {} after {}",
                pair[1].at, pair[0].at
            )));
        }

        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.apply(event).await?);
        }
        Ok(outcomes)
    }

    /// Validate, authorize and shape; `None` means there is nothing to send
    async fn prepare(&self, event: &ChangeEvent) -> Result<Option<HrCommand>> {
        let shaper = CommandShaper::new(&self.hr_config);
        let at = event.at;

        match &event.kind {
            ChangeKind::CreateUnit {
                uuid,
                payload,
                parent,
            } => {
                let parent = self.creation_parent(*uuid, *parent).await?;
                let fields = shaper.check_unit_payload(payload)?;
                self.gate.authorize(parent, at).await?;
                let snapshot = self.read_unit(parent, event).await?;
                Ok(Some(shaper.create_unit(*uuid, payload, fields, &snapshot, at)))
            }
            ChangeKind::RenameUnit { uuid, new_name } => {
                let command = shaper.rename_unit(*uuid, new_name, at)?;
                self.gate.authorize(*uuid, at).await?;
                Ok(Some(command))
            }
            ChangeKind::MoveUnit { uuid, new_parent } => {
                let command = shaper.move_unit(*uuid, *new_parent, at)?;
                self.gate.authorize(*uuid, at).await?;
                Ok(Some(command))
            }
            ChangeKind::CreateAddress {
                owning_unit,
                payload,
            } => {
                let Some(unit) = owning_unit else {
                    return Ok(None);
                };
                shaper.check_address(payload)?;
                self.gate.authorize(*unit, at).await?;
                Ok(Some(HrCommand::CreateAddress {
                    unit: *unit,
                    address: payload.clone(),
                    at,
                }))
            }
            ChangeKind::EditAddress {
                owning_unit,
                payload,
            } => {
                let Some(unit) = owning_unit else {
                    return Ok(None);
                };
                shaper.check_address(payload)?;
                self.gate.authorize(*unit, at).await?;
                Ok(Some(HrCommand::EditAddress {
                    unit: *unit,
                    address: payload.clone(),
                    at,
                }))
            }
        }
    }

    /// New units need a parent below the organization root
    async fn creation_parent(&self, uuid: Uuid, parent: Option<Uuid>) -> Result<Uuid> {
        let parent = parent.ok_or_else(|| {
            OrgSyncError::Policy(format!("unit {} cannot be created without a parent", uuid))
        })?;

        let root = self.directory.read_root().await?;
        if parent == root {
            return Err(OrgSyncError::Policy(format!(
                "unit {} cannot be created directly under the organization root",
                uuid
            )));
        }
        Ok(parent)
    }

    async fn read_unit(&self, uuid: Uuid, event: &ChangeEvent) -> Result<OrgUnit> {
        self.directory
            .read_unit(uuid, event.at)
            .await?
            .ok_or_else(|| OrgSyncError::unit_not_found(&uuid))
    }
}

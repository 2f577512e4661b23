//! End-to-end orchestration against in-memory collaborators

use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_collaborators::{
    HrError, HrResult, HrSystem, InMemoryDirectory, RecordingHrSystem, RetryingHrSystem,
};
use orgsync_gate::{AllowListGate, ScopeGate};
use orgsync_orchestrator::ChangeOrchestrator;
use orgsync_types::{
    AddressKind, AddressPayload, AllowList, ApplyStatus, ChangeEvent, ChangeKind, ChangeRequest,
    HrCommand, HrSystemConfig, OrgSyncConfig, OrgSyncError, OrgUnit, RetryConfig, UnitCreation,
    UnitPayload, Upstream,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn at() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

/// root -> scope -> department -> team, and root -> elsewhere
struct Org {
    directory: Arc<InMemoryDirectory>,
    root: Uuid,
    scope: Uuid,
    department: Uuid,
    team: Uuid,
    elsewhere: Uuid,
}

impl Org {
    fn new() -> Self {
        let root = Uuid::new_v4();
        let scope = Uuid::new_v4();
        let department = Uuid::new_v4();
        let team = Uuid::new_v4();
        let elsewhere = Uuid::new_v4();

        let directory = InMemoryDirectory::new(root)
            .with_unit(OrgUnit::new(root, "Organization", None, at()))
            .with_unit(
                OrgUnit::new(scope, "Administration", Some(root), at()).with_level("NY2-niveau"),
            )
            .with_unit(
                OrgUnit::new(department, "Finance", Some(scope), at()).with_level("NY1-niveau"),
            )
            .with_unit(OrgUnit::new(team, "Payroll", Some(department), at()))
            .with_unit(OrgUnit::new(elsewhere, "Schools", Some(root), at()));

        Self {
            directory: Arc::new(directory),
            root,
            scope,
            department,
            team,
            elsewhere,
        }
    }

    fn gate(&self) -> Arc<AllowListGate> {
        Arc::new(AllowListGate::new(
            AllowList::new([self.scope]),
            self.directory.clone(),
        ))
    }

    fn orchestrator(&self, hr: Arc<dyn HrSystem>) -> ChangeOrchestrator {
        ChangeOrchestrator::new(
            self.gate(),
            self.directory.clone(),
            hr,
            HrSystemConfig::default(),
        )
    }
}

fn rename(uuid: Uuid, name: &str) -> ChangeEvent {
    ChangeEvent::new(
        ChangeKind::RenameUnit {
            uuid,
            new_name: name.into(),
        },
        at(),
    )
}

fn create_unit(uuid: Uuid, parent: Uuid) -> ChangeEvent {
    ChangeEvent::new(
        ChangeKind::CreateUnit {
            uuid,
            payload: UnitPayload::new("Accounts").with_level("Afdelings-niveau"),
            parent: Some(parent),
        },
        at(),
    )
}

fn edit_address(unit: Uuid, kind: AddressKind, value: &str) -> ChangeEvent {
    ChangeEvent::new(
        ChangeKind::EditAddress {
            owning_unit: Some(unit),
            payload: AddressPayload::new(kind, value),
        },
        at(),
    )
}

/// HR stand-in that enforces the postal-address-first rule
#[derive(Default)]
struct PostalAwareHr {
    postal: Mutex<HashSet<Uuid>>,
    applied: Mutex<Vec<Uuid>>,
}

impl PostalAwareHr {
    fn set_address(&self, unit: Uuid, address: &AddressPayload) -> HrResult<()> {
        let mut postal = self.postal.lock().unwrap();
        if address.kind.requires_postal_address() && !postal.contains(&unit) {
            return Err(HrError::rejected(
                "MISSING_POSTAL_ADDRESS",
                "registration number requires a postal address",
            ));
        }
        if address.kind == AddressKind::Postal {
            postal.insert(unit);
        }
        self.applied.lock().unwrap().push(unit);
        Ok(())
    }
}

#[async_trait]
impl HrSystem for PostalAwareHr {
    async fn create_unit(&self, _creation: &UnitCreation) -> HrResult<()> {
        Ok(())
    }

    async fn rename_unit(&self, _uuid: Uuid, _name: &str, _at: NaiveDate) -> HrResult<()> {
        Ok(())
    }

    async fn move_unit(&self, _uuid: Uuid, _new_parent: Uuid, _at: NaiveDate) -> HrResult<()> {
        Ok(())
    }

    async fn create_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        _at: NaiveDate,
    ) -> HrResult<()> {
        self.set_address(unit, address)
    }

    async fn edit_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        _at: NaiveDate,
    ) -> HrResult<()> {
        self.set_address(unit, address)
    }
}

#[tokio::test]
async fn test_gate_follows_ancestor_chain() {
    let org = Org::new();
    let gate = org.gate();

    assert!(gate.is_authorized(org.team, at()).await.unwrap());
    assert!(gate.is_authorized(org.scope, at()).await.unwrap());
    assert!(!gate.is_authorized(org.elsewhere, at()).await.unwrap());
    assert!(!gate.is_authorized(org.root, at()).await.unwrap());
}

#[tokio::test]
async fn test_out_of_scope_rename_is_policy_error() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let orchestrator = org.orchestrator(hr.clone());

    let err = orchestrator
        .apply(&rename(org.elsewhere, "Libraries"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrgSyncError::Policy(_)));
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_absent_unit_is_not_found_not_policy() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let orchestrator = org.orchestrator(hr.clone());

    let err = orchestrator
        .apply(&rename(Uuid::new_v4(), "Ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrgSyncError::NotFound(_)));
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_dry_run_matches_live_outcome_without_calls() {
    let org = Org::new();
    let child = Uuid::new_v4();

    let dry_hr = Arc::new(RecordingHrSystem::new());
    let dry = org
        .orchestrator(dry_hr.clone())
        .apply(&create_unit(child, org.department).dry_run(true))
        .await
        .unwrap();

    let live_hr = Arc::new(RecordingHrSystem::new());
    let live = org
        .orchestrator(live_hr.clone())
        .apply(&create_unit(child, org.department))
        .await
        .unwrap();

    assert_eq!(dry, live);
    assert_eq!(dry_hr.call_count(), 0);
    assert_eq!(live_hr.call_count(), 1);
}

#[tokio::test]
async fn test_dry_run_still_validates() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let event = ChangeEvent::new(
        ChangeKind::CreateUnit {
            uuid: Uuid::new_v4(),
            payload: UnitPayload::new("Accounts").with_level("Unknown-niveau"),
            parent: Some(org.department),
        },
        at(),
    )
    .dry_run(true);

    let err = org.orchestrator(hr).apply(&event).await.unwrap_err();

    assert!(matches!(err, OrgSyncError::Validation(_)));
}

#[tokio::test]
async fn test_create_under_root_rejected_before_child_read() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let child = Uuid::new_v4();

    let err = org
        .orchestrator(hr.clone())
        .apply(&create_unit(child, org.root))
        .await
        .unwrap_err();

    assert!(matches!(err, OrgSyncError::Policy(_)));
    assert!(org.directory.reads().is_empty());
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_create_address_without_owner_is_noop() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let event = ChangeEvent::new(
        ChangeKind::CreateAddress {
            owning_unit: None,
            payload: AddressPayload::new(AddressKind::Email, "someone@example.org"),
        },
        at(),
    );

    let outcome = org.orchestrator(hr.clone()).apply(&event).await.unwrap();

    assert_eq!(outcome.status, ApplyStatus::Noop);
    assert!(outcome.command.is_none());
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_registration_number_requires_postal_address_first() {
    let org = Org::new();
    let hr = Arc::new(PostalAwareHr::default());
    let orchestrator = org.orchestrator(hr.clone());

    let err = orchestrator
        .apply(&edit_address(org.team, AddressKind::RegistrationNumber, "1003456789"))
        .await
        .unwrap_err();
    assert!(matches!(err, OrgSyncError::DependencyOrder(_)));

    orchestrator
        .apply(&edit_address(org.team, AddressKind::Postal, "Main Street 1, 8000"))
        .await
        .unwrap();
    orchestrator
        .apply(&edit_address(org.team, AddressKind::RegistrationNumber, "1003456789"))
        .await
        .unwrap();

    assert_eq!(hr.applied.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_rejection_surfaces_verbatim() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    hr.fail_next("move_unit", HrError::rejected("E_PERIOD_CLOSED", "payroll period closed"));
    let event = ChangeEvent::new(
        ChangeKind::MoveUnit {
            uuid: org.team,
            new_parent: org.scope,
        },
        at(),
    );

    let err = org.orchestrator(hr).apply(&event).await.unwrap_err();

    assert_eq!(
        err,
        OrgSyncError::UpstreamRejected {
            code: "E_PERIOD_CLOSED".into(),
            message: "payroll period closed".into(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_retried_up_to_bound() {
    let org = Org::new();
    let recording = RecordingHrSystem::new();
    for _ in 0..3 {
        recording.fail_next("rename_unit", HrError::Unavailable("gateway timeout".into()));
    }
    let hr = Arc::new(RetryingHrSystem::new(recording, RetryConfig::default()));

    let err = org
        .orchestrator(hr.clone())
        .apply(&rename(org.team, "Salaries"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrgSyncError::UpstreamUnavailable {
            system: Upstream::HrSystem,
            ..
        }
    ));
    assert!(err.is_retryable());
    assert_eq!(hr.inner().call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_that_lands_on_duplicate_is_success() {
    let org = Org::new();
    let recording = RecordingHrSystem::new();
    recording.fail_next("rename_unit", HrError::Unavailable("reset".into()));
    recording.fail_next("rename_unit", HrError::rejected("DUPLICATE", "name already set"));
    let hr = Arc::new(RetryingHrSystem::new(recording, RetryConfig::default()));

    let outcome = org
        .orchestrator(hr.clone())
        .apply(&rename(org.team, "Salaries"))
        .await
        .unwrap();

    assert_eq!(outcome.status, ApplyStatus::Ok);
    assert_eq!(hr.inner().call_count(), 2);
}

#[tokio::test]
async fn test_ancestor_cycle_is_integrity_error() {
    let root = Uuid::new_v4();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let directory = Arc::new(
        InMemoryDirectory::new(root)
            .with_unit(OrgUnit::new(a, "A", Some(b), at()))
            .with_unit(OrgUnit::new(b, "B", Some(a), at())),
    );
    let gate = Arc::new(AllowListGate::new(AllowList::new([root]), directory.clone()));
    let hr = Arc::new(RecordingHrSystem::new());
    let orchestrator =
        ChangeOrchestrator::new(gate, directory, hr.clone(), HrSystemConfig::default());

    let err = orchestrator.apply(&rename(a, "Looped")).await.unwrap_err();

    assert!(matches!(err, OrgSyncError::Integrity(_)));
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_unit_edit_renames_before_moving() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let events = ChangeEvent::unit_edit(
        org.team,
        Some("Salaries".into()),
        Some(org.scope),
        at(),
        false,
    );

    let outcomes = org
        .orchestrator(hr.clone())
        .apply_sequence(&events)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    let calls = hr.calls();
    assert!(matches!(calls[0], HrCommand::RenameUnit { .. }));
    assert!(matches!(calls[1], HrCommand::MoveUnit { .. }));
}

#[tokio::test]
async fn test_sequence_stops_at_first_failure() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let events = vec![
        rename(org.elsewhere, "Out of scope"),
        rename(org.team, "Never sent"),
    ];

    let err = org
        .orchestrator(hr.clone())
        .apply_sequence(&events)
        .await
        .unwrap_err();

    assert!(matches!(err, OrgSyncError::Policy(_)));
    assert_eq!(hr.call_count(), 0);
}

#[tokio::test]
async fn test_request_resolution_feeds_orchestrator() {
    let org = Org::new();
    let hr = Arc::new(RecordingHrSystem::new());
    let request: ChangeRequest = serde_json::from_value(serde_json::json!({
        "kind": "RenameUnit",
        "uuid": org.team,
        "new_name": "Salaries",
        "dry_run": true,
    }))
    .unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 9, 17).unwrap();

    let event = request.resolve(today);
    let outcome = org.orchestrator(hr.clone()).apply(&event).await.unwrap();

    assert_eq!(event.at, at());
    assert_eq!(outcome.command.map(|c| c.at()), Some(at()));
    assert_eq!(hr.call_count(), 0);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let empty_allow_list = OrgSyncConfig::default();
    let err = empty_allow_list.validate().unwrap_err();
    assert!(matches!(err, OrgSyncError::Configuration(_)));

    let mut zero_attempts = OrgSyncConfig {
        allow_list: vec![Uuid::new_v4()],
        ..Default::default()
    };
    zero_attempts.retry.max_attempts = 0;
    assert!(matches!(
        zero_attempts.validate(),
        Err(OrgSyncError::Configuration(_))
    ));
}

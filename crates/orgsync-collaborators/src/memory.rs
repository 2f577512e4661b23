//! In-memory implementations of the collaborator traits
//!
//! Used by the CLI against exported snapshots and by tests. They record what
//! they were asked to do and can be scripted to fail.

use crate::directory::{Directory, DirectoryResult};
use crate::error::{DirectoryError, HrError, SourceError};
use crate::hr::{HrResult, HrSystem};
use crate::source::{DepartmentSource, SourceResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use orgsync_types::{AddressPayload, DepartmentRecord, HrCommand, OrgUnit, UnitCreation};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Serialized form of a directory export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub root: Uuid,

    /// Every recorded version of every unit
    #[serde(default)]
    pub units: Vec<OrgUnit>,
}

/// In-memory directory holding dated unit versions
pub struct InMemoryDirectory {
    root: Uuid,
    versions: DashMap<Uuid, Vec<OrgUnit>>,
    reads: Mutex<Vec<Uuid>>,
    failing_reads: AtomicU32,
}

impl InMemoryDirectory {
    pub fn new(root: Uuid) -> Self {
        Self {
            root,
            versions: DashMap::new(),
            reads: Mutex::new(Vec::new()),
            failing_reads: AtomicU32::new(0),
        }
    }

    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        let directory = Self::new(snapshot.root);
        for unit in snapshot.units {
            directory.insert(unit);
        }
        directory
    }

    /// Add a unit version
    pub fn insert(&self, unit: OrgUnit) {
        self.versions.entry(unit.uuid).or_default().push(unit);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_unit(self, unit: OrgUnit) -> Self {
        self.insert(unit);
        self
    }

    /// Make the next `count` reads fail as unreachable
    pub fn fail_next_reads(&self, count: u32) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    /// Unit uuids read so far, in order
    pub fn reads(&self) -> Vec<Uuid> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn unit_count(&self) -> usize {
        self.versions.len()
    }

    fn take_failure(&self) -> bool {
        self.failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn read_unit(&self, uuid: Uuid, at: NaiveDate) -> DirectoryResult<Option<OrgUnit>> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(uuid);

        if self.take_failure() {
            return Err(DirectoryError::Unavailable(format!(
                "simulated outage reading {}",
                uuid
            )));
        }

        Ok(self.versions.get(&uuid).and_then(|versions| {
            versions
                .iter()
                .filter(|unit| unit.is_valid_at(at))
                .max_by_key(|unit| unit.validity.from)
                .cloned()
        }))
    }

    async fn read_root(&self) -> DirectoryResult<Uuid> {
        if self.take_failure() {
            return Err(DirectoryError::Unavailable(
                "simulated outage reading root".into(),
            ));
        }
        Ok(self.root)
    }
}

/// HR system stand-in that records every call it receives
pub struct RecordingHrSystem {
    calls: Mutex<Vec<HrCommand>>,
    scripted: DashMap<&'static str, VecDeque<HrError>>,
}

impl RecordingHrSystem {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            scripted: DashMap::new(),
        }
    }

    /// Queue an error for the next call with the given name (e.g. `"move_unit"`)
    pub fn fail_next(&self, call: &'static str, error: HrError) {
        self.scripted.entry(call).or_default().push_back(error);
    }

    /// Every call received so far, failed attempts included
    pub fn calls(&self) -> Vec<HrCommand> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn record(&self, command: HrCommand) -> HrResult<()> {
        let name = command.name();
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command);

        match self
            .scripted
            .get_mut(name)
            .and_then(|mut queue| queue.pop_front())
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for RecordingHrSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HrSystem for RecordingHrSystem {
    async fn create_unit(&self, creation: &UnitCreation) -> HrResult<()> {
        self.record(HrCommand::CreateUnit(creation.clone()))
    }

    async fn rename_unit(&self, uuid: Uuid, name: &str, at: NaiveDate) -> HrResult<()> {
        self.record(HrCommand::RenameUnit {
            uuid,
            name: name.to_string(),
            at,
        })
    }

    async fn move_unit(&self, uuid: Uuid, new_parent: Uuid, at: NaiveDate) -> HrResult<()> {
        self.record(HrCommand::MoveUnit {
            uuid,
            new_parent,
            at,
        })
    }

    async fn create_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()> {
        self.record(HrCommand::CreateAddress {
            unit,
            address: address.clone(),
            at,
        })
    }

    async fn edit_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()> {
        self.record(HrCommand::EditAddress {
            unit,
            address: address.clone(),
            at,
        })
    }
}

/// Department source backed by fixed listings
pub struct StaticDepartmentSource {
    departments: Vec<DepartmentRecord>,
    organization: Vec<DepartmentRecord>,
    failing_calls: AtomicU32,
}

impl StaticDepartmentSource {
    pub fn new(departments: Vec<DepartmentRecord>, organization: Vec<DepartmentRecord>) -> Self {
        Self {
            departments,
            organization,
            failing_calls: AtomicU32::new(0),
        }
    }

    /// Make the next `count` listing calls fail as unreachable
    pub fn fail_next_calls(&self, count: u32) {
        self.failing_calls.store(count, Ordering::SeqCst);
    }

    fn check(&self, listing: &str) -> SourceResult<()> {
        let failed = self
            .failing_calls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(SourceError::Unavailable(format!(
                "simulated outage listing {}",
                listing
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DepartmentSource for StaticDepartmentSource {
    async fn list_departments(&self) -> SourceResult<Vec<DepartmentRecord>> {
        self.check("departments")?;
        Ok(self.departments.clone())
    }

    async fn list_organization(&self) -> SourceResult<Vec<DepartmentRecord>> {
        self.check("organization")?;
        Ok(self.organization.clone())
    }
}

//! HR system commands and orchestration outcomes
//!
//! An [`HrCommand`] is the fully shaped mutation the orchestrator would send
//! to the HR system. It is built identically in live and dry-run mode.

use crate::address::AddressPayload;
use crate::unit::OrgUnit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The parts of the parent's directory snapshot the HR system needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSnapshot {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    /// Directory-side time planning key of the parent
    #[serde(default)]
    pub time_planning: Option<String>,
}

impl From<&OrgUnit> for ParentSnapshot {
    fn from(unit: &OrgUnit) -> Self {
        Self {
            uuid: unit.uuid,
            name: unit.name.clone(),
            level: unit.level.clone(),
            time_planning: unit.time_planning.clone(),
        }
    }
}

/// Shaped payload for creating a unit in the HR system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCreation {
    pub uuid: Uuid,
    pub name: String,
    /// HR-side level key
    pub level: String,
    /// HR-side time planning value
    #[serde(default)]
    pub time_planning: Option<String>,
    pub parent: ParentSnapshot,
    pub at: NaiveDate,
}

/// One HR system mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HrCommand {
    CreateUnit(UnitCreation),
    RenameUnit {
        uuid: Uuid,
        name: String,
        at: NaiveDate,
    },
    MoveUnit {
        uuid: Uuid,
        new_parent: Uuid,
        at: NaiveDate,
    },
    CreateAddress {
        unit: Uuid,
        address: AddressPayload,
        at: NaiveDate,
    },
    EditAddress {
        unit: Uuid,
        address: AddressPayload,
        at: NaiveDate,
    },
}

impl HrCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HrCommand::CreateUnit(_) => "create_unit",
            HrCommand::RenameUnit { .. } => "rename_unit",
            HrCommand::MoveUnit { .. } => "move_unit",
            HrCommand::CreateAddress { .. } => "create_address",
            HrCommand::EditAddress { .. } => "edit_address",
        }
    }

    /// The unit the command mutates
    pub fn unit(&self) -> Uuid {
        match self {
            HrCommand::CreateUnit(creation) => creation.uuid,
            HrCommand::RenameUnit { uuid, .. } | HrCommand::MoveUnit { uuid, .. } => *uuid,
            HrCommand::CreateAddress { unit, .. } | HrCommand::EditAddress { unit, .. } => *unit,
        }
    }

    /// Effective date of the command
    pub fn at(&self) -> NaiveDate {
        match self {
            HrCommand::CreateUnit(creation) => creation.at,
            HrCommand::RenameUnit { at, .. }
            | HrCommand::MoveUnit { at, .. }
            | HrCommand::CreateAddress { at, .. }
            | HrCommand::EditAddress { at, .. } => *at,
        }
    }
}

/// Result status reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplyStatus {
    Ok,
    Noop,
}

/// Outcome of orchestrating one change event.
///
/// Live and dry-run executions produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub status: ApplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<HrCommand>,
}

impl ApplyOutcome {
    pub fn ok(command: HrCommand) -> Self {
        Self {
            status: ApplyStatus::Ok,
            command: Some(command),
        }
    }

    pub fn noop() -> Self {
        Self {
            status: ApplyStatus::Noop,
            command: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.status == ApplyStatus::Noop
    }
}

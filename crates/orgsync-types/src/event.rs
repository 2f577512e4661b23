//! Change events
//!
//! A [`ChangeRequest`] is the inbound shape: the effective date and the
//! dry-run flag are optional. Resolving it against "today" yields a
//! [`ChangeEvent`], whose `at` is always set.

use crate::address::AddressPayload;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// First day of the month containing `today`
pub fn first_of_month(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today)
}

/// Unit data carried by a create event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPayload {
    pub name: String,

    /// Directory-side level key, mapped onto the HR system's level keys
    #[serde(default)]
    pub level: Option<String>,

    /// Directory-side time planning key
    #[serde(default)]
    pub time_planning: Option<String>,
}

impl UnitPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            time_planning: None,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_time_planning(mut self, time_planning: impl Into<String>) -> Self {
        self.time_planning = Some(time_planning.into());
        self
    }
}

/// The closed set of change kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ChangeKind {
    CreateUnit {
        uuid: Uuid,
        payload: UnitPayload,
        /// Requested parent; absent means a top-level creation
        #[serde(default)]
        parent: Option<Uuid>,
    },
    RenameUnit {
        uuid: Uuid,
        new_name: String,
    },
    MoveUnit {
        uuid: Uuid,
        new_parent: Uuid,
    },
    CreateAddress {
        /// Absent when the address belongs to a person
        #[serde(default)]
        owning_unit: Option<Uuid>,
        payload: AddressPayload,
    },
    EditAddress {
        #[serde(default)]
        owning_unit: Option<Uuid>,
        payload: AddressPayload,
    },
}

impl ChangeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChangeKind::CreateUnit { .. } => "CreateUnit",
            ChangeKind::RenameUnit { .. } => "RenameUnit",
            ChangeKind::MoveUnit { .. } => "MoveUnit",
            ChangeKind::CreateAddress { .. } => "CreateAddress",
            ChangeKind::EditAddress { .. } => "EditAddress",
        }
    }

    /// The uuid this change is about, when it names one
    pub fn subject(&self) -> Option<Uuid> {
        match self {
            ChangeKind::CreateUnit { uuid, .. }
            | ChangeKind::RenameUnit { uuid, .. }
            | ChangeKind::MoveUnit { uuid, .. } => Some(*uuid),
            ChangeKind::CreateAddress { owning_unit, .. }
            | ChangeKind::EditAddress { owning_unit, .. } => *owning_unit,
        }
    }
}

/// Inbound change request, before defaults are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    #[serde(flatten)]
    pub kind: ChangeKind,

    /// Effective date; defaults to the first of the current month
    #[serde(default)]
    pub at: Option<NaiveDate>,

    #[serde(default)]
    pub dry_run: bool,
}

impl ChangeRequest {
    pub fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            at: None,
            dry_run: false,
        }
    }

    /// Apply defaults relative to `today`
    pub fn resolve(self, today: NaiveDate) -> ChangeEvent {
        ChangeEvent {
            kind: self.kind,
            at: self.at.unwrap_or_else(|| first_of_month(today)),
            dry_run: self.dry_run,
        }
    }
}

/// A resolved, request-scoped change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(flatten)]
    pub kind: ChangeKind,
    pub at: NaiveDate,
    pub dry_run: bool,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, at: NaiveDate) -> Self {
        Self {
            kind,
            at,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Split a combined unit edit into its dependent steps.
    ///
    /// The rename is applied before the move, both at the same date.
    pub fn unit_edit(
        uuid: Uuid,
        new_name: Option<String>,
        new_parent: Option<Uuid>,
        at: NaiveDate,
        dry_run: bool,
    ) -> Vec<ChangeEvent> {
        let mut events = Vec::new();
        if let Some(new_name) = new_name {
            events.push(
                ChangeEvent::new(ChangeKind::RenameUnit { uuid, new_name }, at).dry_run(dry_run),
            );
        }
        if let Some(new_parent) = new_parent {
            events.push(
                ChangeEvent::new(ChangeKind::MoveUnit { uuid, new_parent }, at).dry_run(dry_run),
            );
        }
        events
    }
}

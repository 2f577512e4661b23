//! Organizational unit types
//!
//! An OrgUnit is a snapshot of one directory unit as of a given date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Effective-validity interval of a directory record.
///
/// `to` is inclusive; `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl Validity {
    /// Open-ended validity starting at `from`
    pub fn starting(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    /// Whether the interval covers the given date
    pub fn contains(&self, at: NaiveDate) -> bool {
        at >= self.from && self.to.map_or(true, |to| at <= to)
    }
}

/// A directory unit snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub uuid: Uuid,

    pub name: String,

    /// Parent unit; `None` only directly below the synthetic root
    #[serde(default)]
    pub parent: Option<Uuid>,

    /// Directory-side level key (e.g. "NY3-niveau")
    #[serde(default)]
    pub level: Option<String>,

    /// Directory-side time planning key
    #[serde(default)]
    pub time_planning: Option<String>,

    pub validity: Validity,
}

impl OrgUnit {
    pub fn new(uuid: Uuid, name: impl Into<String>, parent: Option<Uuid>, from: NaiveDate) -> Self {
        Self {
            uuid,
            name: name.into(),
            parent,
            level: None,
            time_planning: None,
            validity: Validity::starting(from),
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

    pub fn with_validity(mut self, validity: Validity) -> Self {
        self.validity = validity;
        self
    }

    pub fn is_valid_at(&self, at: NaiveDate) -> bool {
        self.validity.contains(at)
    }
}

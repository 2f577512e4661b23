//! HR system department records
//!
//! The HR system returns every department with its parent embedded inline,
//! and that parent embeds its own parent, all the way to the top. The same
//! ancestor therefore appears many times across a listing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A department as returned by the HR system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    #[serde(rename = "DepartmentUUIDIdentifier")]
    pub uuid: Uuid,

    /// Business identifier; not guaranteed unique
    #[serde(rename = "DepartmentIdentifier")]
    pub identifier: String,

    #[serde(rename = "DepartmentLevelIdentifier")]
    pub level: String,

    #[serde(rename = "DepartmentName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Embedded parent record
    #[serde(rename = "DepartmentReference", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<DepartmentRecord>>,
}

impl DepartmentRecord {
    pub fn new(uuid: Uuid, identifier: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            uuid,
            identifier: identifier.into(),
            level: level.into(),
            name: None,
            parent: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: DepartmentRecord) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn parent_uuid(&self) -> Option<Uuid> {
        self.parent.as_ref().map(|p| p.uuid)
    }

    /// Iterate this record followed by its embedded ancestors
    pub fn chain(&self) -> impl Iterator<Item = &DepartmentRecord> {
        std::iter::successors(Some(self), |record| record.parent.as_deref())
    }
}

//! Directory read capability

use crate::error::DirectoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_types::OrgUnit;
use uuid::Uuid;

/// Result type for directory reads
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only access to the master organization directory
#[async_trait]
pub trait Directory: Send + Sync {
    /// Read a unit as of `at`; `None` when the unit does not exist at that date
    async fn read_unit(&self, uuid: Uuid, at: NaiveDate) -> DirectoryResult<Option<OrgUnit>>;

    /// The organization's synthetic root
    async fn read_root(&self) -> DirectoryResult<Uuid>;
}

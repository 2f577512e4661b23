//! HR system department listings

use crate::error::SourceError;
use async_trait::async_trait;
use orgsync_types::DepartmentRecord;

/// Result type for department listings
pub type SourceResult<T> = Result<T, SourceError>;

/// Read access to the HR system's department data
#[async_trait]
pub trait DepartmentSource: Send + Sync {
    /// Flat department listing, one record per department, with names
    async fn list_departments(&self) -> SourceResult<Vec<DepartmentRecord>>;

    /// Organization listing: records with their parent chains embedded
    async fn list_organization(&self) -> SourceResult<Vec<DepartmentRecord>>;
}
